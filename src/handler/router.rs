//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Every request is classified
//! independently, first match wins:
//! 1. diagnostic path, canned 200 for any method
//! 2. protected path, login form or password check
//! 3. anything else, static file lookup
//!
//! Unresolvable paths and failed lookups all become the same 404.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_LENGTH;
use hyper::http::request::Parts;
use hyper::{HeaderMap, Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::{AppState, SiteSettings};
use crate::handler::static_files::{FileServer, ServeError};
use crate::http::{self, login_page, FormError};
use crate::logger;
use crate::routing::{self, ResolvedPath, RouteKind};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(state.router.handle(req).await)
}

/// Routes requests for one site. Holds no mutable state.
pub struct Router {
    site: SiteSettings,
    files: Arc<dyn FileServer>,
}

impl Router {
    pub fn new(site: SiteSettings, files: Arc<dyn FileServer>) -> Self {
        Self { site, files }
    }

    /// Produce the response for a single request
    pub async fn handle<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let (parts, body) = req.into_parts();

        let path = match routing::resolve(parts.uri.path()) {
            Ok(path) => path,
            Err(e) => {
                logger::log_warning(&format!("Rejected path '{}': {e}", parts.uri.path()));
                return http::build_404_response();
            }
        };

        match routing::match_route(&path, &self.site) {
            RouteKind::Diagnostic => http::build_diagnostic_response(),
            RouteKind::Protected => self.handle_protected(&path, &parts, body).await,
            RouteKind::StaticFile => self.serve_file(&path, &parts).await,
        }
    }

    /// Login form on anything but `POST`; password check on `POST`
    async fn handle_protected<B>(
        &self,
        path: &ResolvedPath,
        parts: &Parts,
        body: B,
    ) -> Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if parts.method != Method::POST {
            return http::build_login_response(StatusCode::OK, login_page::render(None));
        }

        if let Some(resp) = check_body_size(&parts.headers, self.site.max_body_size) {
            return resp;
        }

        let password =
            match http::read_password(&parts.headers, body, self.site.max_body_size).await {
                Ok(password) => password,
                Err(FormError::TooLarge { limit }) => {
                    logger::log_warning(&format!("Login form body exceeded {limit} bytes"));
                    return http::build_413_response();
                }
                Err(e) => {
                    logger::log_warning(&format!("Unreadable login form: {e}"));
                    None
                }
            };

        match password {
            Some(candidate) if self.site.credential.matches(&candidate) => {
                self.serve_file(path, parts).await
            }
            _ => {
                logger::log_warning(&format!("Incorrect password submitted for {path}"));
                http::build_login_response(
                    StatusCode::UNAUTHORIZED,
                    login_page::render(Some(login_page::INCORRECT_PASSWORD)),
                )
            }
        }
    }

    /// Delegate to the file server; any failure becomes a plain 404
    async fn serve_file(&self, path: &ResolvedPath, parts: &Parts) -> Response<Full<Bytes>> {
        let file_path = self.site.file_path(path);
        match self.files.serve(&file_path, parts).await {
            Ok(resp) => resp,
            Err(e @ ServeError::NotFound(_)) => {
                logger::log_info(&format!("[404] {e}"));
                http::build_404_response()
            }
            Err(e) => {
                logger::log_error(&e.to_string());
                http::build_404_response()
            }
        }
    }
}

/// Reject oversized form bodies before reading them
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let size = headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()?;

    if size > max_body_size {
        logger::log_warning(&format!(
            "Request body too large: {size} bytes (max: {max_body_size})"
        ));
        return Some(http::build_413_response());
    }
    None
}
