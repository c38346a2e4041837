//! Static file serving module
//!
//! The [`FileServer`] trait is the seam between routing decisions and disk
//! access. [`StaticFileServer`] is the production implementation; tests
//! substitute their own.

use async_trait::async_trait;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::request::Parts;
use hyper::{Method, Response};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::http::{self, mime};

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ServeError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Reads a file and turns it into a response
#[async_trait]
pub trait FileServer: Send + Sync {
    /// Serve the file at `path` (already joined under the public directory)
    async fn serve(&self, path: &Path, request: &Parts) -> Result<Response<Full<Bytes>>, ServeError>;
}

/// Serves files straight from disk with a content type inferred from the extension
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticFileServer;

impl StaticFileServer {
    pub const fn new() -> Self {
        Self
    }

    /// Load a regular file and its content type
    pub async fn load(path: &Path) -> Result<(Vec<u8>, &'static str), ServeError> {
        let metadata = fs::metadata(path)
            .await
            .map_err(|e| ServeError::from_io(path, e))?;
        if !metadata.is_file() {
            return Err(ServeError::NotAFile(path.to_path_buf()));
        }

        let content = fs::read(path)
            .await
            .map_err(|e| ServeError::from_io(path, e))?;

        Ok((content, mime::content_type_for(path)))
    }
}

#[async_trait]
impl FileServer for StaticFileServer {
    async fn serve(&self, path: &Path, request: &Parts) -> Result<Response<Full<Bytes>>, ServeError> {
        let (content, content_type) = Self::load(path).await?;
        Ok(http::build_file_response(
            content,
            content_type,
            request.method == Method::HEAD,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
    use hyper::Request;

    fn parts(method: Method) -> Parts {
        let (parts, ()) = Request::builder()
            .method(method)
            .uri("/")
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn test_serves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.css");
        std::fs::write(&path, "body { font-family: Arial, sans-serif; }").unwrap();

        let resp = StaticFileServer::new()
            .serve(&path, &parts(Method::GET))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/css; charset=utf-8");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"body { font-family: Arial, sans-serif; }");
    }

    #[tokio::test]
    async fn test_head_has_empty_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "<h1>hi</h1>").unwrap();

        let resp = StaticFileServer::new()
            .serve(&path, &parts(Method::HEAD))
            .await
            .unwrap();
        assert_eq!(resp.headers()[CONTENT_LENGTH], "11");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = StaticFileServer::load(&dir.path().join("nope.html")).await;
        assert!(matches!(result, Err(ServeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_directory_is_not_served() {
        let dir = tempfile::tempdir().unwrap();
        let result = StaticFileServer::load(dir.path()).await;
        assert!(matches!(result, Err(ServeError::NotAFile(_))));
    }
}
