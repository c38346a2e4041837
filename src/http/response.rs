//! HTTP response building module
//!
//! Builders for every response the server produces itself. Served files go
//! through [`build_file_response`]; everything else is a fixed small body.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};

pub const NOT_FOUND_BODY: &str = "404 Not Found";
pub const DIAGNOSTIC_BODY: &str = "This filepath is totally working, my friend!";

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::PAYLOAD_TOO_LARGE)
        .header(CONTENT_TYPE, "text/plain")
        .body(Full::new(Bytes::from_static(b"413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from_static(b"413 Payload Too Large")))
        })
}

/// Build the canned diagnostic response
pub fn build_diagnostic_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from_static(DIAGNOSTIC_BODY.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("diagnostic", &e);
            Response::new(Full::new(Bytes::from_static(DIAGNOSTIC_BODY.as_bytes())))
        })
}

/// Build a login page response (200 for the form, 401 after a wrong password)
pub fn build_login_response(status: StatusCode, html: String) -> Response<Full<Bytes>> {
    let content_length = html.len();

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/html")
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(Bytes::from(html)))
        .unwrap_or_else(|e| {
            log_build_error("login", &e);
            let mut resp = Response::new(Full::new(Bytes::new()));
            *resp.status_mut() = status;
            resp
        })
}

/// Build a 200 response for a file read from disk
///
/// `HEAD` requests keep the headers, including the real `Content-Length`,
/// but get an empty body.
pub fn build_file_response(
    data: Vec<u8>,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(data) };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_404_has_fixed_body_and_no_headers() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().is_empty());
        assert_eq!(body_string(resp).await, "404 Not Found");
    }

    #[tokio::test]
    async fn test_login_response_is_html() {
        let resp = build_login_response(StatusCode::UNAUTHORIZED, "<p>hi</p>".to_string());
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "9");
    }

    #[tokio::test]
    async fn test_file_response_head_keeps_length() {
        let resp = build_file_response(b"body { }".to_vec(), "text/css", true);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/css");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "8");
        assert_eq!(body_string(resp).await, "");
    }
}
