//! Login form parsing
//!
//! Extracts the `password` field from a POST body. Both encodings a browser
//! may send are accepted: `application/x-www-form-urlencoded` (plain HTML
//! forms) and `multipart/form-data` (`FormData` from scripts).

use futures_util::stream;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::HeaderMap;
use std::convert::Infallible;
use thiserror::Error;

pub const PASSWORD_FIELD: &str = "password";

#[derive(Debug, Error)]
pub enum FormError {
    #[error("form body exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("failed to read form body: {0}")]
    Body(String),

    #[error("invalid multipart body: {0}")]
    Multipart(#[from] multer::Error),
}

/// Read at most `limit` bytes of `body` and return the submitted password
///
/// `Ok(None)` means the body was readable but had no `password` field.
pub async fn read_password<B>(
    headers: &HeaderMap,
    body: B,
    limit: u64,
) -> Result<Option<String>, FormError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let max = usize::try_from(limit).unwrap_or(usize::MAX);
    let bytes = match Limited::new(body, max).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => return Err(FormError::TooLarge { limit }),
        Err(e) => return Err(FormError::Body(e.to_string())),
    };

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if content_type
        .get(..10)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("multipart/"))
    {
        let boundary = multer::parse_boundary(content_type)?;
        return password_from_multipart(bytes, boundary).await;
    }

    Ok(password_from_urlencoded(&bytes))
}

fn password_from_urlencoded(bytes: &[u8]) -> Option<String> {
    url::form_urlencoded::parse(bytes)
        .find(|(name, _)| name == PASSWORD_FIELD)
        .map(|(_, value)| value.into_owned())
}

async fn password_from_multipart(
    bytes: Bytes,
    boundary: String,
) -> Result<Option<String>, FormError> {
    let body = stream::once(async move { Ok::<Bytes, Infallible>(bytes) });
    let mut multipart = multer::Multipart::new(body, boundary);

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(PASSWORD_FIELD) {
            return Ok(Some(field.text().await?));
        }
    }
    Ok(None)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::header::HeaderValue;

    pub(crate) const BOUNDARY: &str = "----pagegate-test-boundary";

    pub(crate) fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_urlencoded_password() {
        let headers = headers_with("application/x-www-form-urlencoded");
        let body = Full::new(Bytes::from("user=bob&password=open+sesame%21"));
        let password = read_password(&headers, body, 1024).await.unwrap();
        assert_eq!(password.as_deref(), Some("open sesame!"));
    }

    #[tokio::test]
    async fn test_missing_content_type_parses_as_urlencoded() {
        let body = Full::new(Bytes::from("password=abc"));
        let password = read_password(&HeaderMap::new(), body, 1024).await.unwrap();
        assert_eq!(password.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_missing_field() {
        let headers = headers_with("application/x-www-form-urlencoded");
        let body = Full::new(Bytes::from("username=bob"));
        assert_eq!(read_password(&headers, body, 1024).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_multipart_password() {
        let headers = headers_with(&format!("multipart/form-data; boundary={BOUNDARY}"));
        let body = Full::new(Bytes::from(multipart_body(&[
            ("note", "hello"),
            ("password", "s3cret value"),
        ])));
        let password = read_password(&headers, body, 4096).await.unwrap();
        assert_eq!(password.as_deref(), Some("s3cret value"));
    }

    #[tokio::test]
    async fn test_multipart_without_boundary_is_error() {
        let headers = headers_with("multipart/form-data");
        let body = Full::new(Bytes::from("password=abc"));
        assert!(matches!(
            read_password(&headers, body, 1024).await,
            Err(FormError::Multipart(_))
        ));
    }

    #[tokio::test]
    async fn test_body_over_limit() {
        let headers = headers_with("application/x-www-form-urlencoded");
        let body = Full::new(Bytes::from(format!("password={}", "a".repeat(100))));
        assert!(matches!(
            read_password(&headers, body, 16).await,
            Err(FormError::TooLarge { limit: 16 })
        ));
    }
}
