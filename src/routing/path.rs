//! Request path resolution
//!
//! Decodes the URL path and normalizes it into a [`ResolvedPath`] that is
//! always rooted at `/` and never climbs above the public directory.

use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Path served for `""` and `/`
pub const INDEX_PATH: &str = "/index.html";

/// Decoded, normalized request path rooted at the public directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(String);

impl ResolvedPath {
    /// Full path including the leading slash, e.g. `/styles/main.css`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path without the leading slash, for joining under the public directory
    pub fn relative(&self) -> &str {
        self.0.trim_start_matches('/')
    }
}

impl std::fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    #[error("path is not valid percent-encoded UTF-8")]
    Malformed,

    #[error("path escapes the public directory")]
    Traversal,
}

/// Resolve a raw (percent-encoded) URL path
///
/// `+` is left untouched, only `%XX` escapes are decoded. Empty and `.`
/// segments are dropped and `..` removes the previous segment; a `..` at
/// the root is rejected rather than clamped.
///
/// # Examples
/// ```
/// use pagegate::routing::{resolve, PathError};
/// assert_eq!(resolve("/").unwrap().as_str(), "/index.html");
/// assert_eq!(resolve("/my%20notes.txt").unwrap().as_str(), "/my notes.txt");
/// assert_eq!(resolve("/%2e%2e/etc/passwd"), Err(PathError::Traversal));
/// ```
pub fn resolve(raw_path: &str) -> Result<ResolvedPath, PathError> {
    let decoded = percent_decode_str(raw_path)
        .decode_utf8()
        .map_err(|_| PathError::Malformed)?;

    if decoded.contains('\0') {
        return Err(PathError::Malformed);
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(PathError::Traversal);
                }
            }
            name => segments.push(name),
        }
    }

    if segments.is_empty() {
        return Ok(ResolvedPath(INDEX_PATH.to_string()));
    }

    Ok(ResolvedPath(format!("/{}", segments.join("/"))))
}
