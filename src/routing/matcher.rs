//! Route matching module
//!
//! Classifies a resolved path by exact match against the configured
//! diagnostic and protected paths. Order matters: the diagnostic path is
//! checked first so it can never be shadowed.

use super::path::ResolvedPath;
use crate::config::SiteSettings;

/// Which branch of the request router handles a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Canned connectivity check, no file access
    Diagnostic,
    /// Password-gated page
    Protected,
    /// Plain static file lookup
    StaticFile,
}

/// Find the route kind for a resolved path
pub fn match_route(path: &ResolvedPath, site: &SiteSettings) -> RouteKind {
    let path = path.as_str();
    if path == site.diagnostic_path {
        RouteKind::Diagnostic
    } else if path == site.protected_path {
        RouteKind::Protected
    } else {
        RouteKind::StaticFile
    }
}
