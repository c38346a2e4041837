//! Routing module
//!
//! Turns a raw request path into a normalized public path and classifies it:
//! - Percent-decoding and root rewriting to the index page
//! - Lexical normalization of `.` and `..` segments
//! - Exact-match classification into diagnostic, protected or static routes

mod matcher;
mod path;

pub use matcher::{match_route, RouteKind};
pub use path::{resolve, PathError, ResolvedPath, INDEX_PATH};
