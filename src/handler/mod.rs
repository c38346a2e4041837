//! Request handler module
//!
//! Decides what each request gets (diagnostic text, login form, protected
//! file or static file) and delegates disk access to a [`FileServer`].

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{handle_request, Router};
pub use static_files::{FileServer, ServeError, StaticFileServer};
