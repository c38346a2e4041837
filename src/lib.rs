//! pagegate - static file server with a single password-gated page
//!
//! Requests are resolved against a public directory and served as static
//! files. One configured page is protected: `GET` shows a login form and a
//! `POST` with the right password serves the real file.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
