//! HTTP protocol layer module
//!
//! Response builders, content types, the login page and form parsing.
//! Nothing in here knows about routing decisions.

pub mod form;
pub mod login_page;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use form::{read_password, FormError};
pub use response::{
    build_404_response, build_413_response, build_diagnostic_response, build_file_response,
    build_login_response, DIAGNOSTIC_BODY, NOT_FOUND_BODY,
};
