//! HTTP middleware

pub mod error_response;

pub use error_response::{normalize_error_response, not_found};
