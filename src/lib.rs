//! Forms Mailer - contact form and newsletter mail relay
//!
//! Accepts contact messages and newsletter subscriptions over HTTP and, for
//! each, mails a confirmation to the submitter and a notification to the
//! configured administrator.

pub mod api;
pub mod config;
pub mod domain;
pub mod email;
pub mod error;
pub mod middleware;
pub mod server;
pub mod service;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
