//! Email sending functionality
//!
//! - `provider`: the transport abstraction handlers depend on
//! - `smtp`: the lettre-backed SMTP implementation
//! - `templates`: the four branded message variants

pub mod provider;
pub mod smtp;
pub mod templates;

pub use provider::{EmailProvider, EmailProviderError};
pub use smtp::SmtpEmailProvider;
pub use templates::{EmailTemplate, RenderedEmail, TemplateEngine};
