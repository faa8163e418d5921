//! Domain models for Forms Mailer

pub mod email;
pub mod submission;

pub use email::*;
pub use submission::*;
