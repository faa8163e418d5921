//! Business logic services

pub mod submission;

pub use submission::{format_timestamp, SubmissionService};
