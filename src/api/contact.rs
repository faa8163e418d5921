//! Contact form handler

use crate::api::{object_payload, MessageResponse};
use crate::domain::ContactSubmission;
use crate::error::AppError;
use crate::server::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use validator::Validate;

pub const FIELDS_REQUIRED: &str = "All fields are required";
pub const SEND_FAILED: &str = "Failed to send message";
pub const SENT: &str = "Message sent successfully";

/// Accept a contact form submission
///
/// Sends a thank-you email to the submitter, then the submission itself to
/// the administrator.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let submission: ContactSubmission = object_payload(payload).map_err(|reason| {
        tracing::debug!("Rejected contact payload: {}", reason);
        AppError::Validation(FIELDS_REQUIRED.to_string())
    })?;

    submission
        .validate()
        .map_err(|_| AppError::Validation(FIELDS_REQUIRED.to_string()))?;

    state
        .submission_service
        .submit_contact(&submission)
        .await
        .map_err(|e| AppError::delivery(SEND_FAILED, e))?;

    Ok(Json(MessageResponse::new(SENT)))
}
