//! Newsletter subscription handler

use crate::api::{object_payload, MessageResponse};
use crate::domain::NewsletterSubscription;
use crate::error::AppError;
use crate::server::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use validator::Validate;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const SUBSCRIBE_FAILED: &str = "Failed to subscribe to newsletter";
pub const SUBSCRIBED: &str = "Successfully subscribed to newsletter";

/// Subscribe an address to the newsletter
///
/// No subscriber list is kept: every call sends a welcome email and an admin
/// notification, including for addresses seen before.
pub async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let subscription: NewsletterSubscription = object_payload(payload).map_err(|reason| {
        tracing::debug!("Rejected newsletter payload: {}", reason);
        AppError::Validation(EMAIL_REQUIRED.to_string())
    })?;

    subscription
        .validate()
        .map_err(|_| AppError::Validation(EMAIL_REQUIRED.to_string()))?;

    state
        .submission_service
        .subscribe_newsletter(&subscription)
        .await
        .map_err(|e| AppError::delivery(SUBSCRIBE_FAILED, e))?;

    Ok(Json(MessageResponse::new(SUBSCRIBED)))
}
