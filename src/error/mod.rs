//! Unified error handling for Forms Mailer

use crate::email::EmailProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field was absent or empty; nothing was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The mail transport rejected a send. `message` is what the caller
    /// sees; `source` only reaches the logs.
    #[error("{message}: {source}")]
    Delivery {
        message: String,
        #[source]
        source: EmailProviderError,
    },
}

impl AppError {
    pub fn delivery(message: impl Into<String>, source: EmailProviderError) -> Self {
        Self::Delivery {
            message: message.into(),
            source,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Delivery { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
