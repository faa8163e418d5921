//! REST API handlers and shared response types

pub mod contact;
pub mod health;
pub mod newsletter;

use axum::{extract::rejection::JsonRejection, Json};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Simple success body: `{"message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Decode a form body that must be a JSON object.
///
/// Arrays and scalars are refused before field extraction; the error is the
/// reason, for logging only.
pub(crate) fn object_payload<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, String> {
    let Json(value) = payload.map_err(|rejection| rejection.body_text())?;
    if !value.is_object() {
        return Err("body is not a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}
