//! Error response normalization middleware
//!
//! Framework-level rejections (unknown method, unknown route) come back as
//! empty or text/plain bodies. This rewrites them into the same
//! `{"error": "..."}` JSON shape the handlers use.

use crate::error::ErrorResponse;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Middleware that normalizes all non-JSON error responses.
pub async fn normalize_error_response(request: Request<Body>, next: Next) -> Response {
    let response = next.run(request).await;

    let status = response.status();

    // Only process error responses (4xx and 5xx)
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") {
        // Already JSON from our AppError handler
        return response;
    }

    generic_error_response(status)
}

/// Fallback for unknown routes
pub async fn not_found() -> Response {
    generic_error_response(StatusCode::NOT_FOUND)
}

fn generic_error_response(status: StatusCode) -> Response {
    let message = match status {
        StatusCode::BAD_REQUEST => "Invalid request body",
        StatusCode::NOT_FOUND => "Not found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        StatusCode::PAYLOAD_TOO_LARGE => "Request body too large",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported content type",
        _ if status.is_client_error() => "Client error",
        _ => "Internal server error",
    };

    (status, Json(ErrorResponse::new(message))).into_response()
}
