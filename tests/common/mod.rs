//! Shared helpers for HTTP integration tests
//!
//! Tests drive the production `build_router()` in-process with
//! `tower::ServiceExt::oneshot` and a recording email provider, so no SMTP
//! server or network is involved.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use forms_mailer::config::{BrandingConfig, Config, TelemetryConfig};
use forms_mailer::domain::{EmailMessage, EmailSendResult, SmtpConfig, SmtpSecurity};
use forms_mailer::email::{EmailProvider, EmailProviderError};
use forms_mailer::server::{build_router, AppState};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.org";

pub fn test_config() -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 3000,
        admin_email: ADMIN_EMAIL.to_string(),
        smtp: SmtpConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: "relief@example.org".to_string(),
            password: "test-password".to_string(),
            security: SmtpSecurity::Plain,
            timeout_secs: 5,
            from_email: "relief@example.org".to_string(),
            from_name: "Trinity Relief Initiative for Returnees and Migrants".to_string(),
        },
        branding: BrandingConfig {
            logo_url: "https://cdn.example.org/logo.png".to_string(),
            organization_name: "Trinity Relief Initiative".to_string(),
        },
        telemetry: TelemetryConfig::default(),
    }
}

/// When the recording provider should reject a send
#[derive(Debug, Clone, Copy)]
pub enum FailureMode {
    Never,
    Always,
    /// Reject the n-th send attempt (0-based), accept the others
    OnAttempt(usize),
}

/// Email provider that records every attempted send
pub struct RecordingEmailProvider {
    failure: FailureMode,
    attempts: Mutex<Vec<EmailMessage>>,
}

impl RecordingEmailProvider {
    pub fn new(failure: FailureMode) -> Self {
        Self {
            failure,
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Every message handed to `send`, in call order, accepted or not
    pub fn attempts(&self) -> Vec<EmailMessage> {
        self.attempts.lock().unwrap().clone()
    }

    /// Recipient address of each attempt, in call order
    pub fn recipients(&self) -> Vec<String> {
        self.attempts()
            .iter()
            .map(|m| m.to[0].email.clone())
            .collect()
    }
}

#[async_trait]
impl EmailProvider for RecordingEmailProvider {
    async fn send(&self, message: &EmailMessage) -> Result<EmailSendResult, EmailProviderError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(message.clone());
            attempts.len() - 1
        };

        let fail = match self.failure {
            FailureMode::Never => false,
            FailureMode::Always => true,
            FailureMode::OnAttempt(n) => n == attempt,
        };

        if fail {
            Err(EmailProviderError::ConnectionError(
                "connection refused by test relay".to_string(),
            ))
        } else {
            Ok(EmailSendResult::new(Some(format!("test-{}", attempt))))
        }
    }

    async fn test_connection(&self) -> Result<(), EmailProviderError> {
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

pub struct TestApp {
    pub router: Router,
    pub provider: Arc<RecordingEmailProvider>,
}

impl TestApp {
    pub fn new(failure: FailureMode) -> Self {
        let provider = Arc::new(RecordingEmailProvider::new(failure));
        let state = AppState::new(&test_config(), provider.clone());
        Self {
            router: build_router(state),
            provider,
        }
    }

    pub fn healthy() -> Self {
        Self::new(FailureMode::Never)
    }

    /// POST a JSON body and parse the JSON response
    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap();

        self.send(request).await
    }

    /// Send an arbitrary request and parse the JSON response
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();

        if body_bytes.is_empty() {
            return (status, serde_json::Value::Null);
        }

        let body = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }
}
