//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::email::{EmailProvider, SmtpEmailProvider};
use crate::middleware::{normalize_error_response, not_found};
use crate::service::SubmissionService;
use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub submission_service: Arc<SubmissionService>,
}

impl AppState {
    /// Wire the state around an arbitrary email provider
    pub fn new(config: &Config, provider: Arc<dyn EmailProvider>) -> Self {
        Self {
            submission_service: Arc::new(SubmissionService::new(config, provider)),
        }
    }
}

pub async fn run(config: Config) -> Result<()> {
    let provider = SmtpEmailProvider::from_config(&config.smtp)
        .context("Failed to create SMTP provider")?;
    info!(
        "Using SMTP relay {}:{} ({:?})",
        config.smtp.host, config.smtp.port, config.smtp.security
    );

    let http_addr = config.http_addr();
    let state = AppState::new(&config, Arc::new(provider));

    // An unreachable relay is reported but does not prevent startup
    match state.submission_service.check_transport().await {
        Ok(()) => info!("SMTP relay reachable"),
        Err(e) => warn!("SMTP relay check failed: {}", e),
    }

    let app = build_router(state);

    let listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("Failed to bind {}", http_addr))?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(api::health::health))
        .route("/api/contact", post(api::contact::submit))
        .route("/api/newsletter", post(api::newsletter::subscribe))
        .fallback(not_found)
        // Add middleware
        .layer(middleware::from_fn(normalize_error_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
