//! Configuration management for Forms Mailer

use crate::domain::{SmtpConfig, SmtpSecurity};
use anyhow::{Context, Result};
use std::env;

/// Sender display name used when `MAIL_FROM_NAME` is unset
pub const DEFAULT_FROM_NAME: &str = "Trinity Relief Initiative for Returnees and Migrants";

/// Organization name used in subjects and copy when `ORG_NAME` is unset
pub const DEFAULT_ORG_NAME: &str = "Trinity Relief Initiative";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Recipient of every notification email
    pub admin_email: String,
    /// Outbound mail transport
    pub smtp: SmtpConfig,
    /// Static branding embedded in every template
    pub branding: BrandingConfig,
    /// Logging configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct BrandingConfig {
    /// Absolute URL of the logo shown at the top of each email
    pub logo_url: String,
    /// Short organization name used in subjects and body copy
    pub organization_name: String,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "json" for structured logs, anything else for human-readable output
    pub log_format: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// `from_env` is the production entry point; this form lets tests supply
    /// variables without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let required = |key: &str| lookup(key).with_context(|| format!("{} is required", key));

        let username = required("EMAIL_USER")?;

        Ok(Self {
            http_host: var("HTTP_HOST", "0.0.0.0"),
            http_port: var("PORT", "3000").parse().context("Invalid PORT")?,
            admin_email: required("ADMIN_EMAIL")?,
            smtp: SmtpConfig {
                host: var("SMTP_HOST", "smtp.gmail.com"),
                port: var("SMTP_PORT", "465").parse().context("Invalid SMTP_PORT")?,
                password: required("EMAIL_PASS")?,
                security: var("SMTP_SECURITY", "tls")
                    .parse()
                    .context("Invalid SMTP_SECURITY")?,
                timeout_secs: var("SMTP_TIMEOUT_SECS", "30")
                    .parse()
                    .context("Invalid SMTP_TIMEOUT_SECS")?,
                from_email: username.clone(),
                from_name: var("MAIL_FROM_NAME", DEFAULT_FROM_NAME),
                username,
            },
            branding: BrandingConfig {
                logo_url: var("LOGO_URL", ""),
                organization_name: var("ORG_NAME", DEFAULT_ORG_NAME),
            },
            telemetry: TelemetryConfig {
                log_format: var("LOG_FORMAT", "pretty"),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
