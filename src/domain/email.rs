//! Email transport domain types

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmtpSecurity {
    /// Implicit TLS from the first byte (typically port 465)
    #[default]
    Tls,
    /// Plain connection upgraded with STARTTLS (typically port 587)
    StartTls,
    /// Unencrypted, for local relays and mail catchers only
    Plain,
}

#[derive(Debug, Error)]
#[error("unknown SMTP security mode '{0}', expected tls, starttls or none")]
pub struct UnknownSmtpSecurity(String);

impl FromStr for SmtpSecurity {
    type Err = UnknownSmtpSecurity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tls" | "ssl" => Ok(Self::Tls),
            "starttls" => Ok(Self::StartTls),
            "none" | "plain" => Ok(Self::Plain),
            other => Err(UnknownSmtpSecurity(other.to_string())),
        }
    }
}

/// SMTP configuration for email sending
#[derive(Clone, PartialEq)]
pub struct SmtpConfig {
    /// SMTP server host
    pub host: String,

    /// SMTP server port (465 for implicit TLS, 587 for STARTTLS)
    pub port: u16,

    /// Username for authentication
    pub username: String,

    /// Password for authentication, never printed
    pub password: String,

    pub security: SmtpSecurity,

    /// Transport-level timeout for a single send
    pub timeout_secs: u64,

    /// Mailbox the messages are sent from
    pub from_email: String,

    /// Display name shown as the sender
    pub from_name: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("security", &self.security)
            .field("timeout_secs", &self.timeout_secs)
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .finish()
    }
}

/// Recipient address, exactly as submitted
#[derive(Debug, Clone, PartialEq)]
pub struct EmailAddress {
    pub email: String,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Email message to be sent
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: Vec<EmailAddress>,
    pub subject: String,
    pub html_body: String,
    pub text_body: Option<String>,
}

impl EmailMessage {
    pub fn new(to: EmailAddress, subject: impl Into<String>, html_body: impl Into<String>) -> Self {
        Self {
            to: vec![to],
            subject: subject.into(),
            html_body: html_body.into(),
            text_body: None,
        }
    }

    pub fn with_text_body(mut self, text_body: impl Into<String>) -> Self {
        self.text_body = Some(text_body.into());
        self
    }
}

/// Result of sending an email
#[derive(Debug)]
pub struct EmailSendResult {
    pub message_id: Option<String>,
}

impl EmailSendResult {
    pub fn new(message_id: Option<String>) -> Self {
        Self { message_id }
    }
}
