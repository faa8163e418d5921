//! SMTP email provider implementation using lettre

use super::provider::{EmailProvider, EmailProviderError};
use crate::domain::{EmailAddress, EmailMessage, EmailSendResult, SmtpConfig, SmtpSecurity};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;

/// SMTP-based email provider
pub struct SmtpEmailProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailProvider {
    /// Create a new SMTP provider from configuration
    pub fn from_config(config: &SmtpConfig) -> Result<Self, EmailProviderError> {
        let builder = match config.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| EmailProviderError::InvalidConfiguration(e.to_string()))?,
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                    .map_err(|e| EmailProviderError::InvalidConfiguration(e.to_string()))?
            }
            SmtpSecurity::Plain => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            }
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        // The display name is fixed; the mailbox is the authenticated account
        let address = config.from_email.parse::<Address>().map_err(|e| {
            EmailProviderError::InvalidConfiguration(format!("Invalid from address: {}", e))
        })?;
        let from = Mailbox::new(Some(config.from_name.clone()), address);

        Ok(Self { transport, from })
    }

    fn build_message(&self, message: &EmailMessage) -> Result<Message, EmailProviderError> {
        if message.to.is_empty() {
            return Err(EmailProviderError::InvalidConfiguration(
                "No recipients specified".to_string(),
            ));
        }

        let mut email_builder = Message::builder()
            .from(self.from.clone())
            .subject(&message.subject);

        for addr in &message.to {
            email_builder = email_builder.to(to_mailbox(addr)?);
        }

        // Build body (multipart if text body is provided)
        let email = if let Some(text_body) = &message.text_body {
            email_builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(message.html_body.clone()),
                    ),
            )
        } else {
            email_builder
                .header(ContentType::TEXT_HTML)
                .body(message.html_body.clone())
        };

        email.map_err(|e| EmailProviderError::SendFailed(e.to_string()))
    }
}

fn to_mailbox(addr: &EmailAddress) -> Result<Mailbox, EmailProviderError> {
    let address = addr.email.trim().parse::<Address>().map_err(|e| {
        EmailProviderError::SendFailed(format!("Invalid recipient address '{}': {}", addr.email, e))
    })?;
    Ok(Mailbox::new(None, address))
}

fn classify(error_msg: String) -> EmailProviderError {
    let lowered = error_msg.to_lowercase();
    if lowered.contains("authentication") || error_msg.contains("AUTH") {
        EmailProviderError::AuthenticationFailed(error_msg)
    } else if lowered.contains("connection") || lowered.contains("timed out") {
        EmailProviderError::ConnectionError(error_msg)
    } else {
        EmailProviderError::SendFailed(error_msg)
    }
}

#[async_trait]
impl EmailProvider for SmtpEmailProvider {
    async fn send(&self, message: &EmailMessage) -> Result<EmailSendResult, EmailProviderError> {
        let email = self.build_message(message)?;

        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| classify(e.to_string()))?;

        let message_id = response.message().next().map(|s| s.to_string());
        Ok(EmailSendResult::new(message_id))
    }

    async fn test_connection(&self) -> Result<(), EmailProviderError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(EmailProviderError::ConnectionError(
                "SMTP server did not accept the connection".to_string(),
            )),
            Err(e) => Err(match classify(e.to_string()) {
                EmailProviderError::SendFailed(msg) => EmailProviderError::ConnectionError(msg),
                other => other,
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "smtp"
    }
}
