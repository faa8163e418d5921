//! Submission service: composes and dispatches the confirmation and
//! notification emails for each form submission.

use crate::config::Config;
use crate::domain::{ContactSubmission, EmailAddress, EmailMessage, NewsletterSubscription};
use crate::email::{EmailProvider, EmailProviderError, EmailTemplate, TemplateEngine};
use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Format a timestamp in long human-readable form, e.g.
/// `Friday, October 16, 2026 at 3:04 PM CEST`.
///
/// `%Z` is the offset's display form: the zone abbreviation for a
/// `chrono_tz::Tz`, a numeric offset such as `+02:00` for `Local`.
pub fn format_timestamp<Z>(at: &DateTime<Z>) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
{
    at.format("%A, %B %-d, %Y at %-I:%M %p %Z").to_string()
}

/// Resolve the host's IANA time zone, if it has one chrono-tz knows
pub fn local_time_zone() -> Option<Tz> {
    let name = iana_time_zone::get_timezone().ok()?;
    name.parse::<Tz>().ok()
}

/// Sends the two emails every submission produces.
///
/// The submitter's email always goes first; the admin notification is only
/// attempted once it has been accepted. A failure of either send is returned
/// as-is and there is no rollback, so a failed admin notification still leaves
/// the submitter's email delivered.
pub struct SubmissionService {
    provider: Arc<dyn EmailProvider>,
    admin: EmailAddress,
    logo_url: String,
    organization_name: String,
    organization_full_name: String,
    time_zone: Option<Tz>,
    clock: Clock,
}

impl SubmissionService {
    pub fn new(config: &Config, provider: Arc<dyn EmailProvider>) -> Self {
        let time_zone = local_time_zone();
        match time_zone {
            Some(tz) => debug!(zone = %tz.name(), "Timestamps use host time zone"),
            None => warn!("Host time zone unknown; timestamps show a numeric offset"),
        }

        Self {
            provider,
            admin: EmailAddress::new(config.admin_email.clone()),
            logo_url: config.branding.logo_url.clone(),
            organization_name: config.branding.organization_name.clone(),
            organization_full_name: config.smtp.from_name.clone(),
            time_zone,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the source of notification timestamps
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Render timestamps in `time_zone`; `None` falls back to the local offset
    pub fn with_time_zone(mut self, time_zone: Option<Tz>) -> Self {
        self.time_zone = time_zone;
        self
    }

    fn submitted_at(&self) -> String {
        let now = (self.clock)();
        match self.time_zone {
            Some(tz) => format_timestamp(&now.with_timezone(&tz)),
            None => format_timestamp(&now.with_timezone(&Local)),
        }
    }

    /// Thank the submitter, then forward the message to the administrator
    pub async fn submit_contact(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), EmailProviderError> {
        let mut engine = self.engine();
        engine
            .set("first_name", submission.first_name.as_str())
            .set("last_name", submission.last_name.as_str())
            .set("email", submission.email.as_str())
            .set_multiline("message", submission.message.as_str());

        self.dispatch(
            &engine,
            EmailAddress::new(submission.email.clone()),
            EmailTemplate::ContactConfirmation,
        )
        .await?;

        engine.set("submitted_at", self.submitted_at());
        self.dispatch(
            &engine,
            self.admin.clone(),
            EmailTemplate::ContactNotification,
        )
        .await?;

        info!(from = %submission.full_name(), "Contact submission delivered");
        Ok(())
    }

    /// Welcome the subscriber, then notify the administrator
    pub async fn subscribe_newsletter(
        &self,
        subscription: &NewsletterSubscription,
    ) -> Result<(), EmailProviderError> {
        let mut engine = self.engine();
        engine.set("email", subscription.email.as_str());

        self.dispatch(
            &engine,
            EmailAddress::new(subscription.email.clone()),
            EmailTemplate::NewsletterWelcome,
        )
        .await?;

        engine.set("submitted_at", self.submitted_at());
        self.dispatch(
            &engine,
            self.admin.clone(),
            EmailTemplate::NewsletterNotification,
        )
        .await?;

        info!(subscriber = %subscription.email, "Newsletter subscription delivered");
        Ok(())
    }

    /// Check that the mail transport is reachable
    pub async fn check_transport(&self) -> Result<(), EmailProviderError> {
        self.provider.test_connection().await
    }

    fn engine(&self) -> TemplateEngine {
        let mut engine = TemplateEngine::new();
        engine
            .set("logo_url", self.logo_url.as_str())
            .set("org_name", self.organization_name.as_str())
            .set("org_full_name", self.organization_full_name.as_str());
        engine
    }

    async fn dispatch(
        &self,
        engine: &TemplateEngine,
        to: EmailAddress,
        template: EmailTemplate,
    ) -> Result<(), EmailProviderError> {
        let rendered = engine.render_template(template);
        debug!(to = %to.email, subject = %rendered.subject, "Sending email");

        let message = EmailMessage::new(to, rendered.subject, rendered.html_body)
            .with_text_body(rendered.text_body);
        let result = self.provider.send(&message).await?;

        debug!(
            provider = self.provider.provider_name(),
            message_id = ?result.message_id,
            "Email accepted"
        );
        Ok(())
    }
}
