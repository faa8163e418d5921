//! Email template system
//!
//! Templates use `{{variable_name}}` placeholders. HTML bodies are rendered
//! with every substituted value HTML-escaped; subjects and plain-text bodies
//! receive the raw values. Values set with [`TemplateEngine::set_multiline`]
//! additionally have their line breaks turned into `<br>` in HTML.

use std::collections::{HashMap, HashSet};

/// Available email templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    /// Thank-you note sent to the contact form submitter
    ContactConfirmation,
    /// Contact form submission forwarded to the administrator
    ContactNotification,
    /// Welcome note sent to a new newsletter subscriber
    NewsletterWelcome,
    /// New subscriber notice sent to the administrator
    NewsletterNotification,
}

impl EmailTemplate {
    /// Get the subject line for this template
    pub fn subject(&self) -> &'static str {
        match self {
            Self::ContactConfirmation => "Thank you for contacting {{org_name}}",
            Self::ContactNotification => "New Contact Form Submission - {{org_name}}",
            Self::NewsletterWelcome => "Welcome to {{org_name}} Newsletter",
            Self::NewsletterNotification => "New Newsletter Subscription - {{org_name}}",
        }
    }

    /// Get the HTML body template
    pub fn html_body(&self) -> &'static str {
        match self {
            Self::ContactConfirmation => include_str!("contact_confirmation.html"),
            Self::ContactNotification => include_str!("contact_notification.html"),
            Self::NewsletterWelcome => include_str!("newsletter_welcome.html"),
            Self::NewsletterNotification => include_str!("newsletter_notification.html"),
        }
    }

    /// Get the plain text body template
    pub fn text_body(&self) -> &'static str {
        match self {
            Self::ContactConfirmation => CONTACT_CONFIRMATION_TEXT,
            Self::ContactNotification => CONTACT_NOTIFICATION_TEXT,
            Self::NewsletterWelcome => NEWSLETTER_WELCOME_TEXT,
            Self::NewsletterNotification => NEWSLETTER_NOTIFICATION_TEXT,
        }
    }
}

/// Template rendering engine with variable substitution
#[derive(Debug, Default)]
pub struct TemplateEngine {
    variables: HashMap<String, String>,
    multiline: HashSet<String>,
}

impl TemplateEngine {
    /// Create a new template engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Set a free-text variable whose line breaks must survive in HTML
    pub fn set_multiline(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.multiline.insert(key.clone());
        self.set(key, value)
    }

    /// Render a template string, replacing {{variable}} with raw values
    pub fn render(&self, template: &str) -> String {
        self.substitute(template, |_, value| value.to_string())
    }

    /// Render a template string, replacing {{variable}} with HTML-escaped values
    pub fn render_html(&self, template: &str) -> String {
        self.substitute(template, |key, value| {
            let escaped = htmlescape::encode_minimal(value);
            if self.multiline.contains(key) {
                escaped.replace("\r\n", "\n").replace('\n', "<br>")
            } else {
                escaped
            }
        })
    }

    /// Render a complete email template
    pub fn render_template(&self, template: EmailTemplate) -> RenderedEmail {
        RenderedEmail {
            subject: self.render(template.subject()),
            html_body: self.render_html(template.html_body()),
            text_body: self.render(template.text_body()),
        }
    }

    // Single pass over the template, so substituted values are never
    // themselves scanned for placeholders.
    fn substitute<F>(&self, template: &str, encode: F) -> String
    where
        F: Fn(&str, &str) -> String,
    {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            let Some(end) = after_open.find("}}") else {
                rest = &rest[start..];
                break;
            };

            let key = after_open[..end].trim();
            match self.variables.get(key) {
                Some(value) => result.push_str(&encode(key, value.as_str())),
                // Missing variables are left as-is
                None => result.push_str(&rest[start..start + 2 + end + 2]),
            }
            rest = &after_open[end + 2..];
        }

        result.push_str(rest);
        result
    }
}

/// Rendered email with all variables substituted
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

// ============================================================================
// Plain text alternatives
// ============================================================================

const CONTACT_CONFIRMATION_TEXT: &str = r#"Thank You for Contacting {{org_name}}!

Dear {{first_name}} {{last_name}},

We have received your message and will get back to you as soon as possible. At {{org_full_name}}, we are committed to providing support and assistance to those in need.

Best regards,
{{org_name}} Team

This is an automated message, please do not reply."#;

const CONTACT_NOTIFICATION_TEXT: &str = r#"New Contact Form Submission

Name: {{first_name}} {{last_name}}
Email: {{email}}
Submitted: {{submitted_at}}

Message:
{{message}}

This is an automated message from the {{org_name}} contact form."#;

const NEWSLETTER_WELCOME_TEXT: &str = r#"Welcome to {{org_name}} Newsletter!

Thank you for subscribing to our newsletter. You'll now receive our latest updates, news, and information about our initiatives for returnees and migrants directly in your inbox.

Best regards,
{{org_name}} Team

This is an automated message, please do not reply."#;

const NEWSLETTER_NOTIFICATION_TEXT: &str = r#"New Newsletter Subscription

A new user has subscribed to the {{org_name}} newsletter:

Email: {{email}}
Subscribed: {{submitted_at}}

This is an automated message from the {{org_name}} newsletter subscription."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_engine_basic() {
        let mut engine = TemplateEngine::new();
        engine.set("name", "John");

        let result = engine.render("Hello, {{name}}!");
        assert_eq!(result, "Hello, John!");
    }

    #[test]
    fn test_render_html_multiline_breaks() {
        let mut engine = TemplateEngine::new();
        engine
            .set_multiline("message", "line1\nline2\r\n<i>line3</i>")
            .set("email", "a\nb");

        let result = engine.render_html("<p>{{message}}</p><p>{{email}}</p>");
        assert_eq!(
            result,
            "<p>line1<br>line2<br>&lt;i&gt;line3&lt;/i&gt;</p><p>a\nb</p>"
        );
        assert_eq!(engine.render("{{message}}"), "line1\nline2\r\n<i>line3</i>");
    }

    #[test]
    fn test_template_engine_missing_var() {
        let mut engine = TemplateEngine::new();
        engine.set("other", "x");

        let result = engine.render("Hello, {{name}}! {{other}}");
        assert_eq!(result, "Hello, {{name}}! x");
    }

    #[test]
    fn test_template_engine_unclosed_placeholder() {
        let mut engine = TemplateEngine::new();
        engine.set("name", "Alice");

        let result = engine.render("{{name}} and {{broken");
        assert_eq!(result, "Alice and {{broken");
    }

    #[test]
    fn test_template_engine_values_not_rescanned() {
        let mut engine = TemplateEngine::new();
        engine.set("message", "{{secret}}").set("secret", "leaked");

        let result = engine.render("{{message}}");
        assert_eq!(result, "{{secret}}");
    }

    #[test]
    fn test_render_html_escapes_values() {
        let mut engine = TemplateEngine::new();
        engine.set("message", "<script>alert(1)</script> & more");

        let result = engine.render_html("<p>{{message}}</p>");
        assert_eq!(
            result,
            "<p>&lt;script&gt;alert(1)&lt;/script&gt; &amp; more</p>"
        );
    }

    #[test]
    fn test_render_text_keeps_values_raw() {
        let mut engine = TemplateEngine::new();
        engine.set("message", "a < b");

        assert_eq!(engine.render("{{message}}"), "a < b");
    }

    #[test]
    fn test_contact_notification_template() {
        let mut engine = TemplateEngine::new();
        engine
            .set("org_name", "Trinity Relief Initiative")
            .set("logo_url", "https://cdn.example.org/logo.png")
            .set("first_name", "Jane")
            .set("last_name", "Doe")
            .set("email", "jane@example.com")
            .set("message", "<b>Hello</b>")
            .set("submitted_at", "Friday, October 17, 2026 at 3:04 PM +00:00");

        let rendered = engine.render_template(EmailTemplate::ContactNotification);

        assert_eq!(
            rendered.subject,
            "New Contact Form Submission - Trinity Relief Initiative"
        );
        assert!(rendered.html_body.contains("https://cdn.example.org/logo.png"));
        assert!(rendered.html_body.contains("Jane Doe"));
        assert!(rendered.html_body.contains("&lt;b&gt;Hello&lt;/b&gt;"));
        assert!(!rendered.html_body.contains("<b>Hello</b>"));
        assert!(rendered.html_body.contains("Friday, October 17, 2026"));
        assert!(rendered.text_body.contains("<b>Hello</b>"));
        assert!(!rendered.html_body.contains("{{"));
    }

    #[test]
    fn test_email_template_subjects() {
        let mut engine = TemplateEngine::new();
        engine.set("org_name", "Trinity Relief Initiative");

        let subjects: Vec<String> = [
            EmailTemplate::ContactConfirmation,
            EmailTemplate::ContactNotification,
            EmailTemplate::NewsletterWelcome,
            EmailTemplate::NewsletterNotification,
        ]
        .iter()
        .map(|t| engine.render(t.subject()))
        .collect();

        assert_eq!(
            subjects,
            vec![
                "Thank you for contacting Trinity Relief Initiative",
                "New Contact Form Submission - Trinity Relief Initiative",
                "Welcome to Trinity Relief Initiative Newsletter",
                "New Newsletter Subscription - Trinity Relief Initiative",
            ]
        );
    }

    #[test]
    fn test_every_html_template_embeds_logo() {
        for template in [
            EmailTemplate::ContactConfirmation,
            EmailTemplate::ContactNotification,
            EmailTemplate::NewsletterWelcome,
            EmailTemplate::NewsletterNotification,
        ] {
            assert!(template.html_body().contains(r#"<img src="{{logo_url}}""#));
            assert!(template.html_body().starts_with("<!DOCTYPE html>"));
        }
    }
}
