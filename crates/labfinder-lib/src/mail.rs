//! Contact form and sample-report submissions, and their delivery by email.

use std::fmt::Write as _;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Default transactional mail endpoint.
pub const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";

/// Default sender address for outgoing notifications.
pub const DEFAULT_MAIL_FROM: &str = "Lab Finder <noreply@labfinder.example>";

/// Default inbox that receives enquiries.
pub const DEFAULT_MAIL_TO: &str = "sales@labfinder.example";

/// Kind of submission, used for log and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Contact,
    SampleReport,
}

impl SubmissionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionKind::Contact => "contact",
            SubmissionKind::SampleReport => "sample_report",
        }
    }
}

/// Message submitted through the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// Check required fields and email shape.
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require_email(&self.email)?;
        require("message", &self.message)
    }

    /// Render the notification sent to the sales inbox.
    pub fn to_email(&self, config: &MailConfig) -> EmailMessage {
        let subject = match optional(&self.subject) {
            Some(subject) => format!("Contact form: {subject}"),
            None => format!("Contact form: message from {}", self.name.trim()),
        };

        let fields = [
            ("Name", Some(self.name.trim())),
            ("Email", Some(self.email.trim())),
            ("Phone", optional(&self.phone)),
            ("Company", optional(&self.company)),
            ("Subject", optional(&self.subject)),
        ];

        render_message(
            config,
            &self.email,
            subject,
            "New contact enquiry",
            &fields,
            Some(self.message.trim()),
        )
    }
}

/// Request for a sample inspection report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleReportRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

impl SampleReportRequest {
    /// Check required fields and email shape.
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require_email(&self.email)
    }

    /// Render the notification sent to the sales inbox.
    pub fn to_email(&self, config: &MailConfig) -> EmailMessage {
        let subject = match optional(&self.company) {
            Some(company) => format!("Sample report request: {} ({company})", self.name.trim()),
            None => format!("Sample report request: {}", self.name.trim()),
        };

        let fields = [
            ("Name", Some(self.name.trim())),
            ("Email", Some(self.email.trim())),
            ("Company", optional(&self.company)),
            ("Phone", optional(&self.phone)),
            ("Industry", optional(&self.industry)),
        ];

        render_message(
            config,
            &self.email,
            subject,
            "New sample report request",
            &fields,
            None,
        )
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_submission(format!("{field} is required")));
    }
    Ok(())
}

fn require_email(value: &str) -> Result<()> {
    if !is_valid_email(value.trim()) {
        return Err(Error::invalid_submission("email address is not valid"));
    }
    Ok(())
}

fn optional(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Conservative email shape check: exactly one `@`, a non-empty local part,
/// a domain containing a dot with non-empty labels, and no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| !label.is_empty())
}

/// Escape text for inclusion in an HTML body.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn render_message(
    config: &MailConfig,
    reply_to: &str,
    subject: String,
    heading: &str,
    fields: &[(&str, Option<&str>)],
    body: Option<&str>,
) -> EmailMessage {
    let mut html = format!("<h2>{}</h2>\n<table>\n", escape_html(heading));
    let mut text = format!("{heading}\n\n");

    for (label, value) in fields {
        let Some(value) = value else { continue };
        // Writing into a String cannot fail.
        let _ = writeln!(
            html,
            "<tr><th align=\"left\">{}</th><td>{}</td></tr>",
            escape_html(label),
            escape_html(value)
        );
        let _ = writeln!(text, "{label}: {value}");
    }
    html.push_str("</table>\n");

    if let Some(body) = body {
        let _ = writeln!(
            html,
            "<h3>Message</h3>\n<p>{}</p>",
            escape_html(body).replace('\n', "<br>")
        );
        let _ = writeln!(text, "\nMessage:\n{body}");
    }

    EmailMessage {
        from: config.from.clone(),
        to: config.to.clone(),
        reply_to: reply_to.trim().to_string(),
        subject,
        html,
        text,
    }
}

/// Rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Delivery backend for rendered messages.
pub trait Mailer: Send + Sync {
    /// Deliver one message. Blocking.
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Mail delivery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub from: String,
    pub to: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_MAIL_API_URL.to_string(),
            api_key: None,
            from: DEFAULT_MAIL_FROM.to_string(),
            to: DEFAULT_MAIL_TO.to_string(),
        }
    }
}

impl MailConfig {
    /// Build the mailer for this configuration.
    ///
    /// Without an API key messages are only logged.
    pub fn build_mailer(&self) -> Result<Box<dyn Mailer>> {
        match self.api_key.as_deref().filter(|key| !key.is_empty()) {
            Some(key) => Ok(Box::new(HttpMailer::new(&self.api_url, key)?)),
            None => {
                warn!("no mail API key configured; submissions will only be logged");
                Ok(Box::new(LogMailer))
            }
        }
    }
}

/// Payload accepted by the transactional mail provider.
#[derive(Debug, Serialize)]
struct ProviderPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// Mailer that posts messages to an HTTP provider with a bearer key.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpMailer {
    pub fn new(api_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(user_agent())
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl Mailer for HttpMailer {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        let payload = ProviderPayload {
            from: &message.from,
            to: [&message.to],
            reply_to: &message.reply_to,
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::MailDelivery {
                message: format!("provider responded with {status}: {body}"),
            });
        }

        debug!(subject = %message.subject, "mail accepted by provider");
        Ok(())
    }
}

/// Mailer that only logs messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to = %message.to,
            reply_to = %message.reply_to,
            subject = %message.subject,
            "mail delivery skipped; message logged only"
        );
        Ok(())
    }
}

fn user_agent() -> String {
    format!("labfinder-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactSubmission {
        ContactSubmission {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: Some("  ".to_string()),
            company: Some("Rao <Exports>".to_string()),
            subject: None,
            message: "Need a shipment inspected.\nUrgent.".to_string(),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@example."));
    }

    #[test]
    fn contact_requires_fields() {
        assert!(contact().validate().is_ok());

        let mut missing_name = contact();
        missing_name.name = "   ".to_string();
        let err = missing_name.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid submission: name is required");

        let mut missing_message = contact();
        missing_message.message.clear();
        assert!(missing_message.validate().is_err());

        let mut bad_email = contact();
        bad_email.email = "asha.example.com".to_string();
        let err = bad_email.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidSubmission { .. }));
    }

    #[test]
    fn sample_report_requires_name_and_email() {
        let request = SampleReportRequest {
            name: "Kiran".to_string(),
            email: "kiran@example.in".to_string(),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        let missing_email = SampleReportRequest {
            email: String::new(),
            ..request.clone()
        };
        assert!(missing_email.validate().is_err());
    }

    #[test]
    fn contact_email_escapes_html_and_skips_blank_fields() {
        let message = contact().to_email(&MailConfig::default());

        assert_eq!(message.to, DEFAULT_MAIL_TO);
        assert_eq!(message.reply_to, "asha@example.com");
        assert_eq!(message.subject, "Contact form: message from Asha Rao");
        assert!(message.html.contains("Rao &lt;Exports&gt;"));
        assert!(!message.html.contains("<Exports>"));
        assert!(!message.html.contains("Phone"));
        assert!(message.html.contains("Need a shipment inspected.<br>Urgent."));
        assert!(message.text.contains("Company: Rao <Exports>"));
    }

    #[test]
    fn sample_report_subject_mentions_company() {
        let request = SampleReportRequest {
            name: "Kiran".to_string(),
            email: "kiran@example.in".to_string(),
            company: Some("Agro Ltd".to_string()),
            industry: Some("Food".to_string()),
            ..Default::default()
        };
        let message = request.to_email(&MailConfig::default());
        assert_eq!(message.subject, "Sample report request: Kiran (Agro Ltd)");
        assert!(message.text.contains("Industry: Food"));
    }

    #[test]
    fn escape_html_handles_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn log_mailer_always_succeeds() {
        let message = contact().to_email(&MailConfig::default());
        assert!(LogMailer.send(&message).is_ok());
    }

    #[test]
    fn missing_api_key_builds_log_mailer() {
        let mailer = MailConfig::default().build_mailer().expect("builds");
        let message = contact().to_email(&MailConfig::default());
        assert!(mailer.send(&message).is_ok());
    }
}
