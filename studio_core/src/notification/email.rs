//! Brief confirmation email: template and mail API client

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::EmailConfig;
use crate::error::{AppError, Result};
use crate::models::ServiceRequestRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;

    fn name(&self) -> &'static str;
}

pub fn compose_brief_email(from: &str, record: &ServiceRequestRecord) -> OutgoingEmail {
    let client_name = escape_html(&record.client_name);

    let html = format!(
        r##"
        <div style="background-color: #EAE8E4; padding: 60px; font-family: serif; color: #1a1a1a;">
          <h1 style="border-bottom: 1px solid #1a1a1a; padding-bottom: 20px;">J&amp;E Maison</h1>
          <p style="font-size: 24px; font-style: italic;">Thank you for your Project Brief, {client_name}.</p>
          <p style="font-family: monospace; font-size: 12px; margin-bottom: 40px;">STATUS: RECEIVED // UNDER_REVIEW</p>
          <p>Expect a detailed response within 2-3 business days.</p>
        </div>
      "##
    );

    OutgoingEmail {
        from: from.to_string(),
        to: record.email.clone(),
        subject: format!("Project Brief Received - {}", record.client_name),
        html,
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Mail API client (`POST {base}/emails`, bearer key).
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(base_url: &str, api_key: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| AppError::Other(anyhow::anyhow!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &EmailConfig) -> Result<Option<Self>> {
        if config.api_key.is_empty() {
            return Ok(None);
        }
        Self::new(&config.api_base_url, &config.api_key, config.timeout_seconds).map(Some)
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        debug!("Sending '{}' to {}", email.subject, email.to);

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!("Mail API rejected message ({}): {}", status, body);
        Err(AppError::Mail(format!("mail API returned {}", status.as_u16())))
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(client_name: &str) -> ServiceRequestRecord {
        ServiceRequestRecord {
            client_name: client_name.to_string(),
            email: "oren@example.com".to_string(),
            company_url: String::new(),
            service_type: "Branding".to_string(),
            budget_bracket: "$10,000".to_string(),
            timeline: String::new(),
            aesthetic_vibe: String::new(),
            project_goal: "Relaunch".to_string(),
        }
    }

    #[test]
    fn test_compose_brief_email() {
        let email = compose_brief_email("Studio <studio@example.com>", &record("Oren Vale"));

        assert_eq!(email.from, "Studio <studio@example.com>");
        assert_eq!(email.to, "oren@example.com");
        assert_eq!(email.subject, "Project Brief Received - Oren Vale");
        assert!(email.html.contains("Thank you for your Project Brief, Oren Vale."));
        assert!(email.html.contains("STATUS: RECEIVED // UNDER_REVIEW"));
    }

    #[test]
    fn test_client_name_is_escaped_in_html() {
        let email = compose_brief_email("studio@example.com", &record("<b>Oren</b>"));
        assert!(email.html.contains("&lt;b&gt;Oren&lt;/b&gt;"));
        assert!(!email.html.contains("<b>Oren</b>"));
    }

    #[test]
    fn test_missing_api_key_disables_mailer() {
        let config = EmailConfig::default();
        assert!(ResendMailer::from_config(&config).unwrap().is_none());
    }
}
