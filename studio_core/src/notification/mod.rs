//! Notification collaborators: the brief-email endpoint client used by the
//! wizard, and the mail API client used by the endpoint itself.

pub mod brief_endpoint;
pub mod email;

pub use brief_endpoint::BriefEndpointNotifier;
pub use email::{compose_brief_email, Mailer, OutgoingEmail, ResendMailer};

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::NotificationConfig;
use crate::error::Result;
use crate::models::{MessageResponse, ServiceRequestRecord};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, record: &ServiceRequestRecord) -> Result<MessageResponse>;
}

#[derive(Clone)]
pub enum NotificationClient {
    Configured(Arc<dyn Notifier>),
    Unconfigured,
}

impl NotificationClient {
    pub fn new<N: Notifier + 'static>(notifier: N) -> Self {
        NotificationClient::Configured(Arc::new(notifier))
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, NotificationClient::Configured(_))
    }

    pub fn from_config(config: &NotificationConfig) -> Result<Self> {
        if config.endpoint_url.is_empty() {
            info!("Brief notifications disabled (no endpoint configured)");
            return Ok(NotificationClient::Unconfigured);
        }

        let notifier = BriefEndpointNotifier::new(&config.endpoint_url, config.timeout_seconds)?;
        info!("Brief notifications go to {}", config.endpoint_url);
        Ok(NotificationClient::new(notifier))
    }
}

impl std::fmt::Debug for NotificationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationClient::Configured(_) => f.write_str("NotificationClient::Configured"),
            NotificationClient::Unconfigured => f.write_str("NotificationClient::Unconfigured"),
        }
    }
}
