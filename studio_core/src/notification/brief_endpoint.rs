use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::request::ErrorResponse;
use crate::models::{MessageResponse, ServiceRequestRecord};
use crate::notification::Notifier;

/// Posts the service request to the brief-email endpoint.
#[derive(Clone)]
pub struct BriefEndpointNotifier {
    client: reqwest::Client,
    endpoint_url: String,
}

impl BriefEndpointNotifier {
    pub fn new(endpoint_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| AppError::Other(anyhow::anyhow!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint_url: endpoint_url.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for BriefEndpointNotifier {
    async fn notify(&self, record: &ServiceRequestRecord) -> Result<MessageResponse> {
        debug!("Posting brief for {} to {}", record.client_name, self.endpoint_url);

        let response = self
            .client
            .post(&self.endpoint_url)
            .json(record)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::OK {
            let message: MessageResponse = serde_json::from_str(&body)?;
            return Ok(message);
        }

        let detail = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        Err(AppError::Upstream(format!(
            "brief endpoint returned {}: {}",
            status.as_u16(),
            detail
        )))
    }
}
