use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{AppError, Result};
use crate::models::{SubmissionRecord, Table};
use crate::persistence::SubmissionStore;

/// Inserts rows through a hosted database's REST table interface
/// (`POST {base}/rest/v1/{table}`).
#[derive(Clone)]
pub struct HostedTableStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HostedTableStore {
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

    pub fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.as_str())
    }
}

#[async_trait]
impl SubmissionStore for HostedTableStore {
    async fn insert(&self, table: Table, record: &SubmissionRecord) -> Result<()> {
        let url = self.table_url(table);
        debug!("Inserting into {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!("Hosted insert into {} failed ({}): {}", table, status, body);
        Err(AppError::Upstream(format!(
            "insert into {} returned {}",
            table,
            status.as_u16()
        )))
    }

    fn name(&self) -> &'static str {
        "hosted"
    }
}
