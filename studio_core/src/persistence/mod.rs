//! Persistence collaborators used by the contact wizard.
//!
//! The wizard never talks to a database directly. It is handed a
//! [`PersistenceClient`], which is either a configured [`SubmissionStore`]
//! or the explicit `Unconfigured` variant that runs the wizard in demo mode.

pub mod hosted;

pub use hosted::HostedTableStore;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{PersistenceBackend, PersistenceConfig};
use crate::database::{get_database_pool, run_migrations, SubmissionRepository};
use crate::error::Result;
use crate::models::{SubmissionRecord, Table};

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert exactly one row into `table`.
    async fn insert(&self, table: Table, record: &SubmissionRecord) -> Result<()>;

    fn name(&self) -> &'static str;
}

#[derive(Clone)]
pub enum PersistenceClient {
    Configured(Arc<dyn SubmissionStore>),
    Unconfigured,
}

impl PersistenceClient {
    pub fn new<S: SubmissionStore + 'static>(store: S) -> Self {
        PersistenceClient::Configured(Arc::new(store))
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, PersistenceClient::Configured(_))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            PersistenceClient::Configured(store) => store.name(),
            PersistenceClient::Unconfigured => "unconfigured",
        }
    }

    pub async fn from_config(config: &PersistenceConfig) -> Result<Self> {
        match config.backend {
            PersistenceBackend::Hosted => {
                if config.hosted_url.is_empty() || config.hosted_key.is_empty() {
                    warn!("Hosted database credentials absent, persistence is unconfigured");
                    return Ok(PersistenceClient::Unconfigured);
                }
                let store = HostedTableStore::new(
                    &config.hosted_url,
                    &config.hosted_key,
                    config.timeout_seconds,
                )?;
                info!("Persistence: hosted tables at {}", config.hosted_url);
                Ok(PersistenceClient::new(store))
            }
            PersistenceBackend::Sqlite => {
                let pool = get_database_pool(&config.sqlite_url).await?;
                run_migrations(pool.clone()).await?;
                info!("Persistence: sqlite at {}", config.sqlite_url);
                Ok(PersistenceClient::new(SubmissionRepository::new(pool)))
            }
            PersistenceBackend::None => {
                info!("Persistence disabled by configuration");
                Ok(PersistenceClient::Unconfigured)
            }
        }
    }
}

impl std::fmt::Debug for PersistenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PersistenceClient")
            .field(&self.backend_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credentials_yield_unconfigured() {
        let config = PersistenceConfig::default();
        let client = PersistenceClient::from_config(&config).await.unwrap();
        assert!(!client.is_configured());
        assert_eq!(client.backend_name(), "unconfigured");
    }

    #[tokio::test]
    async fn test_hosted_credentials_yield_configured() {
        let config = PersistenceConfig {
            hosted_url: "https://studio.example.co".to_string(),
            hosted_key: "anon-key".to_string(),
            ..PersistenceConfig::default()
        };
        let client = PersistenceClient::from_config(&config).await.unwrap();
        assert!(client.is_configured());
        assert_eq!(client.backend_name(), "hosted");
    }

    #[tokio::test]
    async fn test_sqlite_backend_runs_migrations() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        let config = PersistenceConfig {
            backend: PersistenceBackend::Sqlite,
            sqlite_url: format!("sqlite:{}", temp_file.path().display()),
            ..PersistenceConfig::default()
        };
        let client = PersistenceClient::from_config(&config).await.unwrap();
        assert_eq!(client.backend_name(), "sqlite");
    }
}
