use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub persistence: PersistenceConfig,
    pub notification: NotificationConfig,
    pub email: EmailConfig,
    pub budget: BudgetConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceBackend {
    Hosted,
    Sqlite,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    pub backend: PersistenceBackend,
    /// Base URL of the hosted database project, e.g. `https://xyz.supabase.co`.
    pub hosted_url: String,
    pub hosted_key: String,
    pub sqlite_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Full URL of the brief-email endpoint. Empty disables notifications.
    pub endpoint_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub from: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: PersistenceBackend::Hosted,
            hosted_url: String::new(),
            hosted_key: String::new(),
            sqlite_url: "sqlite:./submissions.db".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            endpoint_url: "http://127.0.0.1:3000/api/send-brief-email".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: "https://api.resend.com".to_string(),
            from: "J&E Maison <studio@example.com>".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            min: 5_000,
            max: 100_000,
            step: 1_000,
            default: 10_000,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        self.budget.validate()?;

        if self.email.from.trim().is_empty() {
            return Err(ConfigError::Message(
                "Email sender identity cannot be empty".to_string(),
            ));
        }

        if self.persistence.backend == PersistenceBackend::Sqlite
            && self.persistence.sqlite_url.is_empty()
        {
            return Err(ConfigError::Message(
                "SQLite URL cannot be empty when the sqlite backend is selected".to_string(),
            ));
        }

        if self.persistence.backend == PersistenceBackend::Hosted
            && (self.persistence.hosted_url.is_empty() || self.persistence.hosted_key.is_empty())
        {
            tracing::warn!("Hosted database credentials missing - submissions run in demo mode");
        }

        if self.email.api_key.is_empty() {
            tracing::warn!("Mail API key missing - brief emails will be rejected");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl BudgetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::Message("Budget step must be greater than 0".to_string()));
        }

        if self.min >= self.max {
            return Err(ConfigError::Message(
                "Budget minimum must be below the maximum".to_string(),
            ));
        }

        if (self.max - self.min) % self.step != 0 {
            return Err(ConfigError::Message(
                "Budget range must be a whole number of steps".to_string(),
            ));
        }

        if self.default < self.min
            || self.default > self.max
            || (self.default - self.min) % self.step != 0
        {
            return Err(ConfigError::Message(
                "Budget default must sit on the slider grid".to_string(),
            ));
        }

        Ok(())
    }
}
