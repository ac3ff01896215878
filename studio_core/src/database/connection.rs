use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{error, info};

use crate::error::{AppError, Result};

/// Opens the local submissions database, creating the file on first use.
pub async fn get_database_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening submissions database: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::Database(format!("Invalid SQLite URL {}: {}", database_url, e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to open submissions database: {}", e);
            AppError::from(e)
        })?;

    Ok(pool)
}
