use sqlx::{SqlitePool, Row};
use tracing::{info, error};
use crate::error::{AppError, Result};

pub struct MigrationManager {
    pool: SqlitePool,
}

impl MigrationManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        info!("Starting database migrations");

        self.create_migrations_table().await?;

        let current_version = self.get_current_version().await?;
        info!("Current migration version: {}", current_version);

        let mut applied_count = 0;

        for migration in migrations() {
            if migration.version > current_version {
                info!("Applying migration {}: {}", migration.version, migration.name);
                self.apply_migration(&migration).await?;
                applied_count += 1;
            }
        }

        if applied_count > 0 {
            info!("Applied {} migrations successfully", applied_count);
        } else {
            info!("No new migrations to apply");
        }

        Ok(())
    }

    async fn create_migrations_table(&self) -> Result<()> {
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
        "#)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(())
    }

    pub async fn get_current_version(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COALESCE(MAX(version), 0) as version FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(row.try_get("version").unwrap_or(0))
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        for statement in migration.sql_statements {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!("Failed to execute migration statement: {}", e);
                    AppError::from(e)
                })?;
        }

        sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
            .bind(migration.version)
            .bind(migration.name)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;
        Ok(())
    }
}

struct Migration {
    version: i64,
    name: &'static str,
    sql_statements: &'static [&'static str],
}

fn migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            name: "create_general_inquiries_table",
            sql_statements: &[
                r#"
                CREATE TABLE general_inquiries (
                    id TEXT PRIMARY KEY,
                    full_name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    subject TEXT NOT NULL,
                    message TEXT NOT NULL,
                    created_at TEXT NOT NULL
                )
                "#,
                r#"
                CREATE INDEX idx_general_inquiries_created_at ON general_inquiries(created_at)
                "#,
            ],
        },
        Migration {
            version: 2,
            name: "create_service_requests_table",
            sql_statements: &[
                r#"
                CREATE TABLE service_requests (
                    id TEXT PRIMARY KEY,
                    client_name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    company_url TEXT NOT NULL DEFAULT '',
                    service_type TEXT NOT NULL,
                    budget_bracket TEXT NOT NULL,
                    timeline TEXT NOT NULL DEFAULT '',
                    aesthetic_vibe TEXT NOT NULL DEFAULT '',
                    project_goal TEXT NOT NULL,
                    created_at TEXT NOT NULL
                )
                "#,
                r#"
                CREATE INDEX idx_service_requests_created_at ON service_requests(created_at)
                "#,
            ],
        },
    ]
}

pub async fn run_migrations(pool: SqlitePool) -> Result<()> {
    let migration_manager = MigrationManager::new(pool);
    migration_manager.run_migrations().await
}
