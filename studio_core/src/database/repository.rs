use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{InquiryRecord, ServiceRequestRecord, SubmissionRecord, Table};
use crate::persistence::SubmissionStore;

#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredInquiry {
    pub id: Uuid,
    pub record: InquiryRecord,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredServiceRequest {
    pub id: Uuid,
    pub record: ServiceRequestRecord,
    pub created_at: DateTime<Utc>,
}

/// Local SQLite persistence for both submission tables.
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: SqlitePool,
}

impl SubmissionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert_inquiry(&self, record: &InquiryRecord) -> Result<Uuid> {
        let id = Uuid::new_v4();

        sqlx::query(r#"
            INSERT INTO general_inquiries (id, full_name, email, subject, message, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#)
        .bind(id.to_string())
        .bind(&record.full_name)
        .bind(&record.email)
        .bind(&record.subject)
        .bind(&record.message)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(id)
    }

    async fn insert_service_request(&self, record: &ServiceRequestRecord) -> Result<Uuid> {
        let id = Uuid::new_v4();

        sqlx::query(r#"
            INSERT INTO service_requests (
                id, client_name, email, company_url, service_type,
                budget_bracket, timeline, aesthetic_vibe, project_goal, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#)
        .bind(id.to_string())
        .bind(&record.client_name)
        .bind(&record.email)
        .bind(&record.company_url)
        .bind(&record.service_type)
        .bind(&record.budget_bracket)
        .bind(&record.timeline)
        .bind(&record.aesthetic_vibe)
        .bind(&record.project_goal)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(id)
    }

    pub async fn list_inquiries(&self) -> Result<Vec<StoredInquiry>> {
        let rows = sqlx::query(r#"
            SELECT id, full_name, email, subject, message, created_at
            FROM general_inquiries
            ORDER BY created_at ASC
        "#)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        rows.into_iter()
            .map(|row| -> Result<StoredInquiry> {
                Ok(StoredInquiry {
                    id: parse_id(row.try_get("id")?)?,
                    record: InquiryRecord {
                        full_name: row.try_get("full_name")?,
                        email: row.try_get("email")?,
                        subject: row.try_get("subject")?,
                        message: row.try_get("message")?,
                    },
                    created_at: parse_timestamp(row.try_get("created_at")?)?,
                })
            })
            .collect()
    }

    pub async fn list_service_requests(&self) -> Result<Vec<StoredServiceRequest>> {
        let rows = sqlx::query(r#"
            SELECT id, client_name, email, company_url, service_type,
                   budget_bracket, timeline, aesthetic_vibe, project_goal, created_at
            FROM service_requests
            ORDER BY created_at ASC
        "#)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        rows.into_iter()
            .map(|row| -> Result<StoredServiceRequest> {
                Ok(StoredServiceRequest {
                    id: parse_id(row.try_get("id")?)?,
                    record: ServiceRequestRecord {
                        client_name: row.try_get("client_name")?,
                        email: row.try_get("email")?,
                        company_url: row.try_get("company_url")?,
                        service_type: row.try_get("service_type")?,
                        budget_bracket: row.try_get("budget_bracket")?,
                        timeline: row.try_get("timeline")?,
                        aesthetic_vibe: row.try_get("aesthetic_vibe")?,
                        project_goal: row.try_get("project_goal")?,
                    },
                    created_at: parse_timestamp(row.try_get("created_at")?)?,
                })
            })
            .collect()
    }

    pub async fn count(&self, table: Table) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) as count FROM {}", table.as_str());
        let row = sqlx::query(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(row.try_get("count")?)
    }
}

#[async_trait]
impl SubmissionStore for SubmissionRepository {
    async fn insert(&self, table: Table, record: &SubmissionRecord) -> Result<()> {
        if record.table() != table {
            return Err(AppError::BadRequest(format!(
                "{} record cannot be stored in {}",
                record.path(),
                table
            )));
        }

        let id = match record {
            SubmissionRecord::Inquiry(inquiry) => self.insert_inquiry(inquiry).await?,
            SubmissionRecord::ServiceRequest(request) => self.insert_service_request(request).await?,
        };

        debug!(table = %table, id = %id, "Stored submission");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

fn parse_id(raw: String) -> Result<Uuid> {
    Uuid::parse_str(&raw).map_err(|e| AppError::Database(format!("Invalid row id: {}", e)))
}

fn parse_timestamp(raw: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Database(format!("Invalid timestamp: {}", e)))
}
