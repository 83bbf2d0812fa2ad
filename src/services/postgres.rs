use crate::models::{ContactReveal, Inquiry};
use crate::services::traits::InquiryStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when writing lead and analytics records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL client for inquiries and contact-reveal events
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Connect and run pending migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

#[async_trait]
impl InquiryStore for PostgresClient {
    async fn insert_inquiry(&self, inquiry: &Inquiry) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO city_inquiries (
                id, couple_name, couple_email, couple_message, preferred_type,
                city, state, provider_ids, source, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#;

        sqlx::query(query)
            .bind(inquiry.id)
            .bind(&inquiry.couple_name)
            .bind(&inquiry.couple_email)
            .bind(&inquiry.message)
            .bind(inquiry.preferred_type.as_str())
            .bind(&inquiry.city)
            .bind(&inquiry.state)
            .bind(&inquiry.provider_ids)
            .bind(&inquiry.source)
            .bind(inquiry.status.as_str())
            .bind(inquiry.created_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Stored inquiry {} for {} providers",
            inquiry.id,
            inquiry.provider_ids.len()
        );

        Ok(())
    }

    async fn record_contact_reveal(&self, reveal: &ContactReveal) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO contact_reveals (
                profile_id, reveal_type, session_id, user_agent, city, state_province, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#;

        sqlx::query(query)
            .bind(&reveal.profile_id)
            .bind(reveal.reveal_type.as_str())
            .bind(&reveal.session_id)
            .bind(&reveal.user_agent)
            .bind(&reveal.city)
            .bind(&reveal.state_province)
            .bind(reveal.created_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded {} reveal for profile {}",
            reveal.reveal_type.as_str(),
            reveal.profile_id
        );

        Ok(())
    }

    /// Reveal counts per type for a single profile
    async fn reveal_stats(&self, profile_id: &str) -> Result<RevealStats, StoreError> {
        if profile_id.trim().is_empty() {
            return Err(StoreError::InvalidInput("profile_id is empty".into()));
        }

        let query = r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE reveal_type = 'phone') as phone,
                COUNT(*) FILTER (WHERE reveal_type = 'email') as email,
                COUNT(*) FILTER (WHERE reveal_type = 'website') as website,
                MAX(created_at) as last_revealed_at
            FROM contact_reveals
            WHERE profile_id = $1
        "#;

        let row = sqlx::query(query).bind(profile_id).fetch_one(&self.pool).await?;

        Ok(RevealStats {
            profile_id: profile_id.to_string(),
            total: row.get("total"),
            phone: row.get("phone"),
            email: row.get("email"),
            website: row.get("website"),
            last_revealed_at: row.get("last_revealed_at"),
        })
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Contact reveal counts for a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealStats {
    pub profile_id: String,
    pub total: i64,
    pub phone: i64,
    pub email: i64,
    pub website: i64,
    pub last_revealed_at: Option<chrono::DateTime<chrono::Utc>>,
}
