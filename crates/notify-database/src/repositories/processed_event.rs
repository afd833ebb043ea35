//! Processed-event (dedup key) repository.

use async_trait::async_trait;
use sqlx::PgPool;

use notify_core::error::{AppError, ErrorKind};
use notify_core::result::AppResult;
use notify_core::traits::store::DedupStore;

/// Durable set of consumed dedup keys, one row per (account, key).
#[derive(Debug, Clone)]
pub struct ProcessedEventRepository {
    pool: PgPool,
}

impl ProcessedEventRepository {
    /// Create a new processed-event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DedupStore for ProcessedEventRepository {
    async fn has(&self, account: &str, key: &str) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM processed_events WHERE account = $1 AND event_key = $2)",
        )
        .bind(account)
        .bind(key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check dedup key", e))
    }

    async fn add(&self, account: &str, key: &str) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO processed_events (account, event_key) VALUES ($1, $2) \
             ON CONFLICT (account, event_key) DO NOTHING",
        )
        .bind(account)
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add dedup key", e))?;
        Ok(())
    }

    async fn reset(&self, account: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM processed_events WHERE account = $1")
            .bind(account)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to reset dedup keys", e)
            })?;
        Ok(result.rows_affected())
    }
}
