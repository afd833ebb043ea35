//! Notification preference repository.

use sqlx::PgPool;

use notify_core::error::{AppError, ErrorKind};
use notify_core::result::AppResult;
use notify_entity::preference::NotificationPreferences;

/// Repository for per-account preference rows.
///
/// Rows store the full flag struct as JSONB. Absent and unparsable rows
/// both decode to defaults so a corrupt blob never breaks the pipeline.
#[derive(Debug, Clone)]
pub struct PreferenceRepository {
    pool: PgPool,
}

impl PreferenceRepository {
    /// Create a new preference repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load preferences for an account, defaulting when absent.
    pub async fn get(&self, account: &str) -> AppResult<NotificationPreferences> {
        let row: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT preferences FROM notification_preferences WHERE account = $1",
        )
        .bind(account)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to get preferences", e))?;

        Ok(row
            .map(|v| NotificationPreferences::from_value(&v))
            .unwrap_or_default())
    }

    /// Persist the full preference struct for an account.
    pub async fn upsert(
        &self,
        account: &str,
        preferences: &NotificationPreferences,
    ) -> AppResult<()> {
        let value = serde_json::to_value(preferences)?;
        sqlx::query(
            "INSERT INTO notification_preferences (account, preferences, updated_at) \
             VALUES ($1, $2, NOW()) \
             ON CONFLICT (account) DO UPDATE SET preferences = $2, updated_at = NOW()",
        )
        .bind(account)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert preferences", e)
        })?;
        Ok(())
    }
}
