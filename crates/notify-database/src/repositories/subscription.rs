//! Push subscription repository.

use sqlx::PgPool;

use notify_core::error::{AppError, ErrorKind};
use notify_core::result::AppResult;
use notify_entity::subscription::PushSubscription;

/// Repository for registered push endpoints.
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    /// Create a new subscription repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register or re-assign a push endpoint. An endpoint belongs to one
    /// account at a time, so subscribing an existing endpoint under a new
    /// account takes it over.
    pub async fn upsert(&self, subscription: &PushSubscription) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO push_subscriptions (endpoint, account, p256dh, auth, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (endpoint) DO UPDATE \
             SET account = $2, p256dh = $3, auth = $4, created_at = $5",
        )
        .bind(&subscription.endpoint)
        .bind(&subscription.account)
        .bind(&subscription.p256dh)
        .bind(&subscription.auth)
        .bind(subscription.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert subscription", e)
        })?;
        Ok(())
    }

    /// List subscriptions for an account.
    pub async fn find_by_account(&self, account: &str) -> AppResult<Vec<PushSubscription>> {
        sqlx::query_as::<_, PushSubscription>(
            "SELECT * FROM push_subscriptions WHERE account = $1",
        )
        .bind(account)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list subscriptions", e)
        })
    }

    /// List every registered subscription (reconciliation sweep).
    pub async fn find_all(&self) -> AppResult<Vec<PushSubscription>> {
        sqlx::query_as::<_, PushSubscription>("SELECT * FROM push_subscriptions")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list subscriptions", e)
            })
    }

    /// Remove one endpoint. Returns `false` if it was not registered.
    pub async fn delete_endpoint(&self, endpoint: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM push_subscriptions WHERE endpoint = $1")
            .bind(endpoint)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete subscription", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every subscription for an account. Returns the number removed.
    pub async fn delete_by_account(&self, account: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM push_subscriptions WHERE account = $1")
            .bind(account)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete subscriptions", e)
            })?;
        Ok(result.rows_affected())
    }
}
