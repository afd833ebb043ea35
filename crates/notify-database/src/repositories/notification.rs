//! Notification repository implementation.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use notify_core::error::{AppError, ErrorKind};
use notify_core::result::AppResult;
use notify_core::types::pagination::{PageRequest, PageResponse};
use notify_entity::notification::action::NotificationAction;
use notify_entity::notification::model::Notification;

/// Repository for the per-account notification inbox.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a notification.
    pub async fn create(&self, notification: &Notification) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO notifications (id, account, title, message, notification_type, priority, read, timestamp, action, data) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(notification.id)
        .bind(&notification.account)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.notification_type)
        .bind(&notification.priority)
        .bind(notification.read)
        .bind(notification.timestamp)
        .bind(&notification.action)
        .bind(&notification.data)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })?;
        Ok(())
    }

    /// List notifications for an account, newest first.
    pub async fn find_by_account(
        &self,
        account: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE account = $1")
                .bind(account)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
                })?;

        let notifs = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE account = $1 \
             ORDER BY timestamp DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(account)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            notifs,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count unread notifications for an account.
    pub async fn count_unread(&self, account: &str) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE account = $1 AND read = FALSE",
        )
        .bind(account)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Mark a notification as read. Returns `false` if no such record.
    pub async fn mark_read(&self, account: &str, id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1 AND account = $2")
                .bind(id)
                .bind(account)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to mark read", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark every notification as read for an account.
    pub async fn mark_all_read(&self, account: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE account = $1 AND read = FALSE",
        )
        .bind(account)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    /// Remove one notification. Returns `false` if no such record.
    pub async fn delete(&self, account: &str, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND account = $2")
            .bind(id)
            .bind(account)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every notification for an account.
    pub async fn clear(&self, account: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE account = $1")
            .bind(account)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear notifications", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Find records persisted without a click-through action, for the
    /// startup back-fill migration.
    pub async fn find_missing_action(&self, limit: i64) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE action IS NULL ORDER BY id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find actionless records", e)
        })
    }

    /// Set the action on a record only when none is present. The guard in
    /// the WHERE clause keeps the back-fill idempotent even when two
    /// passes race.
    pub async fn set_action_if_absent(
        &self,
        id: Uuid,
        action: &NotificationAction,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE notifications SET action = $2 WHERE id = $1 AND action IS NULL")
                .bind(id)
                .bind(Json(action))
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to back-fill action", e)
                })?;
        Ok(result.rows_affected() > 0)
    }
}
