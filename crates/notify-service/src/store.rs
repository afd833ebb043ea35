//! Store seams consumed by the mapper and services.
//!
//! The concrete implementations live in `notify-database`; the traits are
//! defined here, at the consumer, so the pipeline can run against isolated
//! in-memory instances in tests.

use async_trait::async_trait;
use uuid::Uuid;

use notify_core::result::AppResult;
use notify_core::types::pagination::{PageRequest, PageResponse};
use notify_database::repositories::notification::NotificationRepository;
use notify_database::repositories::preference::PreferenceRepository;
use notify_entity::notification::action::NotificationAction;
use notify_entity::notification::model::Notification;
use notify_entity::preference::NotificationPreferences;

/// Durable, per-account notification inbox.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append a freshly created record.
    async fn append(&self, notification: &Notification) -> AppResult<()>;

    /// List records, newest first.
    async fn list(
        &self,
        account: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Mark one record as read.
    async fn mark_read(&self, account: &str, id: Uuid) -> AppResult<bool>;

    /// Mark every record as read.
    async fn mark_all_read(&self, account: &str) -> AppResult<u64>;

    /// Remove one record.
    async fn remove(&self, account: &str, id: Uuid) -> AppResult<bool>;

    /// Remove every record for an account.
    async fn clear(&self, account: &str) -> AppResult<u64>;

    /// Count unread records.
    async fn unread_count(&self, account: &str) -> AppResult<i64>;

    /// Records persisted without an action (back-fill input).
    async fn find_missing_action(&self, limit: i64) -> AppResult<Vec<Notification>>;

    /// Set an action only where none exists. Returns whether a row changed.
    async fn set_action_if_absent(&self, id: Uuid, action: &NotificationAction)
    -> AppResult<bool>;
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn append(&self, notification: &Notification) -> AppResult<()> {
        self.create(notification).await
    }

    async fn list(
        &self,
        account: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.find_by_account(account, page).await
    }

    async fn mark_read(&self, account: &str, id: Uuid) -> AppResult<bool> {
        NotificationRepository::mark_read(self, account, id).await
    }

    async fn mark_all_read(&self, account: &str) -> AppResult<u64> {
        NotificationRepository::mark_all_read(self, account).await
    }

    async fn remove(&self, account: &str, id: Uuid) -> AppResult<bool> {
        self.delete(account, id).await
    }

    async fn clear(&self, account: &str) -> AppResult<u64> {
        NotificationRepository::clear(self, account).await
    }

    async fn unread_count(&self, account: &str) -> AppResult<i64> {
        self.count_unread(account).await
    }

    async fn find_missing_action(&self, limit: i64) -> AppResult<Vec<Notification>> {
        NotificationRepository::find_missing_action(self, limit).await
    }

    async fn set_action_if_absent(
        &self,
        id: Uuid,
        action: &NotificationAction,
    ) -> AppResult<bool> {
        NotificationRepository::set_action_if_absent(self, id, action).await
    }
}

/// Durable per-account preference flags.
#[async_trait]
pub trait PreferenceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Load preferences, defaulting when absent or corrupt.
    async fn get(&self, account: &str) -> AppResult<NotificationPreferences>;

    /// Persist the full flag struct.
    async fn put(&self, account: &str, preferences: &NotificationPreferences) -> AppResult<()>;
}

#[async_trait]
impl PreferenceStore for PreferenceRepository {
    async fn get(&self, account: &str) -> AppResult<NotificationPreferences> {
        PreferenceRepository::get(self, account).await
    }

    async fn put(&self, account: &str, preferences: &NotificationPreferences) -> AppResult<()> {
        self.upsert(account, preferences).await
    }
}
