//! Notification inbox CRUD.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use notify_cache::CacheManager;
use notify_cache::keys;
use notify_core::error::AppError;
use notify_core::result::AppResult;
use notify_core::traits::cache::CacheProvider;
use notify_core::traits::store::DedupStore;
use notify_core::types::pagination::{PageRequest, PageResponse};
use notify_entity::notification::model::Notification;

use crate::store::NotificationStore;

/// Manages an account's notification inbox.
#[derive(Debug)]
pub struct NotificationService {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
    /// Dedup store, exposed for the explicit reset affordance.
    dedup: Arc<dyn DedupStore>,
    /// Cache for unread counts.
    cache: Arc<CacheManager>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        dedup: Arc<dyn DedupStore>,
        cache: Arc<CacheManager>,
    ) -> Self {
        Self {
            store,
            dedup,
            cache,
        }
    }

    /// Lists notifications, newest first.
    pub async fn list(
        &self,
        account: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.store.list(account, page).await
    }

    /// Gets the unread notification count, cached.
    pub async fn unread_count(&self, account: &str) -> AppResult<i64> {
        let key = keys::unread_notification_count(account);

        if let Ok(Some(cached)) = self.cache.get(&key).await
            && let Ok(count) = cached.parse::<i64>()
        {
            return Ok(count);
        }

        let count = self.store.unread_count(account).await?;
        if let Err(e) = self.cache.set_default(&key, &count.to_string()).await {
            warn!(account, error = %e, "Failed to cache unread count");
        }
        Ok(count)
    }

    /// Marks a notification as read.
    pub async fn mark_read(&self, account: &str, id: Uuid) -> AppResult<()> {
        if !self.store.mark_read(account, id).await? {
            return Err(AppError::not_found(format!("Notification {id} not found")));
        }
        self.invalidate_unread(account).await;
        Ok(())
    }

    /// Marks every notification as read. Returns how many changed.
    pub async fn mark_all_read(&self, account: &str) -> AppResult<u64> {
        let count = self.store.mark_all_read(account).await?;
        self.invalidate_unread(account).await;
        Ok(count)
    }

    /// Removes one notification.
    pub async fn remove(&self, account: &str, id: Uuid) -> AppResult<()> {
        if !self.store.remove(account, id).await? {
            return Err(AppError::not_found(format!("Notification {id} not found")));
        }
        self.invalidate_unread(account).await;
        Ok(())
    }

    /// Removes every notification for an account. Returns how many.
    pub async fn clear(&self, account: &str) -> AppResult<u64> {
        let count = self.store.clear(account).await?;
        self.invalidate_unread(account).await;
        Ok(count)
    }

    /// Clears the account's consumed dedup keys. Debug affordance: after
    /// a reset, previously notified events will notify again on the next
    /// sync.
    pub async fn reset_dedup(&self, account: &str) -> AppResult<u64> {
        self.dedup.reset(account).await
    }

    async fn invalidate_unread(&self, account: &str) {
        let key = keys::unread_notification_count(account);
        if let Err(e) = self.cache.delete(&key).await {
            warn!(account, error = %e, "Failed to invalidate unread count");
        }
    }
}
