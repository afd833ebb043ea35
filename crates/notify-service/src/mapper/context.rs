//! Shared state threaded through every family processor.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use notify_core::result::AppResult;
use notify_core::traits::store::DedupStore;
use notify_entity::notification::model::Notification;
use notify_entity::preference::NotificationPreferences;

use crate::store::NotificationStore;

/// Everything a family processor needs for one mapper run.
#[derive(Debug, Clone)]
pub struct SyncContext {
    /// The account being synced, lowercase.
    pub account: String,
    /// The instant this run started. All window math uses this, not
    /// wall-clock reads inside the loop, so one run sees one "now".
    pub now: DateTime<Utc>,
    /// The account's preference flags, loaded once per run.
    pub prefs: NotificationPreferences,
    /// Sliding window for transaction events, in hours.
    pub transaction_window_hours: i64,
    /// The notification inbox.
    pub notifications: Arc<dyn NotificationStore>,
    /// The consumed-key set.
    pub dedup: Arc<dyn DedupStore>,
}

impl SyncContext {
    /// Emit one notification under a dedup key.
    ///
    /// Check, insert, consume: the key is persisted immediately after the
    /// record, never batched to the end of the run. There is no suspension
    /// point between the `has` check and the `add` for the same key within
    /// a run; concurrent runs for one account are serialized by the
    /// orchestrator. Returns whether a record was created.
    pub async fn emit(&self, key: &str, notification: Notification) -> AppResult<bool> {
        if self.dedup.has(&self.account, key).await? {
            return Ok(false);
        }

        self.notifications.append(&notification).await?;
        self.dedup.add(&self.account, key).await?;

        debug!(
            account = %self.account,
            key,
            kind = %notification.notification_type,
            "Notification created"
        );
        Ok(true)
    }
}
