//! Notification preference management.

use std::sync::Arc;

use tracing::info;

use notify_core::result::AppResult;
use notify_entity::preference::NotificationPreferences;

use crate::store::PreferenceStore;

/// Manages per-account preference flags.
#[derive(Debug)]
pub struct PreferenceService {
    /// Preference store.
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceService {
    /// Creates a new preference service.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Gets preferences, defaulted when the account has never saved any.
    pub async fn get(&self, account: &str) -> AppResult<NotificationPreferences> {
        self.store.get(account).await
    }

    /// Applies a partial update with merge semantics and persists the
    /// result synchronously. Returns the merged flags.
    pub async fn update(
        &self,
        account: &str,
        patch: &serde_json::Value,
    ) -> AppResult<NotificationPreferences> {
        let current = self.store.get(account).await?;
        let merged = current.merge(patch)?;
        self.store.put(account, &merged).await?;
        info!(account, "Notification preferences updated");
        Ok(merged)
    }
}
