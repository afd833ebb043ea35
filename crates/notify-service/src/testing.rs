//! In-memory store fakes for isolated tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use notify_core::result::AppResult;
use notify_core::traits::store::DedupStore;
use notify_core::types::pagination::{PageRequest, PageResponse};
use notify_entity::notification::action::NotificationAction;
use notify_entity::notification::model::Notification;
use notify_entity::preference::NotificationPreferences;

use crate::mapper::SyncContext;
use crate::store::{NotificationStore, PreferenceStore};

/// In-memory notification inbox.
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    records: Mutex<Vec<Notification>>,
}

impl MemoryNotificationStore {
    pub fn all(&self) -> Vec<Notification> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn append(&self, notification: &Notification) -> AppResult<()> {
        self.records.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn list(
        &self,
        account: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let mut records: Vec<Notification> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.account == account)
            .cloned()
            .collect();
        records.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));

        let total = records.len() as u64;
        let items = records
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn mark_read(&self, account: &str, id: Uuid) -> AppResult<bool> {
        let mut records = self.records.lock().unwrap();
        for record in records.iter_mut() {
            if record.account == account && record.id == id {
                record.read = true;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn mark_all_read(&self, account: &str) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        let mut count = 0;
        for record in records.iter_mut() {
            if record.account == account && !record.read {
                record.read = true;
                count += 1;
            }
        }
        Ok(count)
    }

    async fn remove(&self, account: &str, id: Uuid) -> AppResult<bool> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|n| !(n.account == account && n.id == id));
        Ok(records.len() < before)
    }

    async fn clear(&self, account: &str) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|n| n.account != account);
        Ok((before - records.len()) as u64)
    }

    async fn unread_count(&self, account: &str) -> AppResult<i64> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.account == account && !n.read)
            .count() as i64)
    }

    async fn find_missing_action(&self, limit: i64) -> AppResult<Vec<Notification>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.action.is_none())
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn set_action_if_absent(
        &self,
        id: Uuid,
        action: &NotificationAction,
    ) -> AppResult<bool> {
        let mut records = self.records.lock().unwrap();
        for record in records.iter_mut() {
            if record.id == id && record.action.is_none() {
                record.action = Some(sqlx::types::Json(action.clone()));
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// In-memory consumed-key set.
#[derive(Debug, Default)]
pub struct MemoryDedupStore {
    keys: Mutex<HashSet<(String, String)>>,
}

impl MemoryDedupStore {
    pub fn len(&self) -> usize {
        self.keys.lock().unwrap().len()
    }
}

#[async_trait]
impl DedupStore for MemoryDedupStore {
    async fn has(&self, account: &str, key: &str) -> AppResult<bool> {
        Ok(self
            .keys
            .lock()
            .unwrap()
            .contains(&(account.to_string(), key.to_string())))
    }

    async fn add(&self, account: &str, key: &str) -> AppResult<()> {
        self.keys
            .lock()
            .unwrap()
            .insert((account.to_string(), key.to_string()));
        Ok(())
    }

    async fn reset(&self, account: &str) -> AppResult<u64> {
        let mut keys = self.keys.lock().unwrap();
        let before = keys.len();
        keys.retain(|(a, _)| a != account);
        Ok((before - keys.len()) as u64)
    }
}

/// In-memory preference rows.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    map: Mutex<HashMap<String, NotificationPreferences>>,
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, account: &str) -> AppResult<NotificationPreferences> {
        Ok(self
            .map
            .lock()
            .unwrap()
            .get(account)
            .cloned()
            .unwrap_or_default())
    }

    async fn put(&self, account: &str, preferences: &NotificationPreferences) -> AppResult<()> {
        self.map
            .lock()
            .unwrap()
            .insert(account.to_string(), preferences.clone());
        Ok(())
    }
}

/// Build a mapper context over fresh in-memory stores.
pub fn context_at(
    prefs: NotificationPreferences,
    now: DateTime<Utc>,
) -> (
    SyncContext,
    Arc<MemoryNotificationStore>,
    Arc<MemoryDedupStore>,
) {
    let notifications = Arc::new(MemoryNotificationStore::default());
    let dedup = Arc::new(MemoryDedupStore::default());
    let ctx = SyncContext {
        account: "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".to_string(),
        now,
        prefs,
        transaction_window_hours: 24,
        notifications: notifications.clone(),
        dedup: dedup.clone(),
    };
    (ctx, notifications, dedup)
}
