//! Sync orchestrator — re-runs the mapper whenever upstream collections
//! are re-reported.
//!
//! The orchestrator owns no timers. Cadence belongs to callers: the
//! ingest API invokes it when a poller delivers a fresh snapshot, and the
//! worker re-invokes it over cached snapshots. Redundant invocations with
//! identical inputs are harmless by construction — correctness rests
//! entirely on the mapper's dedup discipline.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use notify_cache::CacheManager;
use notify_cache::keys;
use notify_core::config::SyncConfig;
use notify_core::events::EventSnapshot;
use notify_core::result::AppResult;
use notify_core::traits::cache::CacheProvider;
use notify_core::traits::store::DedupStore;

use crate::mapper::{self, SyncContext, SyncReport};
use crate::store::{NotificationStore, PreferenceStore};

/// Coordinates mapper runs across accounts.
#[derive(Debug)]
pub struct SyncOrchestrator {
    /// The notification inbox.
    notifications: Arc<dyn NotificationStore>,
    /// The consumed-key set.
    dedup: Arc<dyn DedupStore>,
    /// Preference flags.
    preferences: Arc<dyn PreferenceStore>,
    /// Cache for snapshots and unread counts.
    cache: Arc<CacheManager>,
    /// Sync tuning.
    config: SyncConfig,
    /// Per-account run locks. Two runs for one account never interleave,
    /// which keeps the check-then-insert pair for a key a critical
    /// section.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SyncOrchestrator {
    /// Create a new orchestrator.
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        dedup: Arc<dyn DedupStore>,
        preferences: Arc<dyn PreferenceStore>,
        cache: Arc<CacheManager>,
        config: SyncConfig,
    ) -> Self {
        Self {
            notifications,
            dedup,
            preferences,
            cache,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Run the mapper pipeline over a freshly ingested snapshot.
    ///
    /// When the master in-app switch is off the run short-circuits with
    /// no side effects at all — no records, no consumed keys — so a later
    /// re-enable can still notify retroactively.
    pub async fn sync(
        &self,
        account: &str,
        snapshot: &EventSnapshot,
        cancel: &CancellationToken,
    ) -> AppResult<SyncReport> {
        let lock = self.account_lock(account).await;
        let _guard = lock.lock().await;

        let prefs = self.preferences.get(account).await?;
        if !prefs.in_app_enabled {
            return Ok(SyncReport {
                gated: true,
                ..SyncReport::default()
            });
        }

        let ctx = SyncContext {
            account: account.to_string(),
            now: Utc::now(),
            prefs,
            transaction_window_hours: self.config.transaction_window_hours,
            notifications: Arc::clone(&self.notifications),
            dedup: Arc::clone(&self.dedup),
        };

        let report = mapper::run(&ctx, snapshot, cancel).await;

        if report.total() > 0 {
            info!(account, created = report.total(), "Sync created notifications");
            if let Err(e) = self
                .cache
                .delete(&keys::unread_notification_count(account))
                .await
            {
                warn!(account, error = %e, "Failed to invalidate unread count");
            }
        }

        self.cache_snapshot(account, snapshot).await;
        Ok(report)
    }

    /// Re-run the mapper over the last cached snapshot, if any.
    pub async fn resync(
        &self,
        account: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<SyncReport>> {
        let snapshot: Option<EventSnapshot> = self
            .cache
            .provider()
            .get(&keys::event_snapshot(account))
            .await?
            .and_then(|raw| serde_json::from_str(&raw).ok());

        match snapshot {
            Some(snapshot) => Ok(Some(self.sync(account, &snapshot, cancel).await?)),
            None => Ok(None),
        }
    }

    /// Re-run the mapper for every account with a cached snapshot.
    /// Per-account failures are logged and skipped.
    pub async fn resync_all(&self, cancel: &CancellationToken) -> AppResult<usize> {
        let snapshot_keys = self.cache.keys_with_prefix(keys::SNAPSHOT_PREFIX).await?;
        let mut total = 0;

        for key in snapshot_keys {
            if cancel.is_cancelled() {
                break;
            }
            let Some(account) = keys::account_from_snapshot_key(&key) else {
                continue;
            };
            match self.resync(account, cancel).await {
                Ok(Some(report)) => total += report.total(),
                Ok(None) => {}
                Err(e) => warn!(account, error = %e, "Resync failed"),
            }
        }

        Ok(total)
    }

    /// Cache the snapshot for periodic re-sync. Best effort: a cache
    /// failure degrades to "no background re-run", never fails the sync.
    async fn cache_snapshot(&self, account: &str, snapshot: &EventSnapshot) {
        let key = keys::event_snapshot(account);
        let ttl = std::time::Duration::from_secs(self.config.snapshot_ttl_seconds);
        match serde_json::to_string(snapshot) {
            Ok(raw) => {
                if let Err(e) = self.cache.set(&key, &raw, ttl).await {
                    warn!(account, error = %e, "Failed to cache snapshot");
                }
            }
            Err(e) => warn!(account, error = %e, "Failed to serialize snapshot"),
        }
    }

    async fn account_lock(&self, account: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(
            locks
                .entry(account.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use notify_cache::memory::MemoryCacheProvider;
    use notify_core::config::cache::MemoryCacheConfig;
    use notify_core::events::CircleSnapshot;
    use notify_entity::preference::NotificationPreferences;

    use crate::store::PreferenceStore as _;
    use crate::testing::{MemoryDedupStore, MemoryNotificationStore, MemoryPreferenceStore};

    const ACCOUNT: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    struct Harness {
        orchestrator: SyncOrchestrator,
        notifications: Arc<MemoryNotificationStore>,
        dedup: Arc<MemoryDedupStore>,
        preferences: Arc<MemoryPreferenceStore>,
    }

    fn harness() -> Harness {
        let notifications = Arc::new(MemoryNotificationStore::default());
        let dedup = Arc::new(MemoryDedupStore::default());
        let preferences = Arc::new(MemoryPreferenceStore::default());
        let cache = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::new(&MemoryCacheConfig::default(), 60),
        )));

        let orchestrator = SyncOrchestrator::new(
            notifications.clone(),
            dedup.clone(),
            preferences.clone(),
            cache,
            SyncConfig::default(),
        );

        Harness {
            orchestrator,
            notifications,
            dedup,
            preferences,
        }
    }

    fn snapshot_with_circle() -> EventSnapshot {
        EventSnapshot {
            circles: vec![CircleSnapshot {
                circle_id: "7".to_string(),
                circle_name: Some("Rent Fund".to_string()),
                is_started: true,
                is_completed: false,
                current_round: None,
                has_contributed: false,
                contribution_amount: None,
            }],
            ..EventSnapshot::default()
        }
    }

    #[tokio::test]
    async fn test_redundant_syncs_create_nothing_new() {
        let h = harness();
        let cancel = CancellationToken::new();
        let snapshot = snapshot_with_circle();

        let first = h
            .orchestrator
            .sync(ACCOUNT, &snapshot, &cancel)
            .await
            .unwrap();
        assert_eq!(first.total(), 1);

        for _ in 0..3 {
            let again = h
                .orchestrator
                .sync(ACCOUNT, &snapshot, &cancel)
                .await
                .unwrap();
            assert_eq!(again.total(), 0);
        }
        assert_eq!(h.notifications.all().len(), 1);
    }

    #[tokio::test]
    async fn test_master_switch_consumes_no_keys() {
        let h = harness();
        let cancel = CancellationToken::new();
        let snapshot = snapshot_with_circle();

        let disabled = NotificationPreferences {
            in_app_enabled: false,
            ..NotificationPreferences::default()
        };
        h.preferences.put(ACCOUNT, &disabled).await.unwrap();

        let gated = h
            .orchestrator
            .sync(ACCOUNT, &snapshot, &cancel)
            .await
            .unwrap();
        assert!(gated.gated);
        assert_eq!(gated.total(), 0);
        assert_eq!(h.dedup.len(), 0);
        assert!(h.notifications.all().is_empty());

        // Re-enabling notifies retroactively: the condition was never
        // marked seen while the master switch was off.
        h.preferences
            .put(ACCOUNT, &NotificationPreferences::default())
            .await
            .unwrap();
        let report = h
            .orchestrator
            .sync(ACCOUNT, &snapshot, &cancel)
            .await
            .unwrap();
        assert_eq!(report.total(), 1);
    }

    #[tokio::test]
    async fn test_resync_replays_cached_snapshot() {
        let h = harness();
        let cancel = CancellationToken::new();
        let snapshot = snapshot_with_circle();

        h.orchestrator
            .sync(ACCOUNT, &snapshot, &cancel)
            .await
            .unwrap();

        let replay = h.orchestrator.resync(ACCOUNT, &cancel).await.unwrap();
        assert_eq!(replay.unwrap().total(), 0);

        let total = h.orchestrator.resync_all(&cancel).await.unwrap();
        assert_eq!(total, 0);
        assert_eq!(h.notifications.all().len(), 1);
    }

    #[tokio::test]
    async fn test_resync_without_snapshot_is_noop() {
        let h = harness();
        let cancel = CancellationToken::new();
        let replay = h.orchestrator.resync(ACCOUNT, &cancel).await.unwrap();
        assert!(replay.is_none());
    }
}
