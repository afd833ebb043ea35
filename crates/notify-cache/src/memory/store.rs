//! In-memory cache implementation using the moka crate.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use notify_core::config::cache::MemoryCacheConfig;
use notify_core::result::AppResult;
use notify_core::traits::cache::CacheProvider;

/// Entries carry their own TTL so callers can pick longer lifetimes than
/// the cache-wide default (snapshots vs. unread counts).
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

struct PerEntryExpiry;

impl Expiry<String, Entry> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory cache provider using moka.
///
/// Entries written with `set_persistent` bypass the TTL cache and live in
/// a side map, mirroring Redis keys stored without expiry.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, Entry>,
    /// Default TTL for entries.
    default_ttl: Duration,
    /// Entries without expiry.
    persistent: Arc<dashmap::DashMap<String, String>>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryExpiry)
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
            persistent: Arc::new(dashmap::DashMap::new()),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if let Some(value) = self.persistent.get(key) {
            return Ok(Some(value.clone()));
        }
        Ok(self.cache.get(key).await.map(|e| e.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.persistent.remove(key);
        self.cache
            .insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn set_persistent(&self, key: &str, value: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        self.persistent.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        self.persistent.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.persistent.contains_key(key) || self.cache.contains_key(key))
    }

    async fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        self.cache.run_pending_tasks().await;

        let mut keys: Vec<String> = self
            .cache
            .iter()
            .filter(|entry| entry.0.starts_with(prefix))
            .map(|entry| entry.0.to_string())
            .collect();

        for entry in self.persistent.iter() {
            if entry.key().starts_with(prefix) && !keys.contains(entry.key()) {
                keys.push(entry.key().clone());
            }
        }

        Ok(keys)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn flush_all(&self) -> AppResult<()> {
        let count = self.cache.entry_count() + self.persistent.len() as u64;
        self.cache.invalidate_all();
        self.persistent.clear();
        debug!(count, "Flushed in-memory cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig::default(), 60)
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = provider();
        cache.set_default("k", "v").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
        cache.delete("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_persistent_entries_have_no_ttl_path() {
        let cache = provider();
        cache
            .set_persistent("push:api_url", "https://x")
            .await
            .unwrap();
        assert_eq!(
            cache.get("push:api_url").await.unwrap(),
            Some("https://x".to_string())
        );
    }

    #[tokio::test]
    async fn test_keys_with_prefix() {
        let cache = provider();
        cache.set_default("sync:snapshot:0xa", "{}").await.unwrap();
        cache.set_default("sync:snapshot:0xb", "{}").await.unwrap();
        cache.set_default("notif:unread:0xa", "3").await.unwrap();

        let keys = cache.keys_with_prefix("sync:snapshot:").await.unwrap();
        assert_eq!(keys.len(), 2);
    }
}
