//! Durable store traits shared across the foreground context.

use async_trait::async_trait;

use crate::result::AppResult;

/// Persistent set of consumed notification dedup keys, scoped per account.
///
/// Keys are never expired: once a domain event has produced a notification
/// its key stays consumed forever, so re-observing the same event is a
/// no-op. `reset` exists for debugging and tests only.
#[async_trait]
pub trait DedupStore: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether a key has already been consumed for this account.
    async fn has(&self, account: &str, key: &str) -> AppResult<bool>;

    /// Record a key as consumed. Adding an already-present key is a no-op,
    /// so resumed batches can safely re-add keys they persisted before a
    /// crash.
    async fn add(&self, account: &str, key: &str) -> AppResult<()>;

    /// Remove every consumed key for this account. Returns the number of
    /// keys removed.
    async fn reset(&self, account: &str) -> AppResult<u64>;
}
