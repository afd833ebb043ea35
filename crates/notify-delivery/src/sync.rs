//! Periodic background sync.
//!
//! Best effort by contract: background execution budgets are platform
//! constrained and unpredictable, so every failure path abandons silently
//! for this cycle — bounded timeout, no retry, no error propagation.

use std::sync::Arc;

use tracing::debug;

use notify_cache::CacheManager;
use notify_cache::keys;
use notify_core::traits::cache::CacheProvider;

use crate::backend::BackendClient;
use crate::display::{DisplayedNotification, NotificationDisplay};

/// Fetches pending notifications from the backend and displays them.
#[derive(Debug)]
pub struct PeriodicSync {
    /// The channel's out-of-band store, holding the backend URL.
    store: Arc<CacheManager>,
    /// Backend HTTP client (carries the bounded timeout).
    backend: Arc<BackendClient>,
    /// OS notification surface.
    display: Arc<dyn NotificationDisplay>,
}

impl PeriodicSync {
    /// Create a periodic sync task.
    pub fn new(
        store: Arc<CacheManager>,
        backend: Arc<BackendClient>,
        display: Arc<dyn NotificationDisplay>,
    ) -> Self {
        Self {
            store,
            backend,
            display,
        }
    }

    /// Run one sync cycle. Returns how many notifications were displayed;
    /// zero covers both "nothing pending" and "abandoned this cycle".
    pub async fn run_once(&self) -> usize {
        let api_url = match self.store.get(&keys::push_api_url()).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                debug!("No backend URL in the channel store; skipping sync");
                return 0;
            }
            Err(e) => {
                debug!(error = %e, "Channel store unavailable; skipping sync");
                return 0;
            }
        };

        let pending = match self.backend.check(&api_url).await {
            Ok(pending) => pending,
            Err(e) => {
                debug!(error = %e, "Check fetch failed; abandoning this cycle");
                return 0;
            }
        };

        let count = pending.len();
        for payload in pending {
            self.display.show(DisplayedNotification::from_payload(payload));
        }

        if count > 0 {
            debug!(count, "Displayed pending notifications");
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use notify_cache::memory::MemoryCacheProvider;
    use notify_core::config::PushConfig;
    use notify_core::config::cache::MemoryCacheConfig;

    use super::*;
    use crate::display::TagBoard;

    #[tokio::test]
    async fn test_missing_backend_url_abandons_silently() {
        let store = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::new(&MemoryCacheConfig::default(), 60),
        )));
        let backend = Arc::new(BackendClient::new(&PushConfig::default()).unwrap());
        let board = Arc::new(TagBoard::new());
        let sync = PeriodicSync::new(store, backend, board.clone());

        assert_eq!(sync.run_once().await, 0);
        assert!(board.is_empty());
    }
}
