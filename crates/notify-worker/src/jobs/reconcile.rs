//! Push subscription reconciliation job.

use std::sync::Arc;

use tracing::{debug, info, warn};

use notify_database::repositories::subscription::SubscriptionRepository;
use notify_delivery::PushPlatform;

/// Prunes subscription records whose platform subscription has been
/// silently discarded.
///
/// Invalidation is never pushed to us; it is only observable by
/// re-query, so this sweep is the sole detection path.
#[derive(Debug)]
pub struct ReconcileJob {
    platform: Arc<dyn PushPlatform>,
    subscriptions: Arc<SubscriptionRepository>,
}

impl ReconcileJob {
    /// Create the job.
    pub fn new(
        platform: Arc<dyn PushPlatform>,
        subscriptions: Arc<SubscriptionRepository>,
    ) -> Self {
        Self {
            platform,
            subscriptions,
        }
    }

    /// Run one sweep. Per-row failures are logged and skipped; a row is
    /// only pruned on a definitive "not alive" answer.
    pub async fn run(&self) {
        let rows = match self.subscriptions.find_all().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Reconciliation could not list subscriptions");
                return;
            }
        };

        let mut pruned = 0u64;
        for row in rows {
            match self.platform.is_alive(&row.endpoint).await {
                Ok(true) => {}
                Ok(false) => match self.subscriptions.delete_endpoint(&row.endpoint).await {
                    Ok(true) => pruned += 1,
                    Ok(false) => {}
                    Err(e) => warn!(endpoint = %row.endpoint, error = %e, "Prune failed"),
                },
                Err(e) => {
                    debug!(endpoint = %row.endpoint, error = %e, "Liveness re-query failed")
                }
            }
        }

        if pruned > 0 {
            info!(pruned, "Pruned invalidated push subscriptions");
        }
    }
}
