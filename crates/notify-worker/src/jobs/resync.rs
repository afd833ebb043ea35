//! Snapshot re-sync job.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use notify_service::SyncOrchestrator;

/// Re-runs the mapper over every cached snapshot.
///
/// This deliberately re-feeds the orchestrator inputs it has already
/// seen: redundant invocation is part of its contract and the dedup
/// discipline keeps the inbox stable.
#[derive(Debug)]
pub struct ResyncJob {
    orchestrator: Arc<SyncOrchestrator>,
    shutdown: CancellationToken,
}

impl ResyncJob {
    /// Create the job.
    pub fn new(orchestrator: Arc<SyncOrchestrator>, shutdown: CancellationToken) -> Self {
        Self {
            orchestrator,
            shutdown,
        }
    }

    /// Run one sweep.
    pub async fn run(&self) {
        match self.orchestrator.resync_all(&self.shutdown).await {
            Ok(created) => debug!(created, "Resync sweep finished"),
            Err(e) => warn!(error = %e, "Resync sweep failed"),
        }
    }
}
