//! Periodic push check job.

use std::sync::Arc;

use tracing::debug;

use notify_delivery::PeriodicSync;

/// Runs the delivery channel's periodic `/check` sync.
///
/// Best effort end to end: the sync itself swallows every failure, so
/// this job never errors and never retries.
#[derive(Debug)]
pub struct PushCheckJob {
    sync: Arc<PeriodicSync>,
}

impl PushCheckJob {
    /// Create the job.
    pub fn new(sync: Arc<PeriodicSync>) -> Self {
        Self { sync }
    }

    /// Run one cycle.
    pub async fn run(&self) {
        let displayed = self.sync.run_once().await;
        debug!(displayed, "Push check cycle finished");
    }
}
