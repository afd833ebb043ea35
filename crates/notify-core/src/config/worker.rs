//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker configuration.
///
/// Schedules use the six-field cron syntax accepted by
/// `tokio-cron-scheduler` (seconds first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Schedule for the periodic push `/check` sync.
    #[serde(default = "default_push_check_schedule")]
    pub push_check_schedule: String,
    /// Schedule for re-running the mapper over cached snapshots.
    #[serde(default = "default_resync_schedule")]
    pub resync_schedule: String,
    /// Schedule for push subscription reconciliation.
    #[serde(default = "default_reconcile_schedule")]
    pub reconcile_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            push_check_schedule: default_push_check_schedule(),
            resync_schedule: default_resync_schedule(),
            reconcile_schedule: default_reconcile_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_push_check_schedule() -> String {
    "0 */15 * * * *".to_string()
}

fn default_resync_schedule() -> String {
    "0 */5 * * * *".to_string()
}

fn default_reconcile_schedule() -> String {
    "0 0 * * * *".to_string()
}
