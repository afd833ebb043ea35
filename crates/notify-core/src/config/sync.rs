//! Event sync configuration.

use serde::{Deserialize, Serialize};

/// Settings for the event sync orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Sliding window for transaction events, in hours. Transactions older
    /// than this are skipped entirely.
    #[serde(default = "default_transaction_window")]
    pub transaction_window_hours: i64,
    /// How long an ingested event snapshot stays cached for periodic
    /// re-sync, in seconds.
    #[serde(default = "default_snapshot_ttl")]
    pub snapshot_ttl_seconds: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            transaction_window_hours: default_transaction_window(),
            snapshot_ttl_seconds: default_snapshot_ttl(),
        }
    }
}

fn default_transaction_window() -> i64 {
    24
}

fn default_snapshot_ttl() -> u64 {
    3600
}
