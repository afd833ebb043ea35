//! Reputation history entries.

use serde::{Deserialize, Serialize};

/// One reputation change as reported by the indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationEvent {
    /// History entry identifier.
    pub id: String,
    /// Upstream event type tag (e.g. `"contribution"`, `"missed_payment"`).
    pub event_type: String,
    /// Signed point delta. Non-negative deltas are increases.
    #[serde(default)]
    pub points_change: i64,
    /// Optional human-readable reason.
    #[serde(default)]
    pub reason: Option<String>,
}

impl ReputationEvent {
    /// Whether this entry raised the account's reputation.
    pub fn is_increase(&self) -> bool {
        self.points_change >= 0
    }
}
