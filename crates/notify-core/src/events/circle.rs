//! Savings circle snapshots.

use serde::{Deserialize, Serialize};

/// State of one savings circle as reported by the indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleSnapshot {
    /// On-chain circle identifier.
    pub circle_id: String,
    /// Display name. Missing names degrade to a placeholder.
    #[serde(default)]
    pub circle_name: Option<String>,
    /// Whether the circle has started collecting contributions.
    #[serde(default)]
    pub is_started: bool,
    /// Whether every round has completed.
    #[serde(default)]
    pub is_completed: bool,
    /// The round currently collecting, if any.
    #[serde(default)]
    pub current_round: Option<u32>,
    /// Whether this account has contributed to the current round.
    #[serde(default)]
    pub has_contributed: bool,
    /// Per-round contribution amount in USD.
    #[serde(default)]
    pub contribution_amount: Option<f64>,
}
