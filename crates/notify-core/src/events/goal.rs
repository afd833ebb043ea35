//! Personal savings goal snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of one personal savings goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSnapshot {
    /// Goal identifier.
    pub goal_id: String,
    /// Display name. Missing names degrade to a placeholder.
    #[serde(default)]
    pub goal_name: Option<String>,
    /// Whether the goal is still accepting contributions.
    #[serde(default)]
    pub is_active: bool,
    /// Amount saved so far, in USD.
    #[serde(default)]
    pub current_amount: f64,
    /// Target amount, in USD.
    #[serde(default)]
    pub goal_amount: f64,
    /// Optional completion deadline.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}
