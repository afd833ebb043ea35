//! Referral reward history.

use serde::{Deserialize, Serialize};

/// One referral reward as reported by the indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralReward {
    /// Reward entry identifier.
    pub id: String,
    /// Reward amount as a base-10 integer string scaled by 10^18.
    #[serde(default)]
    pub reward_amount: String,
    /// The referred user, when known.
    #[serde(default)]
    pub referee: Option<Referee>,
}

/// Minimal view of the referred user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Referee {
    /// Username chosen at profile creation.
    #[serde(default)]
    pub username: Option<String>,
}
