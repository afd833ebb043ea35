//! Domain event snapshots consumed by the notification mapper.
//!
//! These types mirror the shapes produced by the upstream indexer pollers
//! (subgraph and wallet SDK, out of scope). They are *snapshots*, not an
//! event log: the same circle or goal can be reported in the same state on
//! every poll, and the mapper's dedup discipline is what keeps repeated
//! observations from producing repeated notifications.

pub mod category;
pub mod circle;
pub mod goal;
pub mod referral;
pub mod reputation;
pub mod transaction;

use serde::{Deserialize, Serialize};

pub use category::CategoryChangeEvent;
pub use circle::CircleSnapshot;
pub use goal::GoalSnapshot;
pub use referral::{Referee, ReferralReward};
pub use reputation::ReputationEvent;
pub use transaction::{TransactionKind, TransactionRecord};

/// One account's complete view of the upstream event collections.
///
/// Every field defaults to empty so partial payloads from independently
/// updating data sources deserialize cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventSnapshot {
    /// Savings circles the account participates in.
    #[serde(default)]
    pub circles: Vec<CircleSnapshot>,
    /// Personal savings goals.
    #[serde(default)]
    pub goals: Vec<GoalSnapshot>,
    /// Recent transactions.
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    /// Reputation history entries.
    #[serde(default)]
    pub reputation: Vec<ReputationEvent>,
    /// Membership category change history.
    #[serde(default)]
    pub category_changes: Vec<CategoryChangeEvent>,
    /// Referral reward history.
    #[serde(default)]
    pub referral_rewards: Vec<ReferralReward>,
}

impl EventSnapshot {
    /// Whether the snapshot carries no events at all.
    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
            && self.goals.is_empty()
            && self.transactions.is_empty()
            && self.reputation.is_empty()
            && self.category_changes.is_empty()
            && self.referral_rewards.is_empty()
    }
}
