//! Transaction history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a circle transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// A payout received from a circle round.
    Payout,
    /// A contribution made after the round deadline.
    LatePayment,
    /// A regular contribution.
    Contribution,
}

/// One transaction as reported by the indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction hash.
    pub id: String,
    /// What the transaction was.
    pub kind: TransactionKind,
    /// Amount in USD.
    #[serde(default)]
    pub amount: f64,
    /// Name of the circle involved, when known.
    #[serde(default)]
    pub circle_name: Option<String>,
    /// When the transaction was confirmed.
    pub timestamp: DateTime<Utc>,
}
