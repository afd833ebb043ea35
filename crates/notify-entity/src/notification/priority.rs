//! Notification priority.

use serde::{Deserialize, Serialize};

/// Display priority of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Needs attention now (payment due, payout received).
    High,
    /// Worth seeing soon.
    Medium,
    /// Informational.
    Low,
}

impl Priority {
    /// Return the priority as its persisted string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse the persisted string form, defaulting to `Medium` for
    /// anything unrecognized.
    pub fn parse(s: &str) -> Self {
        match s {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
