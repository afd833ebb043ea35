//! Membership category change history.

use serde::{Deserialize, Serialize};

/// One membership category change as reported by the indexer.
///
/// Categories are numeric indices into a fixed ordered tier list; display
/// names are resolved by the mapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryChangeEvent {
    /// History entry identifier.
    pub id: String,
    /// Tier index before the change.
    #[serde(default)]
    pub old_category: u32,
    /// Tier index after the change.
    #[serde(default)]
    pub new_category: u32,
}

impl CategoryChangeEvent {
    /// Whether the new tier ranks above the old one.
    pub fn is_promotion(&self) -> bool {
        self.new_category > self.old_category
    }
}
