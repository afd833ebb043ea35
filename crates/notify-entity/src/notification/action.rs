//! Click-through action attached to a notification.

use serde::{Deserialize, Serialize};

/// Where a notification click should take the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    /// Button/label text.
    pub label: String,
    /// In-app route to navigate to.
    pub route: String,
}

impl NotificationAction {
    /// Create a new action.
    pub fn new(label: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            route: route.into(),
        }
    }
}
