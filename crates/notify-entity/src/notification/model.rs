//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::action::NotificationAction;
use super::kind::NotificationType;
use super::priority::Priority;

/// A notification in an account's inbox.
///
/// `notification_type` and `priority` are stored in their string forms;
/// the closed enums in this module are the authoritative vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier. UUIDv7, so ids are time-ordered
    /// and derived from the creation instant.
    pub id: Uuid,
    /// The owning wallet address, lowercase.
    pub account: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification type (snake_case string form of [`NotificationType`]).
    pub notification_type: String,
    /// Priority level (string form of [`Priority`]).
    pub priority: String,
    /// Whether the user has read this notification.
    pub read: bool,
    /// When the notification was created.
    pub timestamp: DateTime<Utc>,
    /// Click-through action, if any. Back-filled on load for records
    /// persisted before actions existed.
    pub action: Option<Json<NotificationAction>>,
    /// Additional structured data for downstream consumers.
    pub data: Option<serde_json::Value>,
}

impl Notification {
    /// Create a new unread notification stamped with the current instant.
    pub fn new(
        account: impl Into<String>,
        kind: NotificationType,
        priority: Priority,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            account: account.into(),
            title: title.into(),
            message: message.into(),
            notification_type: kind.as_str().to_string(),
            priority: priority.as_str().to_string(),
            read: false,
            timestamp: Utc::now(),
            action: None,
            data: None,
        }
    }

    /// Attach a click-through action.
    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(Json(action));
        self
    }

    /// Attach a free-form data payload.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// The typed notification type, when the stored string is recognized.
    pub fn kind(&self) -> Option<NotificationType> {
        NotificationType::parse(&self.notification_type)
    }

    /// The typed priority.
    pub fn priority_level(&self) -> Priority {
        Priority::parse(&self.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unread_and_typed() {
        let n = Notification::new(
            "0xabc",
            NotificationType::CircleStarted,
            Priority::High,
            "Circle Started",
            "Rent Fund has started",
        );
        assert!(!n.read);
        assert_eq!(n.kind(), Some(NotificationType::CircleStarted));
        assert_eq!(n.priority_level(), Priority::High);
    }

    #[test]
    fn test_v7_ids_are_time_ordered() {
        let a = Notification::new(
            "0xabc",
            NotificationType::GoalCompleted,
            Priority::Medium,
            "a",
            "a",
        );
        // UUIDv7 orders by millisecond timestamp; step past the current one.
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = Notification::new(
            "0xabc",
            NotificationType::GoalCompleted,
            Priority::Medium,
            "b",
            "b",
        );
        assert!(a.id < b.id);
    }
}
