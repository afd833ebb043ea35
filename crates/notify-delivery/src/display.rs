//! OS-level notification display.
//!
//! The display's dedup key is the `tag`: a newer notification with the
//! same tag replaces the older one (last write wins). Do not confuse this
//! with the foreground's permanent consumed-key set — the two mechanisms
//! are not interchangeable.

use dashmap::DashMap;

use crate::payload::PushPayload;

/// Default title when a push arrives with no usable payload.
pub const DEFAULT_TITLE: &str = "Circlepot Notification";
/// Default body text.
pub const DEFAULT_BODY: &str = "You have a new notification";
/// Default replacement tag.
pub const DEFAULT_TAG: &str = "circlepot-notification";
/// Default icon path.
pub const DEFAULT_ICON: &str = "/icons/icon-192.png";
/// Default badge path.
pub const DEFAULT_BADGE: &str = "/icons/badge-72.png";

/// A notification as handed to the platform display surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedNotification {
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Icon URL.
    pub icon: String,
    /// Badge URL.
    pub badge: String,
    /// Replacement tag.
    pub tag: String,
    /// Whether the notification stays until dismissed.
    pub requires_interaction: bool,
    /// Click routing data.
    pub data: Option<serde_json::Value>,
}

impl Default for DisplayedNotification {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
            icon: DEFAULT_ICON.to_string(),
            badge: DEFAULT_BADGE.to_string(),
            tag: DEFAULT_TAG.to_string(),
            requires_interaction: false,
            data: None,
        }
    }
}

impl DisplayedNotification {
    /// Build from a decoded payload, defaulting every missing field.
    pub fn from_payload(payload: PushPayload) -> Self {
        let defaults = Self::default();
        Self {
            title: payload.title.unwrap_or(defaults.title),
            body: payload.message.unwrap_or(defaults.body),
            icon: payload.icon.unwrap_or(defaults.icon),
            badge: payload.badge.unwrap_or(defaults.badge),
            tag: payload.kind.unwrap_or(defaults.tag),
            requires_interaction: payload.requires_action,
            data: payload.data,
        }
    }

    /// Build from raw push bytes.
    ///
    /// `None` (a push with no data) produces the fully generic default.
    /// Unparsable JSON falls back to reading the bytes as plain text into
    /// the body. Nothing here can fail.
    pub fn from_push(data: Option<&[u8]>) -> Self {
        let Some(bytes) = data else {
            return Self::default();
        };

        match serde_json::from_slice::<PushPayload>(bytes) {
            Ok(payload) => Self::from_payload(payload),
            Err(_) => Self {
                body: String::from_utf8_lossy(bytes).into_owned(),
                ..Self::default()
            },
        }
    }
}

/// Where displayed notifications land.
pub trait NotificationDisplay: Send + Sync + std::fmt::Debug + 'static {
    /// Show a notification, replacing any visible one with the same tag.
    fn show(&self, notification: DisplayedNotification);
}

/// In-process display surface with the platform's replace-by-tag
/// semantics.
#[derive(Debug, Default)]
pub struct TagBoard {
    entries: DashMap<String, DisplayedNotification>,
}

impl TagBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently visible notification for a tag.
    pub fn get(&self, tag: &str) -> Option<DisplayedNotification> {
        self.entries.get(tag).map(|e| e.value().clone())
    }

    /// Dismiss a tag.
    pub fn dismiss(&self, tag: &str) -> Option<DisplayedNotification> {
        self.entries.remove(tag).map(|(_, n)| n)
    }

    /// Number of visible notifications.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NotificationDisplay for TagBoard {
    fn show(&self, notification: DisplayedNotification) {
        self.entries.insert(notification.tag.clone(), notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_payload_maps_fields() {
        let raw = br#"{"title":"X","message":"Y","type":"circle_started"}"#;
        let shown = DisplayedNotification::from_push(Some(raw.as_slice()));
        assert_eq!(shown.title, "X");
        assert_eq!(shown.body, "Y");
        assert_eq!(shown.tag, "circle_started");
    }

    #[test]
    fn test_absent_payload_is_fully_generic() {
        let shown = DisplayedNotification::from_push(None);
        assert_eq!(shown.title, "Circlepot Notification");
        assert_eq!(shown.tag, DEFAULT_TAG);
    }

    #[test]
    fn test_unparsable_payload_becomes_plain_text_body() {
        let shown = DisplayedNotification::from_push(Some(b"round 3 is due".as_slice()));
        assert_eq!(shown.title, DEFAULT_TITLE);
        assert_eq!(shown.body, "round 3 is due");
    }

    #[test]
    fn test_body_and_tag_aliases() {
        let raw = br#"{"body":"B","tag":"t1"}"#;
        let shown = DisplayedNotification::from_push(Some(raw.as_slice()));
        assert_eq!(shown.body, "B");
        assert_eq!(shown.tag, "t1");
    }

    #[test]
    fn test_same_tag_replaces() {
        let board = TagBoard::new();
        board.show(DisplayedNotification {
            tag: "t".to_string(),
            body: "first".to_string(),
            ..DisplayedNotification::default()
        });
        board.show(DisplayedNotification {
            tag: "t".to_string(),
            body: "second".to_string(),
            ..DisplayedNotification::default()
        });

        assert_eq!(board.len(), 1);
        assert_eq!(board.get("t").unwrap().body, "second");
    }

    #[test]
    fn test_distinct_tags_coexist() {
        let board = TagBoard::new();
        board.show(DisplayedNotification {
            tag: "a".to_string(),
            ..DisplayedNotification::default()
        });
        board.show(DisplayedNotification {
            tag: "b".to_string(),
            ..DisplayedNotification::default()
        });
        assert_eq!(board.len(), 2);
    }
}
