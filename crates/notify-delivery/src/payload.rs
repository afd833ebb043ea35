//! Tolerant push payload decoding.

use serde::Deserialize;

/// Raw JSON shape of an inbound push message. Every field is optional and
/// the `message`/`body` and `type`/`tag` pairs are accepted interchangeably
/// for compatibility with older senders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushPayload {
    /// Notification title.
    #[serde(default)]
    pub title: Option<String>,
    /// Notification body.
    #[serde(default, alias = "body")]
    pub message: Option<String>,
    /// Icon URL.
    #[serde(default)]
    pub icon: Option<String>,
    /// Badge URL.
    #[serde(default)]
    pub badge: Option<String>,
    /// Replacement tag. Same-tag notifications replace each other.
    #[serde(default, rename = "type", alias = "tag")]
    pub kind: Option<String>,
    /// Whether the notification should stay until dismissed.
    #[serde(default, alias = "requiresAction")]
    pub requires_action: bool,
    /// Display priority hint.
    #[serde(default)]
    pub priority: Option<String>,
    /// Click routing data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Action buttons, passed through untouched.
    #[serde(default)]
    pub actions: Option<serde_json::Value>,
}
