//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use notify_core::types::pagination::PageResponse;
use notify_entity::notification::action::NotificationAction;
use notify_entity::notification::model::Notification;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// One notification as served to clients. Timestamps are epoch
/// milliseconds on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    /// Notification id.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Type string.
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Priority string.
    pub priority: String,
    /// Read flag.
    pub read: bool,
    /// Creation instant, epoch milliseconds.
    pub timestamp: i64,
    /// Click-through action.
    pub action: Option<NotificationAction>,
    /// Free-form payload.
    pub data: Option<serde_json::Value>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title,
            message: n.message,
            notification_type: n.notification_type,
            priority: n.priority,
            read: n.read,
            timestamp: n.timestamp.timestamp_millis(),
            action: n.action.map(|a| a.0),
            data: n.data,
        }
    }
}

/// Paginated notification list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationListResponse {
    /// The notifications on this page, newest first.
    pub items: Vec<NotificationResponse>,
    /// Current page (1-based).
    pub page: u64,
    /// Page size.
    pub page_size: u64,
    /// Total items.
    pub total_items: u64,
    /// Total pages.
    pub total_pages: u64,
}

impl From<PageResponse<Notification>> for NotificationListResponse {
    fn from(page: PageResponse<Notification>) -> Self {
        Self {
            items: page.items.into_iter().map(NotificationResponse::from).collect(),
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

/// Count payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// The count.
    pub count: i64,
}

/// Simple message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Detailed health payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Service status.
    pub status: String,
    /// Database connectivity.
    pub database: String,
    /// Cache connectivity.
    pub cache: String,
}
