//! Notification domain entities.

pub mod action;
pub mod kind;
pub mod model;
pub mod priority;

pub use action::NotificationAction;
pub use kind::{NotificationFamily, NotificationType};
pub use model::Notification;
pub use priority::Priority;
