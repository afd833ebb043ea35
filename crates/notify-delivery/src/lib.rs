//! # notify-delivery
//!
//! The background delivery channel. Runs detached from the foreground
//! sync pipeline and owns its own key-value namespace; the only things the
//! two contexts share are the constants in `notify-entity`.
//!
//! Deduplication here is the platform's replace-by-tag semantic: a newer
//! notification with the same tag replaces the older one. That is a
//! different contract from the foreground's permanent consumed-key set,
//! and the two are deliberately never unified.

pub mod backend;
pub mod channel;
pub mod display;
pub mod payload;
pub mod platform;
pub mod routing;
pub mod sync;

pub use backend::BackendClient;
pub use channel::{ChannelState, DeliveryChannel};
pub use display::{DisplayedNotification, NotificationDisplay, TagBoard};
pub use payload::PushPayload;
pub use platform::{
    GrantedPermission, PermissionProvider, PermissionState, PlatformSubscription, PushPlatform,
    StoreBackedPlatform,
};
pub use routing::{ClickRouter, ClientSurface, ClientWindow, HeadlessSurface};
pub use sync::PeriodicSync;
