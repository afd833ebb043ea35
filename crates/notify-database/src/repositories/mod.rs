//! Concrete repository implementations.

pub mod notification;
pub mod preference;
pub mod processed_event;
pub mod subscription;

pub use notification::NotificationRepository;
pub use preference::PreferenceRepository;
pub use processed_event::ProcessedEventRepository;
pub use subscription::SubscriptionRepository;
