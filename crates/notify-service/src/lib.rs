//! # notify-service
//!
//! Business logic for Circlepot Notify: the event-to-notification mapper
//! pipeline, the sync orchestrator, inbox and preference services, and the
//! startup action back-fill.

pub mod mapper;
pub mod migrate;
pub mod notification;
pub mod preference;
pub mod store;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use notification::NotificationService;
pub use preference::PreferenceService;
pub use store::{NotificationStore, PreferenceStore};
pub use sync::SyncOrchestrator;
