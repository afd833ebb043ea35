//! Background job implementations.

pub mod push_check;
pub mod reconcile;
pub mod resync;

pub use push_check::PushCheckJob;
pub use reconcile::ReconcileJob;
pub use resync::ResyncJob;
