//! # notify-worker
//!
//! Cron-scheduled background tasks: the periodic push check, snapshot
//! re-sync, and push subscription reconciliation. Scheduling is the only
//! thing this crate owns — the work itself lives in the service and
//! delivery crates.

pub mod jobs;
pub mod scheduler;

pub use scheduler::NotifyScheduler;
