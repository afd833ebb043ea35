//! # notify-cache
//!
//! Cache providers for Circlepot Notify. The in-memory provider backs
//! single-node deployments and tests; the Redis provider doubles as the
//! delivery channel's out-of-band store, which is a logically separate
//! namespace from the foreground context's PostgreSQL state.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
