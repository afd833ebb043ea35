//! HTTP handlers, one module per domain.

pub mod health;
pub mod notification;
pub mod preference;
pub mod push;
pub mod sync;
