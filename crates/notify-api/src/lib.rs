//! # notify-api
//!
//! HTTP API layer for Circlepot Notify: routes, handlers, DTOs, shared
//! state, and the error-to-HTTP mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use state::AppState;
