//! # notify-core
//!
//! Core crate for Circlepot Notify. Contains traits, configuration schemas,
//! domain event snapshot types, pagination types, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Notify crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
