//! # notify-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for the foreground context's durable stores.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
