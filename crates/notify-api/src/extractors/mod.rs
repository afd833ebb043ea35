//! Request extractors and parameter helpers.

pub mod account;
pub mod pagination;

pub use account::account_param;
pub use pagination::PaginationParams;
