//! Account path parameter validation.

use notify_core::types::address::normalize_address;

use crate::error::ApiError;

/// Validate and normalize the `{address}` path segment.
pub fn account_param(raw: &str) -> Result<String, ApiError> {
    normalize_address(raw).map_err(ApiError::from)
}
