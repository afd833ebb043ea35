//! Wallet address normalization.
//!
//! Every store in the system is keyed by a wallet address. Addresses are
//! normalized once at the API boundary so that the same account never
//! appears under two casings.

use crate::error::AppError;
use crate::result::AppResult;

/// Validate and normalize a wallet address to lowercase `0x`-prefixed hex.
pub fn normalize_address(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| AppError::validation(format!("Address must start with 0x: '{trimmed}'")))?;

    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::validation(format!(
            "Address must be 40 hex characters: '{trimmed}'"
        )));
    }

    Ok(format!("0x{}", hex.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_casing() {
        let addr = normalize_address("0xAbCd000000000000000000000000000000001234").unwrap();
        assert_eq!(addr, "0xabcd000000000000000000000000000000001234");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(normalize_address("abcd").is_err());
        assert!(normalize_address("0x1234").is_err());
        assert!(normalize_address("0xzzzz000000000000000000000000000000001234").is_err());
    }
}
