//! Delegation rules.
//!
//! A delegation grants a non-owner account a temporary, revocable right
//! over an asset. Expiry is expressed in the external chain's block count;
//! blocks only ever move forward, so an expiry at or below the current
//! block would be dead on arrival.

use crate::error::CoreError;
use crate::types::BlockNumber;

/// Validate a delegation expiry against the current block.
///
/// Both values are optional in the request: an absent expiry means an
/// open-ended delegation, and an absent current block means the caller
/// did not supply a chain reading to validate against. Only when both are
/// present is the `expires_at_block > current_block` rule enforced.
pub fn validate_expiry(
    expires_at_block: Option<BlockNumber>,
    current_block: Option<BlockNumber>,
) -> Result<(), CoreError> {
    if let (Some(expires), Some(current)) = (expires_at_block, current_block) {
        if expires <= current {
            return Err(CoreError::Validation(format!(
                "expires_at_block ({expires}) must be greater than current_block ({current})"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_future_expiry() {
        assert!(validate_expiry(Some(1000), Some(500)).is_ok());
    }

    #[test]
    fn accepts_open_ended_delegation() {
        assert!(validate_expiry(None, Some(500)).is_ok());
    }

    #[test]
    fn accepts_expiry_without_current_block() {
        assert!(validate_expiry(Some(1000), None).is_ok());
    }

    #[test]
    fn rejects_expiry_at_current_block() {
        assert!(validate_expiry(Some(500), Some(500)).is_err());
    }

    #[test]
    fn rejects_expiry_in_the_past() {
        assert!(validate_expiry(Some(100), Some(500)).is_err());
    }
}
