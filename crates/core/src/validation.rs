//! Input validation for asset creation and mutation payloads.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum allowed length for an asset identifier.
pub const MAX_UUID_LENGTH: usize = 128;

/// Maximum allowed length for an asset name.
pub const MAX_ASSET_NAME_LENGTH: usize = 200;

/// Maximum allowed length for an equipment slot name.
pub const MAX_SLOT_NAME_LENGTH: usize = 64;

/// Maximum number of equipment slots a single asset may declare.
pub const MAX_SLOTS_PER_ASSET: usize = 16;

/// Maximum allowed length for a custom-state key.
pub const MAX_STATE_KEY_LENGTH: usize = 128;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an asset identifier: non-empty, trimmed, within
/// [`MAX_UUID_LENGTH`]. Identifiers are opaque strings chosen by the
/// caller; no particular format is imposed beyond that.
pub fn validate_asset_uuid(uuid: &str) -> Result<(), CoreError> {
    let trimmed = uuid.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Asset uuid must not be empty".to_string(),
        ));
    }
    if trimmed.len() != uuid.len() {
        return Err(CoreError::Validation(
            "Asset uuid must not have leading or trailing whitespace".to_string(),
        ));
    }
    if uuid.len() > MAX_UUID_LENGTH {
        return Err(CoreError::Validation(format!(
            "Asset uuid must not exceed {MAX_UUID_LENGTH} characters, got {}",
            uuid.len()
        )));
    }
    Ok(())
}

/// Validate an asset name: non-empty after trimming, within
/// [`MAX_ASSET_NAME_LENGTH`].
pub fn validate_asset_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Asset name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_ASSET_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Asset name must not exceed {MAX_ASSET_NAME_LENGTH} characters, got {}",
            name.len()
        )));
    }
    Ok(())
}

/// Validate a single equipment slot name.
pub fn validate_slot_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Slot name must not be empty".to_string(),
        ));
    }
    if trimmed.len() != name.len() {
        return Err(CoreError::Validation(
            "Slot name must not have leading or trailing whitespace".to_string(),
        ));
    }
    if name.len() > MAX_SLOT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slot name must not exceed {MAX_SLOT_NAME_LENGTH} characters, got {}",
            name.len()
        )));
    }
    Ok(())
}

/// Validate the slot set declared at asset creation: each name valid,
/// names unique within the host, count within [`MAX_SLOTS_PER_ASSET`].
pub fn validate_slot_names(names: &[&str]) -> Result<(), CoreError> {
    if names.len() > MAX_SLOTS_PER_ASSET {
        return Err(CoreError::Validation(format!(
            "An asset may declare at most {MAX_SLOTS_PER_ASSET} equipment slots, got {}",
            names.len()
        )));
    }
    for name in names {
        validate_slot_name(name)?;
    }
    let mut seen: Vec<&str> = Vec::with_capacity(names.len());
    for name in names {
        if seen.contains(name) {
            return Err(CoreError::Validation(format!(
                "Duplicate slot name '{name}' in equipment slot set"
            )));
        }
        seen.push(name);
    }
    Ok(())
}

/// Validate a custom-state key.
pub fn validate_state_key(key: &str) -> Result<(), CoreError> {
    if key.trim().is_empty() {
        return Err(CoreError::Validation(
            "State key must not be empty".to_string(),
        ));
    }
    if key.len() > MAX_STATE_KEY_LENGTH {
        return Err(CoreError::Validation(format!(
            "State key must not exceed {MAX_STATE_KEY_LENGTH} characters, got {}",
            key.len()
        )));
    }
    Ok(())
}

/// Validate the required fields of a resource registration.
pub fn validate_resource_fields(resource_type: &str, uri: &str) -> Result<(), CoreError> {
    if resource_type.trim().is_empty() {
        return Err(CoreError::Validation(
            "resource_type must not be empty".to_string(),
        ));
    }
    if uri.trim().is_empty() {
        return Err(CoreError::Validation("uri must not be empty".to_string()));
    }
    Ok(())
}

/// Validate an account identifier (creator, owner, or delegate).
pub fn validate_account(account: &str) -> Result<(), CoreError> {
    if account.trim().is_empty() {
        return Err(CoreError::Validation(
            "Account must not be empty".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
