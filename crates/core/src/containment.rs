//! Containment graph rules: nesting, un-nesting, and equipping.
//!
//! The parent relation over assets must remain a forest, a child can be
//! nested under at most one parent, and an equipment slot may only
//! reference an occupant that is currently nested under the slot's host.
//! Repositories fetch the relevant rows (under row locks, in one
//! transaction) and call these checks before mutating anything.

use crate::error::GraphError;

/// Custom-state key that carries an asset's trait value, matched against
/// a slot's `required_trait` when equipping.
pub const TRAIT_STATE_KEY: &str = "trait";

// ---------------------------------------------------------------------------
// Nesting
// ---------------------------------------------------------------------------

/// Check that `child_uuid` may be nested under `parent_uuid`.
///
/// `child_parent` is the child's current parent reference, and
/// `parent_ancestry` is the parent's ancestor chain starting at the parent
/// itself and walking up to the root. The chain is what makes the cycle
/// check complete: `parent` being a descendant of `child` is equivalent to
/// `child` appearing in `parent`'s ancestry.
pub fn ensure_nestable(
    parent_uuid: &str,
    child_uuid: &str,
    child_parent: Option<&str>,
    parent_ancestry: &[String],
) -> Result<(), GraphError> {
    if parent_uuid == child_uuid {
        return Err(GraphError::SelfNesting(child_uuid.to_string()));
    }

    if let Some(current) = child_parent {
        return Err(GraphError::AlreadyNested {
            child_uuid: child_uuid.to_string(),
            parent_uuid: current.to_string(),
        });
    }

    if parent_ancestry.iter().any(|a| a == child_uuid) {
        return Err(GraphError::CyclicNesting {
            parent_uuid: parent_uuid.to_string(),
            child_uuid: child_uuid.to_string(),
        });
    }

    Ok(())
}

/// Check that `child_uuid` may be un-nested from `parent_uuid`.
///
/// `referencing_slots` is the number of equipment slots, on any host, that
/// currently reference the child as their occupant. Un-nesting while a slot
/// still points at the child is rejected so no slot is ever left
/// referencing an occupant outside its host's subtree.
pub fn ensure_unnestable(
    parent_uuid: &str,
    child_uuid: &str,
    child_parent: Option<&str>,
    referencing_slots: i64,
) -> Result<(), GraphError> {
    if child_parent != Some(parent_uuid) {
        return Err(GraphError::NotNested {
            child_uuid: child_uuid.to_string(),
            parent_uuid: parent_uuid.to_string(),
        });
    }

    if referencing_slots > 0 {
        return Err(GraphError::SlotOccupantReferenced {
            child_uuid: child_uuid.to_string(),
            slot_count: referencing_slots,
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Equipping
// ---------------------------------------------------------------------------

/// True when the child's custom state satisfies `required_trait`.
///
/// An asset carries trait `T` when it has a custom-state entry with key
/// [`TRAIT_STATE_KEY`] and value `T`.
pub fn trait_satisfied(required_trait: &str, child_state: &[(String, String)]) -> bool {
    child_state
        .iter()
        .any(|(key, value)| key == TRAIT_STATE_KEY && value == required_trait)
}

/// Check that `child_uuid` may be equipped into a slot on `host_uuid`.
///
/// The occupant must already be nested under the host, and when the slot
/// declares a `required_trait` the child's custom state must satisfy it.
pub fn ensure_equippable(
    host_uuid: &str,
    child_uuid: &str,
    child_parent: Option<&str>,
    required_trait: Option<&str>,
    child_state: &[(String, String)],
) -> Result<(), GraphError> {
    if child_parent != Some(host_uuid) {
        return Err(GraphError::ChildNotNestedInHost {
            child_uuid: child_uuid.to_string(),
            host_uuid: host_uuid.to_string(),
        });
    }

    if let Some(required) = required_trait {
        if !trait_satisfied(required, child_state) {
            return Err(GraphError::TraitMismatch {
                child_uuid: child_uuid.to_string(),
                required_trait: required.to_string(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
