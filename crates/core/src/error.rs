use crate::types::DbId;

/// Generic domain error for validation and conflict cases that are not
/// specific to the containment graph.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// A rejected containment-graph operation.
///
/// Every variant names the precise invariant that was violated, so the
/// calling layer can map it to an HTTP status and a stable error code
/// without string matching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Asset {0} not found")]
    AssetNotFound(String),

    #[error("Equipment slot '{slot_name}' not found on asset {host_uuid}")]
    SlotNotFound {
        host_uuid: String,
        slot_name: String,
    },

    #[error("Resource {resource_id} not found on asset {nft_uuid}")]
    ResourceNotFound { nft_uuid: String, resource_id: DbId },

    #[error("State key '{state_key}' not found on asset {nft_uuid}")]
    StateKeyNotFound {
        nft_uuid: String,
        state_key: String,
    },

    #[error("Cannot nest asset {0} into itself")]
    SelfNesting(String),

    #[error("Asset {child_uuid} is already nested under {parent_uuid}")]
    AlreadyNested {
        child_uuid: String,
        parent_uuid: String,
    },

    #[error("Nesting {child_uuid} under {parent_uuid} would create a cycle")]
    CyclicNesting {
        parent_uuid: String,
        child_uuid: String,
    },

    #[error("Asset {child_uuid} is not nested under {parent_uuid}")]
    NotNested {
        child_uuid: String,
        parent_uuid: String,
    },

    #[error("Asset {child_uuid} is still equipped in {slot_count} slot(s)")]
    SlotOccupantReferenced { child_uuid: String, slot_count: i64 },

    #[error("Asset {child_uuid} is not nested in host {host_uuid}")]
    ChildNotNestedInHost {
        child_uuid: String,
        host_uuid: String,
    },

    #[error("Asset {child_uuid} does not carry required trait '{required_trait}'")]
    TraitMismatch {
        child_uuid: String,
        required_trait: String,
    },
}

impl GraphError {
    /// Stable machine-readable code for the error response body.
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::AssetNotFound(_) => "ASSET_NOT_FOUND",
            GraphError::SlotNotFound { .. } => "SLOT_NOT_FOUND",
            GraphError::ResourceNotFound { .. } => "RESOURCE_NOT_FOUND",
            GraphError::StateKeyNotFound { .. } => "STATE_KEY_NOT_FOUND",
            GraphError::SelfNesting(_) => "SELF_NESTING",
            GraphError::AlreadyNested { .. } => "ALREADY_NESTED",
            GraphError::CyclicNesting { .. } => "CYCLIC_NESTING",
            GraphError::NotNested { .. } => "NOT_NESTED",
            GraphError::SlotOccupantReferenced { .. } => "SLOT_OCCUPANT_REFERENCED",
            GraphError::ChildNotNestedInHost { .. } => "CHILD_NOT_NESTED_IN_HOST",
            GraphError::TraitMismatch { .. } => "TRAIT_MISMATCH",
        }
    }

    /// Whether this rejection is a missing-entity case (HTTP 404) rather
    /// than a constraint violation (HTTP 400).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GraphError::AssetNotFound(_)
                | GraphError::SlotNotFound { .. }
                | GraphError::ResourceNotFound { .. }
                | GraphError::StateKeyNotFound { .. }
        )
    }
}
