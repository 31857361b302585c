//! Asset row models and DTOs.

use std::collections::BTreeMap;

use demiurge_core::types::{BlockNumber, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::equipment_slot::CreateEquipmentSlot;
use crate::models::resource::CreateResource;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `nft_assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub creator_account: String,
    pub owner_account: String,
    /// Owner at the moment this asset was last nested; restored on un-nest.
    pub owner_before_nesting: Option<String>,
    pub class_id: i32,
    pub level: i32,
    pub experience_points: i64,
    pub durability: i32,
    pub kill_count: i64,
    pub parent_uuid: Option<String>,
    pub delegated_user: Option<String>,
    pub delegation_expires_at_block: Option<BlockNumber>,
    pub delegated_at_block: Option<BlockNumber>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Asset with a child-count aggregate, for list/search results.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetWithChildrenCount {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub creator_account: String,
    pub owner_account: String,
    pub owner_before_nesting: Option<String>,
    pub class_id: i32,
    pub level: i32,
    pub experience_points: i64,
    pub durability: i32,
    pub kill_count: i64,
    pub parent_uuid: Option<String>,
    pub delegated_user: Option<String>,
    pub delegation_expires_at_block: Option<BlockNumber>,
    pub delegated_at_block: Option<BlockNumber>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Number of assets directly nested under this one.
    pub children_count: i64,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a new asset, with optional initial resources, slots,
/// and custom state applied in the same transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub uuid: String,
    pub name: String,
    pub creator_account: String,
    pub owner_account: String,
    pub description: Option<String>,
    pub class_id: Option<i32>,
    #[serde(default)]
    pub resources: Vec<CreateResource>,
    #[serde(default)]
    pub equipment_slots: Vec<CreateEquipmentSlot>,
    #[serde(default)]
    pub custom_state: BTreeMap<String, String>,
}

/// DTO for a field-level asset update. All fields optional; at least one
/// must be present.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAsset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner_account: Option<String>,
    pub experience_points: Option<i64>,
    pub level: Option<i32>,
    pub durability: Option<i32>,
    pub kill_count: Option<i64>,
    pub class_id: Option<i32>,
}

impl UpdateAsset {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.owner_account.is_none()
            && self.experience_points.is_none()
            && self.level.is_none()
            && self.durability.is_none()
            && self.kill_count.is_none()
            && self.class_id.is_none()
    }
}

/// Query parameters for listing/searching assets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetSearchParams {
    /// Filter by owner account (exact match).
    pub owner: Option<String>,
    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,
    /// `true` = only nested assets, `false` = only roots.
    pub has_parent: Option<bool>,
    /// `true` = only assets with an active delegated user set.
    pub is_delegated: Option<bool>,
    /// Maximum results (default 50, max 100).
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

/// DTO for setting a delegation.
#[derive(Debug, Clone, Deserialize)]
pub struct DelegateAsset {
    pub delegated_user: String,
    pub expires_at_block: Option<BlockNumber>,
    pub current_block: Option<BlockNumber>,
}
