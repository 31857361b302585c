//! Custom state models and DTOs.

use demiurge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `custom_state` table: one mutable key/value pair, keys
/// unique per asset.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomStateEntry {
    pub id: DbId,
    pub nft_uuid: String,
    pub state_key: String,
    pub state_value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a custom-state entry.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertState {
    pub state_key: String,
    pub state_value: String,
}
