//! Equipment slot models and DTOs.

use demiurge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `equipment_slots` table. Slot names are unique per host.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EquipmentSlot {
    pub id: DbId,
    pub nft_uuid: String,
    pub slot_name: String,
    pub equipped_child_uuid: Option<String>,
    pub required_trait: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for declaring a slot at asset creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEquipmentSlot {
    pub slot_name: String,
    pub required_trait: Option<String>,
}

/// DTO for equipping a nested child into a slot.
#[derive(Debug, Clone, Deserialize)]
pub struct EquipChild {
    pub slot_name: String,
    pub child_uuid: String,
}
