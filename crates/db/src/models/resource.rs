//! Resource pointer models and DTOs.

use demiurge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `nft_resources` table.
///
/// Resources are an unordered set per asset; `priority` is stored, not
/// computed, and lower values take precedence when a renderer picks one.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Resource {
    pub id: DbId,
    pub nft_uuid: String,
    pub resource_type: String,
    pub uri: String,
    pub priority: i32,
    pub context_tags: Vec<String>,
    pub created_at: Timestamp,
}

/// DTO for registering a resource. Duplicate `(resource_type, uri)` pairs
/// are permitted by design.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResource {
    pub resource_type: String,
    pub uri: String,
    pub priority: i32,
    pub context_tags: Option<Vec<String>>,
}
