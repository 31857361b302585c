//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the request payloads that mutate it

pub mod asset;
pub mod custom_state;
pub mod equipment_slot;
pub mod resource;
