//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-step graph operations
//! (nest, un-nest, equip) run inside a single transaction with row-level
//! locks so concurrent calls on the same assets serialize.

pub mod asset_repo;
pub mod containment_repo;
pub mod resource_repo;
pub mod state_repo;

pub use asset_repo::AssetRepo;
pub use containment_repo::ContainmentRepo;
pub use resource_repo::ResourceRepo;
pub use state_repo::StateRepo;
