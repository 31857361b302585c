//! Demiurge asset service domain logic.
//!
//! Pure rules for the asset containment graph: nesting, equipping,
//! delegation, resource selection, and input validation. No I/O lives
//! here; the `demiurge-db` repositories fetch state, call into these
//! functions to enforce invariants, and persist the result.

pub mod containment;
pub mod delegation;
pub mod error;
pub mod resources;
pub mod types;
pub mod validation;
