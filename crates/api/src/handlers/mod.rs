pub mod assets;
pub mod containment;
pub mod resources;
