//! Physics backend for the controller, built on Rapier3D.

pub mod character;
pub mod collision;
pub mod physics_world;
pub mod query;

pub use character::*;
pub use collision::*;
pub use physics_world::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
