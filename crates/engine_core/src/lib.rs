//! Core types shared by the controller crates.
//!
//! This crate provides the foundational types used across all systems:
//! - Transform and spatial components
//! - Fixed-step simulation time
//! - Collision layer masks for spatial queries

pub mod components;
pub mod layers;
pub mod time;
pub mod transform;

pub use components::*;
pub use layers::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec2, Vec3};
