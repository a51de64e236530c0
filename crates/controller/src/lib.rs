//! First-person locomotion and action controller.
//!
//! One [`PlayerController`] per controlled entity. Each tick it turns a [`ControllerInput`]
//! snapshot into look rotation, grounding and jumping, smoothed horizontal movement, a timed
//! dash and rate-limited burst fire. Physics and projectile creation sit behind the
//! [`SpatialProbe`] and [`ProjectileSpawner`] traits.

pub mod config;
pub mod dash;
pub mod error;
pub mod events;
pub mod fire;
pub mod locomotion;
pub mod orientation;
pub mod player;
pub mod probe;
pub mod projectiles;
pub mod registry;
pub mod stats;
pub mod timer;
pub mod vertical;

#[cfg(test)]
mod testing;

pub use config::*;
pub use dash::*;
pub use error::*;
pub use events::*;
pub use fire::*;
pub use locomotion::*;
pub use orientation::*;
pub use player::*;
pub use probe::*;
pub use projectiles::*;
pub use registry::*;
pub use stats::*;
pub use timer::*;
pub use vertical::*;

pub use input::{ControllerInput, LookDevice};
