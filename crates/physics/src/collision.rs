//! Collision groups and filtering.

use engine_core::LayerMask;
use rapier3d::prelude::*;

/// Collision groups for different body types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (floors, walls)
    Environment = 1 << 0,
    /// Overhead geometry the head can bump into
    Ceiling = 1 << 1,
    /// Player character
    Player = 1 << 2,
}

impl CollisionGroup {
    /// The layer mask holding just this group.
    pub fn mask(self) -> LayerMask {
        LayerMask(self as u32)
    }

    /// Membership/filter pair for environment.
    pub fn environment() -> InteractionGroups {
        InteractionGroups::new(Group::from_bits_retain(Self::Environment as u32), Group::ALL)
    }

    /// Membership/filter pair for ceilings.
    pub fn ceiling() -> InteractionGroups {
        InteractionGroups::new(Group::from_bits_retain(Self::Ceiling as u32), Group::ALL)
    }

    /// Membership/filter pair for the player.
    pub fn player() -> InteractionGroups {
        let membership = Group::from_bits_retain(Self::Player as u32);
        let filter = Group::from_bits_retain(Self::Environment as u32 | Self::Ceiling as u32);
        InteractionGroups::new(membership, filter)
    }
}

/// Query groups that hit colliders belonging to any layer in `mask`.
pub fn query_groups(mask: LayerMask) -> InteractionGroups {
    InteractionGroups::new(Group::ALL, Group::from_bits_retain(mask.bits()))
}
