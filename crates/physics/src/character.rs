//! Kinematic character bodies moved with Rapier's character controller.

use crate::collision::CollisionGroup;
use crate::PhysicsWorld;
use engine_core::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;

/// Handles for a capsule-shaped kinematic character.
#[derive(Debug, Clone, Copy)]
pub struct CharacterBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: ColliderHandle,
    pub half_height: f32,
    pub radius: f32,
}

/// Outcome of a character move.
#[derive(Debug, Clone, Copy)]
pub struct CharacterMove {
    /// Translation actually applied after collision resolution.
    pub translation: Vec3,
    /// Rapier's own grounded flag (informational; the controller runs its own probe).
    pub grounded: bool,
}

impl CharacterMove {
    /// Velocity implied by the applied translation.
    pub fn velocity(&self, dt: f32) -> Vec3 {
        if dt > 0.0 {
            self.translation / dt
        } else {
            Vec3::ZERO
        }
    }
}

/// Character controller settings shared by all characters.
pub fn character_controller() -> KinematicCharacterController {
    KinematicCharacterController {
        offset: CharacterLength::Absolute(0.01),
        autostep: Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(0.3),
            min_width: CharacterLength::Absolute(0.2),
            include_dynamic_bodies: false,
        }),
        snap_to_ground: None,
        ..Default::default()
    }
}

impl PhysicsWorld {
    /// Spawn a kinematic capsule whose feet rest at `feet`.
    pub fn add_character(&mut self, feet: Vec3, half_height: f32, radius: f32) -> CharacterBody {
        let center = feet + Vec3::Y * (half_height + radius);
        let rigid_body = self.add_kinematic_body(center);
        let collider =
            self.add_capsule_collider(rigid_body, half_height, radius, CollisionGroup::player());
        log::debug!("Character body spawned at {:?}", feet);
        CharacterBody {
            rigid_body,
            collider,
            half_height,
            radius,
        }
    }

    /// Resolve `desired` against the world and schedule the body's next position.
    /// The new position becomes visible after the next `step`.
    pub fn move_character(
        &mut self,
        controller: &KinematicCharacterController,
        character: &CharacterBody,
        desired: Vec3,
        dt: f32,
    ) -> CharacterMove {
        let Some(collider) = self.collider_set.get(character.collider) else {
            return CharacterMove {
                translation: Vec3::ZERO,
                grounded: false,
            };
        };

        let filter = QueryFilter::default()
            .exclude_sensors()
            .exclude_rigid_body(character.rigid_body)
            .groups(CollisionGroup::player());

        let corrected = controller.move_shape(
            dt,
            &self.rigid_body_set,
            &self.collider_set,
            &self.query_pipeline,
            collider.shape(),
            collider.position(),
            vector![desired.x, desired.y, desired.z],
            filter,
            |_| {},
        );

        let translation = Vec3::new(
            corrected.translation.x,
            corrected.translation.y,
            corrected.translation.z,
        );

        if let Some(body) = self.rigid_body_set.get_mut(character.rigid_body) {
            let next = body.translation() + corrected.translation;
            body.set_next_kinematic_translation(next);
        }

        CharacterMove {
            translation,
            grounded: corrected.grounded,
        }
    }

    /// Position of the character's feet.
    pub fn character_feet(&self, character: &CharacterBody) -> Vec3 {
        self.get_body_transform(character.rigid_body)
            .map(|t| t.position - Vec3::Y * (character.half_height + character.radius))
            .unwrap_or(Vec3::ZERO)
    }
}
