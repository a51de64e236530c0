//! The controller's view of the physics world.

use engine_core::{LayerMask, Vec3};
use physics::rapier3d::control::KinematicCharacterController;
use physics::{character_controller, CharacterBody, PhysicsWorld};

/// Overlap queries and body integration the controller needs from physics.
pub trait SpatialProbe {
    /// Feet position of the controlled body.
    fn position(&self) -> Vec3;

    /// Is a sphere at `center` with `radius` overlapping anything on `mask`?
    fn check_sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;

    /// Move the body by `displacement` over `dt` and return the velocity it actually achieved.
    fn integrate_move(&mut self, displacement: Vec3, dt: f32) -> Vec3;

    /// Push the body (N·s).
    fn apply_impulse(&mut self, impulse: Vec3);

    /// Teleport the body.
    fn set_position(&mut self, position: Vec3);
}

/// Mass used to turn impulses into velocity (kg).
pub const CHARACTER_MASS: f32 = 80.0;
/// Linear decay rate of impulse velocity per second; each move scales it by `1 - rate * dt`.
const IMPULSE_DAMPING: f32 = 4.0;

/// Rapier-backed probe owning the physics scene of a single controlled character.
pub struct RapierProbe {
    physics: PhysicsWorld,
    character: CharacterBody,
    mover: KinematicCharacterController,
    impulse_velocity: Vec3,
}

impl RapierProbe {
    /// Spawn a capsule character with its feet at `feet` inside `physics`.
    pub fn spawn(mut physics: PhysicsWorld, feet: Vec3, half_height: f32, radius: f32) -> Self {
        let character = physics.add_character(feet, half_height, radius);
        physics.update_query_pipeline();
        Self {
            physics,
            character,
            mover: character_controller(),
            impulse_velocity: Vec3::ZERO,
        }
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    pub fn character(&self) -> &CharacterBody {
        &self.character
    }

    /// Step the physics scene; applies the move scheduled by the last `integrate_move`.
    pub fn step(&mut self, dt: f32) {
        self.physics.step(dt);
    }
}

impl SpatialProbe for RapierProbe {
    fn position(&self) -> Vec3 {
        self.physics.character_feet(&self.character)
    }

    fn check_sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        self.physics
            .check_sphere(center, radius, mask, Some(self.character.rigid_body))
    }

    fn integrate_move(&mut self, displacement: Vec3, dt: f32) -> Vec3 {
        let push = self.impulse_velocity * dt;
        self.impulse_velocity *= (1.0 - IMPULSE_DAMPING * dt).max(0.0);
        if self.impulse_velocity.length_squared() < 1e-6 {
            self.impulse_velocity = Vec3::ZERO;
        }

        self.physics
            .move_character(&self.mover, &self.character, displacement + push, dt)
            .velocity(dt)
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.impulse_velocity += impulse / CHARACTER_MASS;
    }

    fn set_position(&mut self, position: Vec3) {
        let center = position + Vec3::Y * (self.character.half_height + self.character.radius);
        self.physics.set_body_position(self.character.rigid_body, center);
        self.impulse_velocity = Vec3::ZERO;
        self.physics.update_query_pipeline();
    }
}
