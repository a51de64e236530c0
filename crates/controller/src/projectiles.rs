//! Projectile spawning and flight.

use engine_core::{Damage, Lifetime, Quat, Transform, Velocity, Vec3};
use hecs::{Entity, World};

/// Everything needed to create one projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub position: Vec3,
    /// Facing; forward (-Z) points along the flight direction.
    pub orientation: Quat,
    pub velocity: Vec3,
    /// Seconds until the projectile is destroyed.
    pub lifespan: f32,
    pub damage: f32,
}

/// Receives projectile spawn requests from the fire ability.
pub trait ProjectileSpawner {
    fn spawn(&mut self, request: ProjectileSpawn);
}

/// Tag component for projectile entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projectile;

/// Projectiles stored as ECS entities. Straight-line flight, despawned when the lifetime ends.
#[derive(Default)]
pub struct ProjectileSystem {
    world: World,
    live: Vec<Entity>,
}

impl ProjectileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of projectiles in flight.
    pub fn count(&self) -> usize {
        self.live.len()
    }

    /// Move projectiles and remove expired ones.
    pub fn update(&mut self, dt: f32) {
        for (_, (transform, velocity)) in self.world.query_mut::<(&mut Transform, &Velocity)>() {
            transform.translate(velocity.linear * dt);
        }

        let mut expired = Vec::new();
        for (entity, lifetime) in self.world.query_mut::<&mut Lifetime>() {
            if lifetime.update(dt) {
                expired.push(entity);
            }
        }

        for entity in expired {
            self.world.despawn(entity).ok();
            self.live.retain(|&e| e != entity);
        }
    }

    /// Positions of all projectiles in flight.
    pub fn positions(&self) -> Vec<Vec3> {
        self.world
            .query::<(&Transform, &Projectile)>()
            .iter()
            .map(|(_, (transform, _))| transform.position)
            .collect()
    }
}

impl ProjectileSpawner for ProjectileSystem {
    fn spawn(&mut self, request: ProjectileSpawn) {
        let entity = self.world.spawn((
            Projectile,
            Transform::from_position_rotation(request.position, request.orientation),
            Velocity::new(request.velocity),
            Lifetime::new(request.lifespan),
            Damage::new(request.damage),
        ));
        self.live.push(entity);
    }
}
