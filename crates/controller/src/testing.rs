//! Test doubles for the controller's collaborators.

use engine_core::{LayerMask, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

use crate::probe::SpatialProbe;
use crate::projectiles::{ProjectileSpawn, ProjectileSpawner};

/// A flat floor at `y = floor` and an optional ceiling plane, with no walls.
#[derive(Debug, Clone)]
pub struct FlatProbe {
    pub position: Vec3,
    pub floor: Option<f32>,
    pub ceiling: Option<f32>,
    pub ground_layers: LayerMask,
    pub ceiling_layers: LayerMask,
    pub moves: Vec<Vec3>,
    pub impulses: Vec<Vec3>,
}

impl FlatProbe {
    pub fn on_floor() -> Self {
        Self {
            position: Vec3::ZERO,
            floor: Some(0.0),
            ceiling: None,
            ground_layers: LayerMask::layer(0),
            ceiling_layers: LayerMask::layer(1),
            moves: Vec::new(),
            impulses: Vec::new(),
        }
    }

    pub fn in_void() -> Self {
        Self {
            floor: None,
            ..Self::on_floor()
        }
    }
}

impl SpatialProbe for FlatProbe {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn check_sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        let hits_floor = mask.intersects(self.ground_layers)
            && self.floor.is_some_and(|y| center.y - radius <= y);
        let hits_ceiling = mask.intersects(self.ceiling_layers)
            && self.ceiling.is_some_and(|y| center.y + radius >= y);
        hits_floor || hits_ceiling
    }

    fn integrate_move(&mut self, displacement: Vec3, dt: f32) -> Vec3 {
        self.moves.push(displacement);
        let before = self.position;
        let mut after = before + displacement;
        if let Some(floor) = self.floor {
            after.y = after.y.max(floor);
        }
        self.position = after;
        if dt > 0.0 {
            (after - before) / dt
        } else {
            Vec3::ZERO
        }
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.impulses.push(impulse);
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

/// Records every spawn request; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpawner {
    pub spawned: Rc<RefCell<Vec<ProjectileSpawn>>>,
}

impl ProjectileSpawner for RecordingSpawner {
    fn spawn(&mut self, request: ProjectileSpawn) {
        self.spawned.borrow_mut().push(request);
    }
}
