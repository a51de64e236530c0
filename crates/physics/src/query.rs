//! Shape queries used for ground and ceiling detection.

use crate::collision::query_groups;
use crate::PhysicsWorld;
use engine_core::{LayerMask, Vec3};
use rapier3d::prelude::*;

impl PhysicsWorld {
    /// Check whether a sphere overlaps any non-sensor collider on the given layers.
    /// Colliders attached to `exclude` are ignored.
    pub fn check_sphere(
        &self,
        center: Vec3,
        radius: f32,
        mask: LayerMask,
        exclude: Option<RigidBodyHandle>,
    ) -> bool {
        if mask.is_empty() || radius <= 0.0 {
            return false;
        }

        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y, center.z);
        let mut filter = QueryFilter::default()
            .exclude_sensors()
            .groups(query_groups(mask));
        if let Some(body) = exclude {
            filter = filter.exclude_rigid_body(body);
        }

        self.query_pipeline
            .intersection_with_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &shape_pos,
                &shape,
                filter,
            )
            .is_some()
    }
}
