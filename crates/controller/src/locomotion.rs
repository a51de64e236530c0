//! Horizontal movement: speed smoothing and displacement.

use engine_core::{Transform, Vec2, Vec3};

use crate::probe::SpatialProbe;
use crate::stats::StatsStore;

/// Half-width of the band around the target speed inside which speed snaps instead of easing.
pub const SPEED_OFFSET: f32 = 0.1;

/// Smoothed horizontal speed plus the last velocity the probe reported.
#[derive(Debug, Clone, Default)]
pub struct Locomotion {
    speed: f32,
    last_velocity: Vec3,
}

impl Locomotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Speed used for the most recent move.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Velocity the probe achieved on the most recent move.
    pub fn last_velocity(&self) -> Vec3 {
        self.last_velocity
    }

    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.last_velocity.x, 0.0, self.last_velocity.z).length()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Next speed given where the body is and where it is asked to go.
    pub fn smoothed_speed(
        current: f32,
        target: f32,
        input_magnitude: f32,
        speed_change_rate: f32,
        dt: f32,
    ) -> f32 {
        let wanted = target * input_magnitude;
        if current < wanted - SPEED_OFFSET || current > wanted + SPEED_OFFSET {
            let t = (dt * speed_change_rate).clamp(0.0, 1.0);
            let eased = current + (wanted - current) * t;
            // Three decimals keep tiny float drift from piling up across ticks.
            (eased * 1000.0).round() / 1000.0
        } else {
            wanted
        }
    }

    /// Move the body for one tick and return the displacement handed to the probe.
    ///
    /// `basis` supplies yaw: input x follows its flattened right vector, input y its flattened
    /// forward vector.
    pub fn update(
        &mut self,
        dt: f32,
        move_input: Vec2,
        analog_movement: bool,
        basis: &Transform,
        vertical_velocity: f32,
        stats: &StatsStore,
        probe: &mut dyn SpatialProbe,
    ) -> Vec3 {
        let target = if move_input == Vec2::ZERO {
            0.0
        } else {
            stats.move_speed
        };
        let input_magnitude = if analog_movement {
            move_input.length()
        } else {
            1.0
        };

        self.speed = Self::smoothed_speed(
            self.horizontal_speed(),
            target,
            input_magnitude,
            stats.tuning.speed_change_rate,
            dt,
        );

        let direction = (basis.flat_right() * move_input.x + basis.flat_forward() * move_input.y)
            .normalize_or_zero();

        let displacement =
            direction * (self.speed * dt) + Vec3::new(0.0, vertical_velocity, 0.0) * dt;

        self.last_velocity = probe.integrate_move(displacement, dt);
        log::trace!(
            "Move {:?} speed {:.3} -> velocity {:?}",
            displacement,
            self.speed,
            self.last_velocity
        );
        displacement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;
    use crate::testing::FlatProbe;
    use engine_core::Quat;

    const DT: f32 = 0.02;

    fn stats() -> StatsStore {
        StatsStore::from_config(ControllerConfig::default()).unwrap()
    }

    #[test]
    fn speed_eases_toward_target_and_rounds() {
        // 0 -> 5 at rate 10 over 0.02 s covers a fifth of the gap.
        let s = Locomotion::smoothed_speed(0.0, 5.0, 1.0, 10.0, DT);
        assert_eq!(s, 1.0);
        let s = Locomotion::smoothed_speed(1.0, 5.0, 1.0, 10.0, 0.0123);
        assert_eq!(s, (1.492f32 * 1000.0).round() / 1000.0);
    }

    #[test]
    fn speed_snaps_inside_band() {
        assert_eq!(Locomotion::smoothed_speed(4.95, 5.0, 1.0, 10.0, DT), 5.0);
        assert_eq!(Locomotion::smoothed_speed(5.08, 5.0, 1.0, 10.0, DT), 5.0);
    }

    #[test]
    fn analog_input_scales_target() {
        // Half deflection aims for 2.5; already within the band, so it snaps there.
        assert_eq!(Locomotion::smoothed_speed(2.45, 5.0, 0.5, 10.0, DT), 2.5);
        // From rest the easing heads for 2.5 rather than 5.
        let s = Locomotion::smoothed_speed(0.0, 5.0, 0.5, 10.0, DT);
        assert_eq!(s, 0.5);
    }

    #[test]
    fn half_stick_settles_at_half_speed() {
        let stats = stats();
        let mut probe = FlatProbe::on_floor();
        let mut locomotion = Locomotion::new();
        let half = Vec2::new(0.0, 0.5);

        let mut speeds = Vec::new();
        for _ in 0..200 {
            locomotion.update(DT, half, true, &Transform::default(), 0.0, &stats, &mut probe);
            speeds.push(locomotion.speed());
        }
        for (i, speed) in speeds.iter().enumerate().skip(150) {
            assert_eq!(*speed, 2.5, "tick {}", i);
        }
        assert!((locomotion.horizontal_speed() - 2.5).abs() < 1e-3);
    }

    #[test]
    fn large_dt_does_not_overshoot() {
        assert_eq!(Locomotion::smoothed_speed(0.0, 5.0, 1.0, 10.0, 1.0), 5.0);
    }

    #[test]
    fn forward_input_moves_along_yaw() {
        let stats = stats();
        let mut probe = FlatProbe::on_floor();
        let mut locomotion = Locomotion::new();
        // Facing -X after a quarter turn left.
        let basis = Transform::from_position_rotation(
            Vec3::ZERO,
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );

        for _ in 0..100 {
            locomotion.update(DT, Vec2::Y, false, &basis, 0.0, &stats, &mut probe);
        }

        assert_eq!(locomotion.speed(), 5.0);
        assert!(probe.position.x < -5.0);
        assert!(probe.position.z.abs() < 1e-3);
        assert!((locomotion.horizontal_speed() - 5.0).abs() < 1e-3);
    }

    #[test]
    fn zero_input_gives_pure_vertical_displacement() {
        let stats = stats();
        let mut probe = FlatProbe::in_void();
        let mut locomotion = Locomotion::new();
        let d = locomotion.update(DT, Vec2::ZERO, false, &Transform::default(), -3.0, &stats, &mut probe);
        assert_eq!(d.x, 0.0);
        assert_eq!(d.z, 0.0);
        assert!((d.y + 3.0 * DT).abs() < 1e-6);
        assert!(!d.is_nan());
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let stats = stats();
        let mut probe = FlatProbe::on_floor();
        let mut locomotion = Locomotion::new();
        for _ in 0..100 {
            locomotion.update(DT, Vec2::new(1.0, 1.0), false, &Transform::default(), 0.0, &stats, &mut probe);
        }
        let last = *probe.moves.last().unwrap();
        assert!((Vec3::new(last.x, 0.0, last.z).length() - 5.0 * DT).abs() < 1e-4);
    }

    #[test]
    fn moving_speed_follows_stats_move_speed() {
        let mut stats = stats();
        let mut probe = FlatProbe::on_floor();
        let mut locomotion = Locomotion::new();
        for _ in 0..100 {
            locomotion.update(DT, Vec2::Y, false, &Transform::default(), 0.0, &stats, &mut probe);
        }
        stats.move_speed = 12.5;
        for _ in 0..100 {
            locomotion.update(DT, Vec2::Y, false, &Transform::default(), 0.0, &stats, &mut probe);
        }
        assert_eq!(locomotion.speed(), 12.5);
    }
}
