//! Rate-limited, ammo-gated burst fire with per-shot spread.

use engine_core::Transform;
use glam::{EulerRot, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::events::{ControllerEvent, Notifier};
use crate::projectiles::{ProjectileSpawn, ProjectileSpawner};
use crate::stats::StatsStore;
use crate::timer::RateLimiter;

/// Outcome of a fire request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotResult {
    /// A burst of this many projectiles left the muzzle.
    Fired { projectiles: u32 },
    /// Inside the fire-rate window; dropped silently.
    RateLimited,
    /// Not enough ammo for a whole burst; `EmptyAmmo` was raised.
    EmptyAmmo,
}

/// Rotate `base` by a random yaw and pitch, each uniform in `[-spread_deg, spread_deg]`.
///
/// The offsets compose like Euler angles (pitch, yaw, 0): pitch about X applied first, then
/// yaw about Y. Zero spread returns the normalized base direction untouched.
pub fn spread_direction(base: Vec3, spread_deg: f32, rng: &mut impl Rng) -> Vec3 {
    if spread_deg <= 0.0 {
        return base.normalize_or_zero();
    }
    let yaw = rng.gen_range(-spread_deg..=spread_deg).to_radians();
    let pitch = rng.gen_range(-spread_deg..=spread_deg).to_radians();
    let rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
    (rotation * base).normalize_or_zero()
}

/// Fire state: last shot timestamp and the spread RNG.
#[derive(Debug, Clone)]
pub struct FireAbility {
    rate: RateLimiter,
    rng: StdRng,
}

impl Default for FireAbility {
    fn default() -> Self {
        Self::new()
    }
}

impl FireAbility {
    pub fn new() -> Self {
        Self {
            rate: RateLimiter::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic spread, for replays and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rate: RateLimiter::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Timestamp of the last accepted burst; zero before the first one.
    pub fn last_fire_time(&self) -> f64 {
        self.rate.last()
    }

    /// Restart the fire-rate window from time zero.
    pub fn reset(&mut self) {
        self.rate.clear();
    }

    /// Try to fire one burst at time `now` from `muzzle`, aiming along `aim`.
    pub fn try_fire(
        &mut self,
        now: f64,
        muzzle: &Transform,
        aim: Vec3,
        stats: &mut StatsStore,
        spawner: &mut dyn ProjectileSpawner,
        notifier: &mut Notifier,
    ) -> ShotResult {
        if !self.rate.ready(now, stats.tuning.fire_rate) {
            return ShotResult::RateLimited;
        }

        if !stats.consume_burst() {
            log::debug!(
                "Empty ammo: {} left, burst needs {}",
                stats.current_ammo,
                stats.tuning.bullet_count
            );
            notifier.emit(ControllerEvent::EmptyAmmo);
            return ShotResult::EmptyAmmo;
        }
        self.rate.record(now);

        let tuning = &stats.tuning;
        let base = aim.normalize_or_zero();
        for _ in 0..tuning.bullet_count {
            let direction = spread_direction(base, tuning.bullet_spread, &mut self.rng);
            spawner.spawn(ProjectileSpawn {
                position: muzzle.position,
                orientation: Quat::from_rotation_arc(Vec3::NEG_Z, direction),
                velocity: direction * tuning.bullet_speed,
                lifespan: tuning.bullet_life_span,
                damage: tuning.bullet_damage,
            });
        }

        notifier.emit(ControllerEvent::Shoot);
        log::debug!("Fired {} ({} ammo left)", tuning.bullet_count, stats.current_ammo);
        ShotResult::Fired {
            projectiles: tuning.bullet_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;
    use crate::testing::RecordingSpawner;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn stats(fire_rate: f32, bullet_count: u32, max_ammo: u32, spread: f32) -> StatsStore {
        StatsStore::from_config(ControllerConfig {
            fire_rate,
            bullet_count,
            max_ammo,
            bullet_spread: spread,
            ..Default::default()
        })
        .unwrap()
    }

    fn counting_notifier() -> (Notifier, Rc<RefCell<Vec<ControllerEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();
        let sink = Rc::clone(&events);
        notifier.subscribe(move |e| sink.borrow_mut().push(e));
        (notifier, events)
    }

    #[test]
    fn ten_bursts_of_three_empty_the_magazine() {
        let mut stats = stats(0.0, 3, 30, 5.0);
        let mut fire = FireAbility::with_seed(7);
        let mut spawner = RecordingSpawner::default();
        let (mut notifier, events) = counting_notifier();
        let muzzle = Transform::default();

        for i in 0..10 {
            let result = fire.try_fire(0.0, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
            assert_eq!(result, ShotResult::Fired { projectiles: 3 }, "shot {}", i);
            assert_eq!(stats.current_ammo, 30 - 3 * (i + 1));
        }
        assert_eq!(stats.current_ammo, 0);

        let result = fire.try_fire(0.0, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
        assert_eq!(result, ShotResult::EmptyAmmo);
        assert_eq!(spawner.spawned.borrow().len(), 30);
        assert_eq!(events.borrow().len(), 11);
        assert_eq!(events.borrow().last(), Some(&ControllerEvent::EmptyAmmo));
    }

    #[test]
    fn partial_burst_is_not_fired() {
        let mut stats = stats(0.0, 4, 6, 0.0);
        let mut fire = FireAbility::with_seed(1);
        let mut spawner = RecordingSpawner::default();
        let (mut notifier, _) = counting_notifier();
        let muzzle = Transform::default();

        assert!(matches!(
            fire.try_fire(0.0, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier),
            ShotResult::Fired { .. }
        ));
        assert_eq!(
            fire.try_fire(0.0, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier),
            ShotResult::EmptyAmmo
        );
        assert_eq!(stats.current_ammo, 2);
    }

    #[test]
    fn second_request_inside_window_is_dropped() {
        let mut stats = stats(0.2, 1, 30, 0.0);
        let mut fire = FireAbility::with_seed(2);
        let mut spawner = RecordingSpawner::default();
        let (mut notifier, events) = counting_notifier();
        let muzzle = Transform::default();

        let first = fire.try_fire(1.0, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
        let second = fire.try_fire(1.15, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
        assert!(matches!(first, ShotResult::Fired { .. }));
        assert_eq!(second, ShotResult::RateLimited);
        assert_eq!(stats.current_ammo, 29);
        assert_eq!(*events.borrow(), vec![ControllerEvent::Shoot]);
        assert_eq!(fire.last_fire_time(), 1.0);

        let third = fire.try_fire(1.2, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
        assert!(matches!(third, ShotResult::Fired { .. }));
    }

    #[test]
    fn no_shot_before_first_window_elapses() {
        let mut stats = stats(0.2, 1, 30, 0.0);
        let mut fire = FireAbility::with_seed(9);
        let mut spawner = RecordingSpawner::default();
        let (mut notifier, events) = counting_notifier();
        let muzzle = Transform::default();

        let early = fire.try_fire(0.1, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
        assert_eq!(early, ShotResult::RateLimited);
        assert!(events.borrow().is_empty());
        assert_eq!(stats.current_ammo, 30);

        let on_time = fire.try_fire(0.2, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
        assert!(matches!(on_time, ShotResult::Fired { .. }));
    }

    #[test]
    fn shot_just_inside_window_is_dropped() {
        let mut stats = stats(0.2, 1, 30, 0.0);
        let mut fire = FireAbility::with_seed(10);
        let mut spawner = RecordingSpawner::default();
        let (mut notifier, _) = counting_notifier();
        let muzzle = Transform::default();

        fire.try_fire(1.0, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
        let result =
            fire.try_fire(1.2 - 1e-5, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
        assert_eq!(result, ShotResult::RateLimited);
        assert_eq!(spawner.spawned.borrow().len(), 1);
    }

    #[test]
    fn rate_limit_is_checked_before_ammo() {
        let mut stats = stats(0.5, 1, 1, 0.0);
        let mut fire = FireAbility::with_seed(3);
        let mut spawner = RecordingSpawner::default();
        let (mut notifier, events) = counting_notifier();
        let muzzle = Transform::default();

        fire.try_fire(1.0, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
        let result = fire.try_fire(1.1, &muzzle, Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
        assert_eq!(result, ShotResult::RateLimited);
        assert_eq!(*events.borrow(), vec![ControllerEvent::Shoot]);
    }

    #[test]
    fn spawn_requests_carry_stats() {
        let mut stats = StatsStore::from_config(ControllerConfig {
            bullet_spread: 0.0,
            bullet_speed: 40.0,
            bullet_life_span: 2.5,
            bullet_damage: 12.0,
            ..Default::default()
        })
        .unwrap();
        let mut fire = FireAbility::with_seed(4);
        let mut spawner = RecordingSpawner::default();
        let (mut notifier, _) = counting_notifier();
        let muzzle = Transform::from_position(Vec3::new(1.0, 1.5, 0.0));

        fire.try_fire(1.0, &muzzle, Vec3::X, &mut stats, &mut spawner, &mut notifier);
        let spawned = spawner.spawned.borrow();
        let shot = spawned[0];
        assert_eq!(shot.position, Vec3::new(1.0, 1.5, 0.0));
        assert_eq!(shot.velocity, Vec3::X * 40.0);
        assert_eq!(shot.lifespan, 2.5);
        assert_eq!(shot.damage, 12.0);
        assert!((shot.orientation * Vec3::NEG_Z - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn zero_spread_keeps_base_direction_exactly() {
        let mut rng = StdRng::seed_from_u64(5);
        let base = Vec3::new(0.3, -0.2, -1.0).normalize();
        for _ in 0..16 {
            assert_eq!(spread_direction(base, 0.0, &mut rng), base.normalize_or_zero());
        }
    }

    #[test]
    fn spread_stays_inside_cone() {
        let mut rng = StdRng::seed_from_u64(6);
        let spread = 5.0f32;
        let level = Vec3::NEG_Z;
        let max_level = (spread * std::f32::consts::SQRT_2).to_radians() + 1e-4;
        let tilted = Vec3::new(0.4, 0.6, -0.7).normalize();
        let max_any = (2.0 * spread).to_radians() + 1e-4;

        let mut distinct = 0;
        let mut previous = level;
        for _ in 0..500 {
            let d = spread_direction(level, spread, &mut rng);
            assert!((d.length() - 1.0).abs() < 1e-5);
            assert!(d.angle_between(level) <= max_level);
            if d != previous {
                distinct += 1;
            }
            previous = d;

            let t = spread_direction(tilted, spread, &mut rng);
            assert!(t.angle_between(tilted) <= max_any);
        }
        assert!(distinct > 490, "each shot draws fresh offsets");
    }

    #[test]
    fn burst_directions_are_independent() {
        let mut stats = stats(0.0, 8, 30, 5.0);
        let mut fire = FireAbility::with_seed(8);
        let mut spawner = RecordingSpawner::default();
        let (mut notifier, _) = counting_notifier();

        fire.try_fire(0.0, &Transform::default(), Vec3::NEG_Z, &mut stats, &mut spawner, &mut notifier);
        let spawned = spawner.spawned.borrow();
        assert_eq!(spawned.len(), 8);
        let first = spawned[0].velocity;
        assert!(spawned.iter().skip(1).any(|s| s.velocity != first));
    }
}
