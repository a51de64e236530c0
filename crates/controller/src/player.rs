//! The per-entity controller: runs orientation, vertical motion, locomotion, dash and fire
//! once per tick, in that order.

use engine_core::{Transform, Vec3};
use input::ControllerInput;

use crate::config::ControllerConfig;
use crate::dash::{DashAbility, DashTrigger};
use crate::error::ConfigError;
use crate::events::{ControllerEvent, Notifier, SubscriptionId};
use crate::fire::{FireAbility, ShotResult};
use crate::locomotion::Locomotion;
use crate::orientation::Orientation;
use crate::probe::SpatialProbe;
use crate::projectiles::ProjectileSpawner;
use crate::stats::StatsStore;
use crate::vertical::VerticalMotion;

/// Camera mount, relative to the body's feet. Receives pitch only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPivot {
    pub offset: Vec3,
}

impl Default for CameraPivot {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 1.6, 0.0),
        }
    }
}

/// Muzzle, relative to the camera pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub offset: Vec3,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.2, -0.15, -0.5),
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Displacement requested from the probe.
    pub displacement: Vec3,
    /// Set when dash input was held this tick.
    pub dash: Option<DashTrigger>,
    /// Set when fire input was held this tick.
    pub shot: Option<ShotResult>,
}

/// Assembles a [`PlayerController`]. Every collaborator is required.
pub struct PlayerControllerBuilder<P, S> {
    config: ControllerConfig,
    probe: Option<P>,
    spawner: Option<S>,
    camera_pivot: Option<CameraPivot>,
    spawn_point: Option<SpawnPoint>,
    orientation: Orientation,
    seed: Option<u64>,
}

impl<P: SpatialProbe, S: ProjectileSpawner> PlayerControllerBuilder<P, S> {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            probe: None,
            spawner: None,
            camera_pivot: None,
            spawn_point: None,
            orientation: Orientation::default(),
            seed: None,
        }
    }

    pub fn probe(mut self, probe: P) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn spawner(mut self, spawner: S) -> Self {
        self.spawner = Some(spawner);
        self
    }

    pub fn camera_pivot(mut self, pivot: CameraPivot) -> Self {
        self.camera_pivot = Some(pivot);
        self
    }

    pub fn spawn_point(mut self, spawn_point: SpawnPoint) -> Self {
        self.spawn_point = Some(spawn_point);
        self
    }

    /// Initial yaw and pitch in degrees.
    pub fn facing(mut self, yaw: f32, pitch: f32) -> Self {
        self.orientation = Orientation::new(yaw, pitch);
        self
    }

    /// Seed the spread RNG.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<PlayerController<P, S>, ConfigError> {
        let probe = self.probe.ok_or(ConfigError::MissingProbe)?;
        let camera_pivot = self.camera_pivot.ok_or(ConfigError::MissingCameraPivot)?;
        let spawn_point = self.spawn_point.ok_or(ConfigError::MissingSpawnPoint)?;
        let spawner = self.spawner.ok_or(ConfigError::MissingProjectileSpawner)?;
        let stats = StatsStore::from_config(self.config)?;

        let fire = match self.seed {
            Some(seed) => FireAbility::with_seed(seed),
            None => FireAbility::new(),
        };

        log::info!(
            "Controller ready at {:?}: speed {}, ammo {}/{}",
            probe.position(),
            stats.move_speed,
            stats.current_ammo,
            stats.tuning.max_ammo
        );

        Ok(PlayerController {
            vertical: VerticalMotion::new(&stats),
            locomotion: Locomotion::new(),
            dash: DashAbility::new(),
            fire,
            orientation: self.orientation,
            notifier: Notifier::new(),
            jump_requested: false,
            clock: 0.0,
            stats,
            probe,
            spawner,
            camera_pivot,
            spawn_point,
        })
    }
}

/// First-person controller for one entity.
pub struct PlayerController<P, S> {
    stats: StatsStore,
    probe: P,
    spawner: S,
    camera_pivot: CameraPivot,
    spawn_point: SpawnPoint,
    orientation: Orientation,
    vertical: VerticalMotion,
    locomotion: Locomotion,
    dash: DashAbility,
    fire: FireAbility,
    notifier: Notifier,
    jump_requested: bool,
    /// Seconds simulated so far.
    clock: f64,
}

impl<P: SpatialProbe, S: ProjectileSpawner> PlayerController<P, S> {
    pub fn builder(config: ControllerConfig) -> PlayerControllerBuilder<P, S> {
        PlayerControllerBuilder::new(config)
    }

    /// Advance the controller by `dt` seconds.
    pub fn tick(&mut self, dt: f32, input: &ControllerInput) -> TickOutcome {
        let dt = dt.max(0.0);
        self.clock += dt as f64;

        self.orientation
            .update(dt, input.look_axis, input.look_device, &self.stats);

        self.jump_requested |= input.jump;
        let vertical_velocity =
            self.vertical
                .update(dt, &mut self.jump_requested, &self.stats, &self.probe);

        let basis = self.body_transform();
        let displacement = self.locomotion.update(
            dt,
            input.move_axis,
            input.analog_movement,
            &basis,
            vertical_velocity,
            &self.stats,
            &mut self.probe,
        );

        self.dash.advance(dt, &mut self.stats);
        let dash = input.dash.then(|| self.dash.try_trigger(&mut self.stats));

        let shot = if input.fire {
            let camera = self.camera_transform();
            let muzzle = camera.mul_transform(&Transform::from_position(self.spawn_point.offset));
            Some(self.fire.try_fire(
                self.clock,
                &muzzle,
                camera.forward(),
                &mut self.stats,
                &mut self.spawner,
                &mut self.notifier,
            ))
        } else {
            None
        };

        TickOutcome {
            displacement,
            dash,
            shot,
        }
    }

    /// Feet position with yaw applied.
    pub fn body_transform(&self) -> Transform {
        Transform::from_position_rotation(self.probe.position(), self.orientation.body_rotation())
    }

    /// World transform of the camera pivot: body yaw, then pivot offset and pitch.
    pub fn camera_transform(&self) -> Transform {
        let local = Transform::from_position_rotation(
            self.camera_pivot.offset,
            self.orientation.pivot_rotation(),
        );
        self.body_transform().mul_transform(&local)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(ControllerEvent) + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Push the body; the probe decides how the impulse plays out.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.probe.apply_impulse(impulse);
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.stats.take_damage(amount);
    }

    pub fn heal(&mut self, amount: f32) {
        self.stats.heal(amount);
    }

    pub fn refill_ammo(&mut self) {
        self.stats.refill_ammo();
    }

    pub fn add_ammo(&mut self, amount: u32) {
        self.stats.add_ammo(amount);
    }

    /// Move to `position` and reset health, ammo, motion and abilities. Facing is kept.
    pub fn respawn(&mut self, position: Vec3) {
        self.dash.reset(&mut self.stats);
        self.stats.reset();
        self.vertical.reset(&self.stats);
        self.locomotion.reset();
        self.fire.reset();
        self.jump_requested = false;
        self.probe.set_position(position);
        log::info!("Respawned at {:?}", position);
    }

    /// Tear the controller down and hand back its stats, with any dash speed boost removed.
    pub fn into_stats(mut self) -> StatsStore {
        self.dash.reset(&mut self.stats);
        self.stats
    }

    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn vertical(&self) -> &VerticalMotion {
        &self.vertical
    }

    pub fn locomotion(&self) -> &Locomotion {
        &self.locomotion
    }

    pub fn dash(&self) -> &DashAbility {
        &self.dash
    }

    pub fn fire(&self) -> &FireAbility {
        &self.fire
    }

    pub fn is_grounded(&self) -> bool {
        self.vertical.is_grounded()
    }

    /// A jump request is waiting for the jump timeout.
    pub fn jump_pending(&self) -> bool {
        self.jump_requested
    }

    pub fn elapsed(&self) -> f64 {
        self.clock
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn spawner_mut(&mut self) -> &mut S {
        &mut self.spawner
    }
}
