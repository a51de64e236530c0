//! Headless sandbox: runs one controller in a small rapier scene with scripted input.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use controller::{
    CameraPivot, ControllerConfig, ControllerEvent, PlayerController, PlayerRegistry,
    ProjectileSystem, RapierProbe, ShotResult, SpatialProbe, SpawnPoint,
};
use engine_core::{Time, Vec3};
use input::{ElementState, InputState, KeyCode, MouseButton};
use physics::{CollisionGroup, PhysicsWorld};

const CONFIG_PATH: &str = "controller.ron";
const RUN_SECONDS: f64 = 6.0;

/// Uneven render frame lengths fed into the fixed-step accumulator.
const FRAME_TIMES_MS: [u64; 4] = [10, 23, 16, 19];

/// Capsule dimensions of the controlled body.
const HALF_HEIGHT: f32 = 0.6;
const RADIUS: f32 = 0.3;

/// Height of the top of the capsule above its feet.
const HEAD_HEIGHT: f32 = 2.0 * (HALF_HEIGHT + RADIUS);

fn build_scene() -> PhysicsWorld {
    let mut physics = PhysicsWorld::new();
    physics.add_ground_plane();
    // Low slab over the first jump, underside at 2.4 m.
    physics.add_static_cuboid(
        Vec3::new(0.0, 2.6, -4.0),
        0.0,
        Vec3::new(3.0, 0.2, 2.5),
        CollisionGroup::ceiling(),
    );
    physics
}

/// Put the ceiling probe on top of the capsule.
fn fit_to_capsule(mut config: ControllerConfig) -> ControllerConfig {
    config.ceiling_offset = HEAD_HEIGHT;
    config
}

fn frame_time(frame: usize) -> Duration {
    Duration::from_millis(FRAME_TIMES_MS[frame % FRAME_TIMES_MS.len()])
}

/// Feed this frame's scripted input events.
fn script(input: &mut InputState, frame: u64, t: f64) {
    let key = |input: &mut InputState, code, down: bool| {
        let state = if down {
            ElementState::Pressed
        } else {
            ElementState::Released
        };
        input.process_keyboard(code, state);
    };

    match frame {
        1 => key(input, KeyCode::KeyW, true),
        60 | 150 => key(input, KeyCode::Space, true),
        61 | 151 => key(input, KeyCode::Space, false),
        120 => key(input, KeyCode::ShiftLeft, true),
        122 => key(input, KeyCode::ShiftLeft, false),
        240 => {
            key(input, KeyCode::KeyW, false);
            input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        }
        330 => input.process_mouse_button(MouseButton::Left, ElementState::Released),
        _ => {}
    }

    // Slow turn to the right while firing.
    if (4.0..5.5).contains(&t) {
        input.process_mouse_motion((1.5, 0.0));
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = Path::new(CONFIG_PATH);
    let config = ControllerConfig::load(config_path);
    if !config_path.exists() {
        config.save(config_path);
        log::info!("Wrote default config to {}", CONFIG_PATH);
    }
    let config = fit_to_capsule(config);

    let mut registry = PlayerRegistry::new();
    let slot = registry
        .join()
        .ok_or_else(|| anyhow::anyhow!("no free player slot"))?;
    log::info!(
        "Player slot {} on camera channel {:#b}",
        slot.index(),
        slot.channel_mask()
    );

    let probe = RapierProbe::spawn(build_scene(), Vec3::new(0.0, 0.05, 0.0), HALF_HEIGHT, RADIUS);
    let mut player = PlayerController::builder(config)
        .probe(probe)
        .spawner(ProjectileSystem::new())
        .camera_pivot(CameraPivot::default())
        .spawn_point(SpawnPoint::default())
        .build()?;

    player.subscribe(|event| match event {
        ControllerEvent::Shoot => log::debug!("Shoot"),
        ControllerEvent::EmptyAmmo => log::info!("Click: out of ammo"),
    });

    let mut time = Time::with_fixed_rate(60.0);
    let mut input = InputState::new();
    let mut shots = 0u32;
    let mut head_bumps = 0u32;
    let mut frame = 0usize;

    while time.elapsed_seconds() < RUN_SECONDS {
        time.accumulate(frame_time(frame));
        frame += 1;

        while time.should_fixed_update() {
            let dt = time.delta_seconds();
            input.begin_frame();
            script(&mut input, time.frame_count(), time.elapsed_seconds());

            let rising = player.vertical().vertical_velocity() > 0.0;
            let outcome = player.tick(dt, &input.snapshot());
            player.probe_mut().step(dt);
            player.spawner_mut().update(dt);

            if rising && player.vertical().vertical_velocity() == 0.0 {
                head_bumps += 1;
            }
            if let Some(ShotResult::Fired { projectiles }) = outcome.shot {
                shots += projectiles;
            }

            if time.frame_count() % 30 == 0 {
                let stats = player.stats();
                log::info!(
                    "t={:.2} pos={:.2?} grounded={} vy={:.2} speed={:.2} yaw={:.1} dash={:?} ammo={} in_flight={}",
                    time.elapsed_seconds(),
                    player.probe().position(),
                    player.is_grounded(),
                    player.vertical().vertical_velocity(),
                    player.locomotion().speed(),
                    player.orientation().yaw(),
                    player.dash().phase(),
                    stats.current_ammo,
                    player.spawner().count(),
                );
            }
        }
    }

    // A shove from an explosion, then respawn.
    player.apply_impulse(Vec3::new(0.0, 0.0, 400.0));
    let shove_end = time.elapsed_seconds() + 0.5;
    while time.elapsed_seconds() < shove_end {
        time.accumulate(frame_time(frame));
        frame += 1;
        while time.should_fixed_update() {
            let dt = time.delta_seconds();
            player.tick(dt, &Default::default());
            player.probe_mut().step(dt);
        }
    }
    log::info!("After impulse: {:.2?}", player.probe().position());

    player.respawn(Vec3::new(0.0, 0.05, 0.0));
    registry.leave(slot);

    let stats = player.into_stats();
    log::info!(
        "Done: {} projectiles fired, {} head bumps, {} ammo left, move speed {}",
        shots,
        head_bumps,
        stats.current_ammo,
        stats.move_speed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ceiling_hit(scene: &PhysicsWorld, config: &ControllerConfig, feet: Vec3) -> bool {
        scene.check_sphere(
            feet + Vec3::Y * config.ceiling_offset,
            config.ceiling_radius,
            config.ceiling_layers,
            None,
        )
    }

    #[test]
    fn slab_is_clear_standing_and_hit_jumping() {
        let mut scene = build_scene();
        scene.update_query_pipeline();
        let config = fit_to_capsule(ControllerConfig::default());

        let under_slab = Vec3::new(0.0, 0.0, -4.0);
        assert!(!ceiling_hit(&scene, &config, under_slab));
        assert!(ceiling_hit(&scene, &config, under_slab + Vec3::Y * 0.2));
        assert!(!ceiling_hit(&scene, &config, Vec3::new(0.0, 0.2, -12.0)));
    }

    #[test]
    fn default_offset_never_reaches_slab() {
        let mut scene = build_scene();
        scene.update_query_pipeline();
        let config = ControllerConfig::default();
        // Apex of a default jump.
        let apex = Vec3::new(0.0, config.jump_height, -4.0);
        assert!(!ceiling_hit(&scene, &config, apex));
    }

    #[test]
    fn uneven_frames_drive_whole_steps() {
        let mut time = Time::with_fixed_rate(60.0);
        let mut steps = 0;
        for frame in 0..FRAME_TIMES_MS.len() * 15 {
            time.accumulate(frame_time(frame));
            while time.should_fixed_update() {
                steps += 1;
            }
        }
        // 68 ms per cycle over 15 cycles is 1.02 s.
        assert_eq!(steps, 61);
        assert_eq!(time.frame_count(), 61);
    }
}
