//! Controller tuning. Loaded from a RON file at startup.

use engine_core::LayerMask;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// How look input is scaled into degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookMode {
    /// Every device is treated as a rate: `angle += axis * rotation_speed * dt`.
    FrameScaled,
    /// Pointer deltas are applied as-is, stick input is scaled by `dt`.
    #[default]
    DeviceScaled,
}

/// Tunable parameters for one controlled entity. Angles are in degrees, times in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    #[serde(default = "default_max_health")]
    pub max_health: f32,

    /// Baseline walking speed (m/s).
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "default_dash_multiplier")]
    pub dash_multiplier: f32,
    #[serde(default = "default_dash_duration")]
    pub dash_duration: f32,
    /// Time from dash start until the next dash is allowed.
    #[serde(default = "default_dash_cooldown")]
    pub dash_cooldown: f32,
    /// Look sensitivity.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    #[serde(default)]
    pub look_mode: LookMode,
    /// How quickly horizontal speed approaches its target.
    #[serde(default = "default_speed_change_rate")]
    pub speed_change_rate: f32,

    #[serde(default = "default_jump_height")]
    pub jump_height: f32,
    /// Vertical acceleration; negative pulls down.
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    /// Delay on the ground before another jump is allowed.
    #[serde(default = "default_jump_timeout")]
    pub jump_timeout: f32,
    /// Time in the air before the entity counts as falling.
    #[serde(default = "default_fall_timeout")]
    pub fall_timeout: f32,
    /// Gravity stops accumulating once vertical velocity reaches this.
    #[serde(default = "default_terminal_velocity")]
    pub terminal_velocity: f32,

    /// Ground probe centre, added to the feet position along Y.
    #[serde(default = "default_grounded_offset")]
    pub grounded_offset: f32,
    #[serde(default = "default_probe_radius")]
    pub grounded_radius: f32,
    #[serde(default = "default_ground_layers")]
    pub ground_layers: LayerMask,
    /// Ceiling probe centre, added to the feet position along Y.
    #[serde(default = "default_ceiling_offset")]
    pub ceiling_offset: f32,
    #[serde(default = "default_probe_radius")]
    pub ceiling_radius: f32,
    #[serde(default = "default_ceiling_layers")]
    pub ceiling_layers: LayerMask,

    /// Highest camera pitch.
    #[serde(default = "default_top_clamp")]
    pub top_clamp: f32,
    /// Lowest camera pitch.
    #[serde(default = "default_bottom_clamp")]
    pub bottom_clamp: f32,

    #[serde(default = "default_bullet_damage")]
    pub bullet_damage: f32,
    #[serde(default = "default_bullet_speed")]
    pub bullet_speed: f32,
    #[serde(default = "default_bullet_life_span")]
    pub bullet_life_span: f32,
    /// Minimum time between bursts.
    #[serde(default = "default_fire_rate")]
    pub fire_rate: f32,
    /// Maximum per-axis deviation of each shot.
    #[serde(default = "default_bullet_spread")]
    pub bullet_spread: f32,
    /// Projectiles per burst; also the ammo cost of a burst.
    #[serde(default = "default_bullet_count")]
    pub bullet_count: u32,
    #[serde(default = "default_max_ammo")]
    pub max_ammo: u32,
}

fn default_max_health() -> f32 {
    100.0
}
fn default_move_speed() -> f32 {
    5.0
}
fn default_dash_multiplier() -> f32 {
    2.5
}
fn default_dash_duration() -> f32 {
    0.2
}
fn default_dash_cooldown() -> f32 {
    1.0
}
fn default_rotation_speed() -> f32 {
    1.0
}
fn default_speed_change_rate() -> f32 {
    10.0
}
fn default_jump_height() -> f32 {
    1.2
}
fn default_gravity() -> f32 {
    -15.0
}
fn default_jump_timeout() -> f32 {
    0.1
}
fn default_fall_timeout() -> f32 {
    0.15
}
fn default_terminal_velocity() -> f32 {
    53.0
}
fn default_grounded_offset() -> f32 {
    -0.14
}
fn default_probe_radius() -> f32 {
    0.5
}
fn default_ground_layers() -> LayerMask {
    LayerMask::layer(0)
}
fn default_ceiling_offset() -> f32 {
    0.5
}
fn default_ceiling_layers() -> LayerMask {
    LayerMask::layer(1)
}
fn default_top_clamp() -> f32 {
    90.0
}
fn default_bottom_clamp() -> f32 {
    -90.0
}
fn default_bullet_damage() -> f32 {
    10.0
}
fn default_bullet_speed() -> f32 {
    10.0
}
fn default_bullet_life_span() -> f32 {
    1.0
}
fn default_fire_rate() -> f32 {
    0.2
}
fn default_bullet_spread() -> f32 {
    5.0
}
fn default_bullet_count() -> u32 {
    1
}
fn default_max_ammo() -> u32 {
    30
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_health: default_max_health(),
            move_speed: default_move_speed(),
            dash_multiplier: default_dash_multiplier(),
            dash_duration: default_dash_duration(),
            dash_cooldown: default_dash_cooldown(),
            rotation_speed: default_rotation_speed(),
            look_mode: LookMode::default(),
            speed_change_rate: default_speed_change_rate(),
            jump_height: default_jump_height(),
            gravity: default_gravity(),
            jump_timeout: default_jump_timeout(),
            fall_timeout: default_fall_timeout(),
            terminal_velocity: default_terminal_velocity(),
            grounded_offset: default_grounded_offset(),
            grounded_radius: default_probe_radius(),
            ground_layers: default_ground_layers(),
            ceiling_offset: default_ceiling_offset(),
            ceiling_radius: default_probe_radius(),
            ceiling_layers: default_ceiling_layers(),
            top_clamp: default_top_clamp(),
            bottom_clamp: default_bottom_clamp(),
            bullet_damage: default_bullet_damage(),
            bullet_speed: default_bullet_speed(),
            bullet_life_span: default_bullet_life_span(),
            fire_rate: default_fire_rate(),
            bullet_spread: default_bullet_spread(),
            bullet_count: default_bullet_count(),
            max_ammo: default_max_ammo(),
        }
    }
}

impl ControllerConfig {
    /// Load config from a RON file. Missing file gives defaults; an invalid one is logged and
    /// also gives defaults.
    pub fn load(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save config as pretty RON. Logs on error.
    pub fn save(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }

    /// Check the invariants the controller relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::InvalidStats { field, reason })
        }

        let numbers = [
            ("max_health", self.max_health),
            ("move_speed", self.move_speed),
            ("dash_multiplier", self.dash_multiplier),
            ("dash_duration", self.dash_duration),
            ("dash_cooldown", self.dash_cooldown),
            ("rotation_speed", self.rotation_speed),
            ("speed_change_rate", self.speed_change_rate),
            ("jump_height", self.jump_height),
            ("gravity", self.gravity),
            ("jump_timeout", self.jump_timeout),
            ("fall_timeout", self.fall_timeout),
            ("terminal_velocity", self.terminal_velocity),
            ("grounded_offset", self.grounded_offset),
            ("grounded_radius", self.grounded_radius),
            ("ceiling_offset", self.ceiling_offset),
            ("ceiling_radius", self.ceiling_radius),
            ("top_clamp", self.top_clamp),
            ("bottom_clamp", self.bottom_clamp),
            ("bullet_damage", self.bullet_damage),
            ("bullet_speed", self.bullet_speed),
            ("bullet_life_span", self.bullet_life_span),
            ("fire_rate", self.fire_rate),
            ("bullet_spread", self.bullet_spread),
        ];
        if let Some((field, _)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return invalid(*field, "must be a finite number");
        }

        let non_negative = [
            ("move_speed", self.move_speed),
            ("speed_change_rate", self.speed_change_rate),
            ("jump_height", self.jump_height),
            ("jump_timeout", self.jump_timeout),
            ("fall_timeout", self.fall_timeout),
            ("terminal_velocity", self.terminal_velocity),
            ("grounded_radius", self.grounded_radius),
            ("ceiling_radius", self.ceiling_radius),
            ("bullet_life_span", self.bullet_life_span),
            ("fire_rate", self.fire_rate),
            ("bullet_spread", self.bullet_spread),
        ];
        if let Some((field, _)) = non_negative.iter().find(|(_, value)| *value < 0.0) {
            return invalid(*field, "must not be negative");
        }

        if self.max_health <= 0.0 {
            return invalid("max_health", "must be positive");
        }
        if self.dash_multiplier <= 0.0 {
            return invalid("dash_multiplier", "must be positive");
        }
        if self.dash_duration <= 0.0 {
            return invalid("dash_duration", "must be positive");
        }
        if self.dash_cooldown <= 0.0 {
            return invalid("dash_cooldown", "must be positive");
        }
        if self.gravity >= 0.0 {
            return invalid("gravity", "must be negative");
        }
        if self.bottom_clamp > self.top_clamp {
            return invalid("bottom_clamp", "must not exceed top_clamp");
        }
        if self.bullet_count < 1 {
            return invalid("bullet_count", "must be at least 1");
        }
        Ok(())
    }
}
