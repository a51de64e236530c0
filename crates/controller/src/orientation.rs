//! Look input to body yaw and camera pitch.

use engine_core::{Quat, Vec2};
use input::LookDevice;

use crate::config::LookMode;
use crate::stats::StatsStore;

/// Look input below this squared magnitude is ignored in device-scaled mode.
pub const LOOK_THRESHOLD: f32 = 0.01;

/// Wrap once into (-360, 360), then clamp to `[min, max]`.
pub fn clamp_angle(mut angle: f32, min: f32, max: f32) -> f32 {
    if angle < -360.0 {
        angle += 360.0;
    }
    if angle > 360.0 {
        angle -= 360.0;
    }
    angle.clamp(min, max)
}

/// Yaw (turning right is positive) and pitch (looking up is positive), in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    yaw: f32,
    pitch: f32,
}

impl Orientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw: yaw.rem_euclid(360.0),
            pitch,
        }
    }

    /// Heading in `[0, 360)`.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Rotation applied to the body. Only yaw.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw.to_radians())
    }

    /// Local rotation of the camera pivot. Only pitch.
    pub fn pivot_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians())
    }

    pub fn update(&mut self, dt: f32, look: Vec2, device: LookDevice, stats: &StatsStore) {
        let tuning = &stats.tuning;
        let multiplier = match tuning.look_mode {
            LookMode::FrameScaled => dt,
            LookMode::DeviceScaled => {
                if look.length_squared() < LOOK_THRESHOLD {
                    return;
                }
                match device {
                    LookDevice::Pointer => 1.0,
                    LookDevice::Gamepad => dt,
                }
            }
        };

        let scale = tuning.rotation_speed * multiplier;
        self.yaw = (self.yaw + look.x * scale).rem_euclid(360.0);
        self.pitch = clamp_angle(
            self.pitch + look.y * scale,
            tuning.bottom_clamp,
            tuning.top_clamp,
        );
    }
}
