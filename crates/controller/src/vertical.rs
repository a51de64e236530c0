//! Grounding, jumping and gravity.

use engine_core::Vec3;

use crate::probe::SpatialProbe;
use crate::stats::StatsStore;
use crate::timer::Countdown;

/// Downward velocity kept while grounded so the body stays seated on slopes and steps.
pub const GROUNDED_BIAS: f32 = -2.0;

/// Vertical motion state of the controlled entity.
#[derive(Debug, Clone)]
pub struct VerticalMotion {
    grounded: bool,
    vertical_velocity: f32,
    jump_timeout: Countdown,
    fall_timeout: Countdown,
}

impl VerticalMotion {
    pub fn new(stats: &StatsStore) -> Self {
        Self {
            grounded: false,
            vertical_velocity: 0.0,
            jump_timeout: Countdown::new(stats.tuning.jump_timeout),
            fall_timeout: Countdown::new(stats.tuning.fall_timeout),
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn jump_timeout_remaining(&self) -> f32 {
        self.jump_timeout.remaining()
    }

    pub fn fall_timeout_remaining(&self) -> f32 {
        self.fall_timeout.remaining()
    }

    /// Airborne long enough to count as falling rather than a small hop or step down.
    pub fn is_falling(&self) -> bool {
        !self.grounded && self.fall_timeout.is_elapsed()
    }

    /// Back to spawn state.
    pub fn reset(&mut self, stats: &StatsStore) {
        *self = Self::new(stats);
    }

    /// Run ground detection, jump and gravity for one tick and return the new vertical velocity.
    ///
    /// `jump_requested` is cleared when the jump is used, and also while airborne since a jump
    /// cannot be queued in the air. A grounded request waiting on the jump timeout stays pending.
    pub fn update(
        &mut self,
        dt: f32,
        jump_requested: &mut bool,
        stats: &StatsStore,
        probe: &dyn SpatialProbe,
    ) -> f32 {
        let tuning = &stats.tuning;
        let position = probe.position();

        let ground_center = position + Vec3::Y * tuning.grounded_offset;
        self.grounded =
            probe.check_sphere_overlap(ground_center, tuning.grounded_radius, tuning.ground_layers);

        if self.grounded {
            self.fall_timeout.reset(tuning.fall_timeout);

            if self.vertical_velocity < 0.0 {
                self.vertical_velocity = GROUNDED_BIAS;
            }

            if *jump_requested && self.jump_timeout.is_elapsed() {
                // v = sqrt(2 * h * g), gravity is negative
                self.vertical_velocity = (tuning.jump_height * -2.0 * tuning.gravity).sqrt();
                self.jump_timeout.reset(tuning.jump_timeout);
                *jump_requested = false;
                log::debug!("Jump, vertical velocity {:.3}", self.vertical_velocity);
            } else {
                self.jump_timeout.advance(dt);
            }
        } else {
            self.jump_timeout.reset(tuning.jump_timeout);
            self.fall_timeout.advance(dt);
            *jump_requested = false;
        }

        // The bound only caps upward speed; downward speed grows without limit.
        if self.vertical_velocity < tuning.terminal_velocity {
            self.vertical_velocity += tuning.gravity * dt;
        }

        let ceiling_center = position + Vec3::Y * tuning.ceiling_offset;
        if self.vertical_velocity > 0.0
            && probe.check_sphere_overlap(ceiling_center, tuning.ceiling_radius, tuning.ceiling_layers)
        {
            log::debug!("Head bump at {:.2?}", ceiling_center);
            self.vertical_velocity = 0.0;
        }

        self.vertical_velocity
    }
}
