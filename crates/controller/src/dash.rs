//! Dash: a timed move-speed multiplier followed by a cooldown.
//!
//! ```text
//! Idle --trigger--> Active --dash_duration--> Cooldown --(dash_cooldown - dash_duration)--> Idle
//! ```
//!
//! Only this module writes `StatsStore::move_speed`. The pre-dash speed is saved on entry and
//! written back exactly once, when Active ends or when the dash is torn down early.

use crate::stats::StatsStore;
use crate::timer::Countdown;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashPhase {
    Idle,
    Active { remaining: Countdown, saved_speed: f32 },
    Cooldown { remaining: Countdown },
}

/// Result of a dash request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashTrigger {
    Started,
    /// Dashing or cooling down; the request is ignored.
    NotReady,
}

#[derive(Debug, Clone)]
pub struct DashAbility {
    phase: DashPhase,
}

impl Default for DashAbility {
    fn default() -> Self {
        Self::new()
    }
}

impl DashAbility {
    pub fn new() -> Self {
        Self {
            phase: DashPhase::Idle,
        }
    }

    pub fn phase(&self) -> DashPhase {
        self.phase
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.phase, DashPhase::Active { .. })
    }

    pub fn can_dash(&self) -> bool {
        matches!(self.phase, DashPhase::Idle)
    }

    /// Pre-dash move speed, only while a dash is active.
    pub fn saved_speed(&self) -> Option<f32> {
        match self.phase {
            DashPhase::Active { saved_speed, .. } => Some(saved_speed),
            _ => None,
        }
    }

    /// Start a dash if idle.
    pub fn try_trigger(&mut self, stats: &mut StatsStore) -> DashTrigger {
        if !self.can_dash() {
            return DashTrigger::NotReady;
        }

        let saved_speed = stats.move_speed;
        stats.move_speed = saved_speed * stats.tuning.dash_multiplier;
        self.phase = DashPhase::Active {
            remaining: Countdown::new(stats.tuning.dash_duration),
            saved_speed,
        };
        log::debug!("Dash start: move speed {} -> {}", saved_speed, stats.move_speed);
        DashTrigger::Started
    }

    /// Advance the running phase. Time left over when a phase ends carries into the next one,
    /// so phase boundaries do not drift with the tick length.
    pub fn advance(&mut self, dt: f32, stats: &mut StatsStore) {
        let mut carry = dt;
        loop {
            match &mut self.phase {
                DashPhase::Idle => return,
                DashPhase::Active {
                    remaining,
                    saved_speed,
                } => {
                    let Some(left) = remaining.advance(carry) else {
                        return;
                    };
                    stats.move_speed = *saved_speed;
                    let cooldown = (stats.tuning.dash_cooldown - stats.tuning.dash_duration).max(0.0);
                    log::debug!("Dash end: move speed restored to {}", stats.move_speed);
                    let remaining = Countdown::new(cooldown);
                    if remaining.is_elapsed() {
                        self.phase = DashPhase::Idle;
                        log::debug!("Dash ready");
                        return;
                    }
                    self.phase = DashPhase::Cooldown { remaining };
                    carry = left;
                }
                DashPhase::Cooldown { remaining } => {
                    if remaining.advance(carry).is_some() {
                        self.phase = DashPhase::Idle;
                        log::debug!("Dash ready");
                    }
                    return;
                }
            }
        }
    }

    /// Tear the dash down immediately, restoring move speed if a dash was active.
    pub fn reset(&mut self, stats: &mut StatsStore) {
        if let DashPhase::Active { saved_speed, .. } = self.phase {
            stats.move_speed = saved_speed;
            log::debug!("Dash torn down: move speed restored to {}", saved_speed);
        }
        self.phase = DashPhase::Idle;
    }
}
