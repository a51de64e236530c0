//! Simulation time for the fixed-step loop.

use std::time::Duration;

/// Monotonic simulation clock advanced in fixed steps.
///
/// Elapsed time is kept in `f64` so that timestamps compared against short
/// intervals (fire rate, dash phases) do not lose precision over long sessions.
#[derive(Debug, Clone)]
pub struct Time {
    /// Duration of the last step in seconds.
    delta: f32,
    /// Total simulated time in seconds.
    elapsed: f64,
    /// Steps taken since start.
    frame_count: u64,
    /// Fixed timestep (default 60 Hz).
    fixed_timestep: Duration,
    /// Real time waiting to be consumed by fixed steps.
    accumulator: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a clock stepping at 60 Hz.
    pub fn new() -> Self {
        Self {
            delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            accumulator: Duration::ZERO,
        }
    }

    /// Create a clock stepping at the given rate in Hz.
    pub fn with_fixed_rate(hz: f64) -> Self {
        let mut time = Self::new();
        time.set_fixed_rate(hz);
        time
    }

    /// Advance the simulation by exactly one fixed step and return its length in seconds.
    pub fn tick(&mut self) -> f32 {
        let dt = self.fixed_timestep.as_secs_f64();
        self.delta = dt as f32;
        self.elapsed += dt;
        self.frame_count += 1;
        self.delta
    }

    /// Feed real time into the accumulator (e.g. the wall-clock length of a frame).
    pub fn accumulate(&mut self, real: Duration) {
        self.accumulator += real;
    }

    /// Check if a fixed update should run; if so consume the time and advance the clock.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            self.tick();
            true
        } else {
            false
        }
    }

    /// Get the delta time of the last step in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Get total simulated time in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// Get the number of steps taken.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Set the fixed timestep rate in Hz.
    pub fn set_fixed_rate(&mut self, hz: f64) {
        self.fixed_timestep = Duration::from_secs_f64(1.0 / hz);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_elapsed_by_fixed_step() {
        let mut time = Time::with_fixed_rate(10.0);
        for _ in 0..10 {
            time.tick();
        }
        assert_eq!(time.frame_count(), 10);
        assert!((time.elapsed_seconds() - 1.0).abs() < 1e-9);
        assert!((time.delta_seconds() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn accumulator_runs_whole_steps_only() {
        let mut time = Time::with_fixed_rate(10.0);
        time.accumulate(Duration::from_millis(250));
        let mut steps = 0;
        while time.should_fixed_update() {
            steps += 1;
        }
        assert_eq!(steps, 2);
        time.accumulate(Duration::from_millis(50));
        assert!(time.should_fixed_update());
        assert!(!time.should_fixed_update());
    }
}
