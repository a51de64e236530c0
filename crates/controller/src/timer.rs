//! Countdown and rate-limit primitives shared by the abilities.

/// Remaining time below this counts as elapsed, so summed `dt` rounding never
/// leaves a phase one tick too long.
pub const TIMER_EPSILON: f32 = 1e-5;

/// A countdown that clamps at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        let mut c = Self::default();
        c.reset(duration);
        c
    }

    /// Restart from `duration` seconds.
    pub fn reset(&mut self, duration: f32) {
        self.remaining = if duration > TIMER_EPSILON { duration } else { 0.0 };
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_elapsed(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Count down while running. Returns the time left over past zero on the tick the
    /// countdown elapses, `None` otherwise (including when it was already at zero).
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if self.remaining <= 0.0 || dt <= 0.0 {
            return None;
        }
        let left = self.remaining - dt;
        if left <= TIMER_EPSILON {
            self.remaining = 0.0;
            Some((-left).max(0.0))
        } else {
            self.remaining = left;
            None
        }
    }
}

/// Slack for the rate limiter. Timestamps are sums of `f32` tick lengths, so a window of
/// exactly `interval` can come up a few nanoseconds short.
pub const RATE_EPSILON: f64 = 1e-7;

/// Allows an action at most once per `interval`, keyed to a monotonic timestamp.
///
/// The last use starts at time zero, so nothing is allowed during the first `interval`
/// seconds of the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateLimiter {
    last: f64,
}

impl RateLimiter {
    /// True if at least `interval` seconds have passed since the last recorded use.
    pub fn ready(&self, now: f64, interval: f32) -> bool {
        now - self.last + RATE_EPSILON >= interval as f64
    }

    pub fn record(&mut self, now: f64) {
        self.last = now;
    }

    pub fn last(&self) -> f64 {
        self.last
    }

    /// Back to a last use at time zero.
    pub fn clear(&mut self) {
        self.last = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_clamps_at_zero() {
        let mut c = Countdown::new(0.25);
        assert_eq!(c.advance(0.1), None);
        assert_eq!(c.advance(0.1), None);
        let over = c.advance(0.1).unwrap();
        assert!((over - 0.05).abs() < 1e-6);
        assert_eq!(c.remaining(), 0.0);
        assert!(c.is_elapsed());
        // Already elapsed: nothing more to report.
        assert_eq!(c.advance(0.1), None);
    }

    #[test]
    fn summed_steps_hit_the_boundary() {
        let mut c = Countdown::new(0.2);
        assert_eq!(c.advance(0.1), None);
        let over = c.advance(0.1).unwrap();
        assert!(over < 1e-5);
    }

    #[test]
    fn zero_dt_leaves_countdown_untouched() {
        let mut c = Countdown::new(0.5);
        assert_eq!(c.advance(0.0), None);
        assert_eq!(c.remaining(), 0.5);
    }

    #[test]
    fn zero_duration_is_already_elapsed() {
        let c = Countdown::new(0.0);
        assert!(c.is_elapsed());
    }

    #[test]
    fn rate_limiter_window() {
        let mut r = RateLimiter::default();
        assert!(!r.ready(0.1, 0.2), "window runs from time zero");
        assert!(r.ready(0.2, 0.2));
        assert!(r.ready(0.0, 0.0));
        r.record(1.0);
        assert!(!r.ready(1.1, 0.2));
        assert!(r.ready(1.2, 0.2));
        assert!(r.ready(1.0, 0.0));
        r.clear();
        assert_eq!(r.last(), 0.0);
        assert!(!r.ready(4.0, 5.0));
    }

    #[test]
    fn rate_limiter_rejects_just_inside_window() {
        let mut r = RateLimiter::default();
        r.record(1.0);
        assert!(!r.ready(1.0 + 0.2 - 1e-5, 0.2));
        assert!(!r.ready(1.0 + 0.2 - 1e-6, 0.2));
    }

    #[test]
    fn rate_limiter_accepts_summed_ticks() {
        let mut r = RateLimiter::default();
        let dt = 0.02f32;
        let mut now = 0.0f64;
        r.record(now);
        for _ in 0..10 {
            now += dt as f64;
        }
        assert!(r.ready(now, 0.2));
    }
}
