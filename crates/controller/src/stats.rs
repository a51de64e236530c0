//! Tunables plus the runtime counters that abilities read and write.

use engine_core::Health;

use crate::config::ControllerConfig;
use crate::error::ConfigError;

/// Per-entity stats: the loaded tuning plus mutable counters.
#[derive(Debug, Clone)]
pub struct StatsStore {
    pub tuning: ControllerConfig,
    /// Current move speed. Equal to `tuning.move_speed` except while a dash is active.
    pub move_speed: f32,
    pub health: Health,
    pub current_ammo: u32,
}

impl StatsStore {
    /// Build the runtime store with health and ammo at max.
    pub fn from_config(tuning: ControllerConfig) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            move_speed: tuning.move_speed,
            health: Health::new(tuning.max_health),
            current_ammo: tuning.max_ammo,
            tuning,
        })
    }

    /// True if a full burst can be paid for.
    pub fn has_burst(&self) -> bool {
        self.current_ammo >= self.tuning.bullet_count
    }

    /// Pay for one burst. Returns false (and leaves ammo alone) if there is not enough.
    pub fn consume_burst(&mut self) -> bool {
        if !self.has_burst() {
            return false;
        }
        self.current_ammo -= self.tuning.bullet_count;
        true
    }

    pub fn refill_ammo(&mut self) {
        self.current_ammo = self.tuning.max_ammo;
    }

    /// Add ammo, capped at max.
    pub fn add_ammo(&mut self, amount: u32) {
        self.current_ammo = self.current_ammo.saturating_add(amount).min(self.tuning.max_ammo);
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health.take_damage(amount);
        if self.health.is_dead() {
            log::info!("Controlled entity died");
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.health.heal(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Spawn-time reset of the runtime counters.
    pub fn reset(&mut self) {
        self.move_speed = self.tuning.move_speed;
        self.health.reset();
        self.refill_ammo();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(bullet_count: u32, max_ammo: u32) -> StatsStore {
        StatsStore::from_config(ControllerConfig {
            bullet_count,
            max_ammo,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn starts_full() {
        let s = stats(1, 30);
        assert_eq!(s.current_ammo, 30);
        assert_eq!(s.health.current, 100.0);
        assert_eq!(s.move_speed, 5.0);
    }

    #[test]
    fn bursts_are_all_or_nothing() {
        let mut s = stats(4, 10);
        assert!(s.consume_burst());
        assert!(s.consume_burst());
        assert_eq!(s.current_ammo, 2);
        assert!(!s.consume_burst());
        assert_eq!(s.current_ammo, 2);
    }

    #[test]
    fn add_ammo_caps_at_max() {
        let mut s = stats(1, 30);
        s.current_ammo = 25;
        s.add_ammo(100);
        assert_eq!(s.current_ammo, 30);
    }

    #[test]
    fn reset_restores_counters() {
        let mut s = stats(1, 30);
        s.current_ammo = 0;
        s.move_speed = 40.0;
        s.take_damage(150.0);
        assert!(s.is_dead());
        s.reset();
        assert_eq!(s.current_ammo, 30);
        assert_eq!(s.move_speed, 5.0);
        assert!(!s.is_dead());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = StatsStore::from_config(ControllerConfig {
            dash_duration: 0.0,
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
