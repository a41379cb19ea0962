//! Health pool with death latching

use crate::damage::DamageInfo;
use serde::{Deserialize, Serialize};

/// Health for a single actor
///
/// Invariant: `0 <= current <= max`. Death is a one-way transition:
/// once `current` reaches zero, further damage and healing are inert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HealthPool {
    /// Current health
    pub current: f32,
    /// Maximum health
    pub max: f32,
    /// Whether this pool has hit zero
    #[serde(skip)]
    is_dead: bool,
}

impl HealthPool {
    /// Create a full pool
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            is_dead: false,
        }
    }

    /// Apply damage to this pool
    ///
    /// Returns the damage actually dealt and whether the actor died on
    /// this application. Knockback is the caller's business; the pool
    /// only tracks hit points.
    pub fn apply_damage(&mut self, damage: &DamageInfo) -> (f32, bool) {
        if self.is_dead {
            return (0.0, false);
        }

        let dealt = damage.amount.max(0.0).min(self.current);
        self.current = (self.current - damage.amount.max(0.0)).max(0.0);

        let died = self.current <= 0.0;
        if died {
            self.is_dead = true;
        }
        (dealt, died)
    }

    /// Heal the pool, capped at max
    ///
    /// Returns the amount actually restored. Dead pools do not heal.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.is_dead {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - before
    }

    /// Set health directly, clamped to `0..=max`
    pub fn set(&mut self, health: f32) {
        self.current = health.clamp(0.0, self.max);
        if self.current <= 0.0 {
            self.is_dead = true;
        }
    }

    /// Health as a fraction of max (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.current / self.max
    }

    /// Check if alive
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }
}

impl Default for HealthPool {
    fn default() -> Self {
        Self::new(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_and_clamp() {
        let mut health = HealthPool::new(100.0);

        let (dealt, died) = health.apply_damage(&DamageInfo::new(30.0));
        assert_eq!(dealt, 30.0);
        assert!(!died);
        assert_eq!(health.current, 70.0);

        // Overkill floors at zero
        let (dealt, died) = health.apply_damage(&DamageInfo::new(500.0));
        assert_eq!(dealt, 70.0);
        assert!(died);
        assert_eq!(health.current, 0.0);
    }

    #[test]
    fn test_death_latches() {
        let mut health = HealthPool::new(50.0);
        let (_, died) = health.apply_damage(&DamageInfo::new(50.0));
        assert!(died);

        // A second lethal hit does not "die" again
        let (dealt, died) = health.apply_damage(&DamageInfo::new(10.0));
        assert_eq!(dealt, 0.0);
        assert!(!died);

        // And dead pools stay dead through heals
        assert_eq!(health.heal(25.0), 0.0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut health = HealthPool::new(100.0);
        health.set(60.0);

        assert_eq!(health.heal(30.0), 30.0);
        assert_eq!(health.heal(50.0), 10.0);
        assert_eq!(health.current, 100.0);
    }

    #[test]
    fn test_invariant_holds_after_every_application() {
        let mut health = HealthPool::new(80.0);
        for amount in [10.0, -5.0, 200.0, 3.0] {
            health.apply_damage(&DamageInfo::new(amount));
            assert!(health.current >= 0.0 && health.current <= health.max);
        }
        for amount in [15.0, -2.0, 1000.0] {
            health.heal(amount);
            assert!(health.current >= 0.0 && health.current <= health.max);
        }
    }

    #[test]
    fn test_fraction() {
        let mut health = HealthPool::new(200.0);
        health.set(50.0);
        assert!((health.fraction() - 0.25).abs() < 1e-6);
    }
}
