//! Damage descriptors

use ember_core::ActorId;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A single instance of damage
///
/// Ephemeral: produced by a resolver, consumed immediately by the
/// target's damage handler, never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DamageInfo {
    /// Damage amount
    pub amount: f32,
    /// Actor that caused the damage, if any
    pub source: Option<ActorId>,
    /// Knockback displacement applied to the target on hit
    pub knockback: Vec3,
}

impl DamageInfo {
    /// Create new damage info
    pub fn new(amount: f32) -> Self {
        Self {
            amount,
            source: None,
            knockback: Vec3::ZERO,
        }
    }

    /// Set the source actor
    pub fn with_source(mut self, source: ActorId) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the knockback displacement
    pub fn with_knockback(mut self, knockback: Vec3) -> Self {
        self.knockback = knockback;
        self
    }
}

impl Default for DamageInfo {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let damage = DamageInfo::new(20.0)
            .with_source(ActorId(3))
            .with_knockback(Vec3::new(2.0, 0.0, 0.0));

        assert_eq!(damage.amount, 20.0);
        assert_eq!(damage.source, Some(ActorId(3)));
        assert_eq!(damage.knockback.x, 2.0);
    }
}
