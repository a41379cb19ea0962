//! World bounds and simulation configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("world half extent must be positive and finite, got {0}")]
    InvalidHalfExtent(f32),
    #[error("projectile bound {bound} must not be smaller than the world half extent {half_extent}")]
    ProjectileBoundTooSmall { bound: f32, half_extent: f32 },
}

/// World-space bounds shared by every system
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Actors are clamped to +/- this extent on x and z
    pub half_extent: f32,
    /// Projectiles are retired once |x| or |z| exceeds this
    pub projectile_bound: f32,
    /// Ground plane height for walking actors
    pub actor_height: f32,
}

impl WorldConfig {
    /// Check the configuration for nonsense values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.half_extent.is_finite() || self.half_extent <= 0.0 {
            return Err(ConfigError::InvalidHalfExtent(self.half_extent));
        }
        if self.projectile_bound < self.half_extent {
            return Err(ConfigError::ProjectileBoundTooSmall {
                bound: self.projectile_bound,
                half_extent: self.half_extent,
            });
        }
        Ok(())
    }

    /// Clamp a position onto the playable area, preserving height
    #[inline]
    pub fn clamp_to_bounds(&self, pos: Vec3) -> Vec3 {
        Vec3::new(
            pos.x.clamp(-self.half_extent, self.half_extent),
            pos.y,
            pos.z.clamp(-self.half_extent, self.half_extent),
        )
    }

    /// Whether a position is still inside the projectile play area
    #[inline]
    pub fn in_projectile_bounds(&self, pos: Vec3) -> bool {
        pos.x.abs() <= self.projectile_bound && pos.z.abs() <= self.projectile_bound
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            half_extent: 90.0,
            projectile_bound: 100.0,
            actor_height: 1.0,
        }
    }
}
