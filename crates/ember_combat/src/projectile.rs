//! Straight-line projectile simulation

use ember_core::WorldConfig;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Projectile tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectileParams {
    /// Travel speed in meters per second
    pub speed: f32,
    /// Damage on hit
    pub damage: f32,
    /// Seconds of flight before the projectile expires
    pub lifetime: f32,
    /// Hit radius against ordinary targets
    pub grunt_hit_radius: f32,
    /// Hit radius against bosses, whose footprint is larger
    pub boss_hit_radius: f32,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self {
            speed: 100.0,
            damage: 25.0,
            lifetime: 3.0,
            grunt_hit_radius: 2.5,
            boss_hit_radius: 5.0,
        }
    }
}

impl ProjectileParams {
    /// Hit radius for a target of the given kind
    #[inline]
    pub fn hit_radius(&self, is_boss: bool) -> f32 {
        if is_boss {
            self.boss_hit_radius
        } else {
            self.grunt_hit_radius
        }
    }
}

/// Why a projectile left flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    /// Still traveling
    Active,
    /// Lifetime elapsed without hitting anything
    Expired,
    /// Left the play area
    OutOfBounds,
}

/// A single projectile in flight
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Current position
    pub pos: Vec3,
    /// Unit travel direction, fixed at launch
    pub dir: Vec3,
    /// Seconds since launch
    pub age: f32,
}

impl Projectile {
    /// Launch a projectile; `dir` is normalized here
    pub fn new(pos: Vec3, dir: Vec3) -> Self {
        Self {
            pos,
            dir: dir.normalize_or_zero(),
            age: 0.0,
        }
    }

    /// Advance one tick and report flight status
    pub fn advance(&mut self, dt: f32, params: &ProjectileParams, world: &WorldConfig) -> Flight {
        self.age += dt;
        self.pos += self.dir * params.speed * dt;

        if self.age >= params.lifetime {
            return Flight::Expired;
        }
        if !world.in_projectile_bounds(self.pos) {
            return Flight::OutOfBounds;
        }
        Flight::Active
    }
}
