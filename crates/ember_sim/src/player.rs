//! The simulation's view of the player
//!
//! Movement and camera live with the host; this struct owns health,
//! stamina, and the position mirror the AI reads. The host calls
//! `set_position` every frame before ticking.

use ember_combat::{DamageInfo, HealthPool};
use ember_core::WorldConfig;
use glam::Vec3;
use serde::{Deserialize, Serialize};

const MAX_HEALTH: f32 = 100.0;
const MAX_STAMINA: f32 = 100.0;
const SPAWN_HEIGHT: f32 = 2.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pos: Vec3,
    health: HealthPool,
    stamina: f32,
    max_stamina: f32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec3::new(0.0, SPAWN_HEIGHT, 0.0),
            health: HealthPool::new(MAX_HEALTH),
            stamina: MAX_STAMINA,
            max_stamina: MAX_STAMINA,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.pos
    }

    /// Mirror the host-controlled position into the simulation
    pub fn set_position(&mut self, pos: Vec3) {
        self.pos = pos;
    }

    /// Shove the player, staying inside the playable area
    pub fn apply_knockback(&mut self, displacement: Vec3, world: &WorldConfig) {
        self.pos = world.clamp_to_bounds(self.pos + displacement);
    }

    /// Returns the damage actually dealt; dead players take none
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let (dealt, _) = self.health.apply_damage(&DamageInfo::new(amount));
        dealt
    }

    /// Returns the health actually restored
    pub fn heal(&mut self, amount: f32) -> f32 {
        self.health.heal(amount)
    }

    pub fn heal_stamina(&mut self, amount: f32) {
        if self.health.is_alive() {
            self.stamina = (self.stamina + amount.max(0.0)).min(self.max_stamina);
        }
    }

    pub fn health(&self) -> f32 {
        self.health.current
    }

    pub fn max_health(&self) -> f32 {
        self.health.max
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    /// Health restored per kill: a tenth of max, rounded up
    pub(crate) fn kill_heal_amount(&self) -> f32 {
        (self.health.max / 10.0).ceil()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
