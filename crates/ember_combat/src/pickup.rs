//! Ammo drops left behind by dead actors

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Seconds a drop waits on the ground before despawning
const DROP_LIFETIME: f32 = 30.0;
/// Distance at which the player collects a drop
const PICKUP_RADIUS: f32 = 2.0;
/// Ground height drops rest at
const DROP_HEIGHT: f32 = 0.5;

/// A single ammo drop
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmmoDrop {
    /// Resting position
    pub pos: Vec3,
    /// Rounds granted on pickup
    pub amount: u32,
    /// Seconds on the ground
    #[serde(skip)]
    age: f32,
}

impl AmmoDrop {
    /// Place a drop at the given position (snapped to drop height)
    pub fn new(pos: Vec3, amount: u32) -> Self {
        Self {
            pos: Vec3::new(pos.x, DROP_HEIGHT, pos.z),
            amount,
            age: 0.0,
        }
    }
}

/// Owns every ammo drop currently on the ground
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DropField {
    drops: Vec<AmmoDrop>,
}

impl DropField {
    /// Create an empty field
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a one-round drop
    pub fn spawn(&mut self, pos: Vec3) {
        self.drops.push(AmmoDrop::new(pos, 1));
    }

    /// Age drops, discard expired ones, and collect any the player is
    /// standing on. Returns the total rounds collected this tick.
    pub fn update(&mut self, dt: f32, player_pos: Vec3) -> u32 {
        let mut collected = 0;
        self.drops.retain_mut(|drop| {
            drop.age += dt;
            if drop.pos.distance(player_pos) < PICKUP_RADIUS {
                collected += drop.amount;
                return false;
            }
            drop.age < DROP_LIFETIME
        });
        collected
    }

    /// Number of drops on the ground
    pub fn len(&self) -> usize {
        self.drops.len()
    }

    /// Whether the field is empty
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Iterate over the drops (for minimap/VFX collaborators)
    pub fn iter(&self) -> impl Iterator<Item = &AmmoDrop> {
        self.drops.iter()
    }
}
