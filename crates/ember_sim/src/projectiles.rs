//! Projectiles in flight
//!
//! Shots advance every tick and collide against the living roster in
//! order, grunts before bosses. A shot damages at most one target and
//! retires on the first hit.

use crate::director::Director;
use crate::events::{forward_dialogue, SimEvent};
use ember_ai::actor::Combatant;
use ember_combat::{DamageInfo, Flight, Projectile, ProjectileParams};
use ember_core::{EventQueue, WorldConfig};
use glam::Vec3;
use rand::RngCore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProjectileBank {
    params: ProjectileParams,
    shots: Vec<Projectile>,
}

impl ProjectileBank {
    pub fn new(params: ProjectileParams) -> Self {
        Self {
            params,
            shots: Vec::new(),
        }
    }

    /// Launch a shot; `dir` must already be validated and normalized
    pub fn fire(&mut self, origin: Vec3, dir: Vec3) {
        self.shots.push(Projectile::new(origin, dir));
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Advance every shot, retiring hits, expiries, and escapes
    pub fn update(
        &mut self,
        dt: f32,
        world: &WorldConfig,
        director: &mut Director,
        rng: &mut dyn RngCore,
        events: &mut EventQueue<SimEvent>,
    ) {
        let params = self.params;
        self.shots.retain_mut(|shot| {
            if shot.advance(dt, &params, world) != Flight::Active {
                return false;
            }
            !collide(shot.pos, &params, director, rng, events)
        });
    }
}

/// Test a shot against the living roster; true when it connected
fn collide(
    pos: Vec3,
    params: &ProjectileParams,
    director: &mut Director,
    rng: &mut dyn RngCore,
    events: &mut EventQueue<SimEvent>,
) -> bool {
    let damage = DamageInfo::new(params.damage);
    let mut ai_out = Vec::new();

    for grunt in &mut director.grunts {
        if grunt.is_alive() && grunt.position().distance(pos) < params.hit_radius(false) {
            grunt.take_damage(&damage, rng, &mut ai_out);
            forward_dialogue(&ai_out, events);
            return true;
        }
    }
    for boss in &mut director.bosses {
        if boss.is_alive() && boss.position().distance(pos) < params.hit_radius(true) {
            boss.take_damage(&damage, rng, &mut ai_out);
            forward_dialogue(&ai_out, events);
            return true;
        }
    }
    false
}
