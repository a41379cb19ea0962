//! Ember Sim - The Simulation Facade
//!
//! Ties the population director, player bridge, combat commands,
//! projectiles, and ammo drops into a single fixed-order tick driven
//! by the host.
//!
//! # Features
//!
//! - Deterministic runs from a single seed
//! - Fixed tick order: roster, projectiles, drops
//! - Player melee and projectile commands with input validation
//! - Roster snapshots and drained event batches for collaborators
//!
//! # Example
//!
//! ```ignore
//! use ember_sim::prelude::*;
//!
//! let mut sim = Simulation::new(SimConfig::default())?;
//! sim.player_mut().set_position(player_pos);
//! sim.tick(dt);
//! for event in sim.drain_events() {
//!     // forward to UI/audio
//! }
//! ```

pub mod director;
pub mod events;
pub mod player;
pub mod projectiles;
pub mod snapshot;

pub mod prelude {
    pub use crate::director::{Director, DirectorConfig};
    pub use crate::events::SimEvent;
    pub use crate::player::Player;
    pub use crate::snapshot::ActorSnapshot;
    pub use crate::{SimConfig, Simulation};
}

use crate::director::{Director, DirectorConfig};
use crate::events::SimEvent;
use crate::player::Player;
use crate::projectiles::ProjectileBank;
use crate::snapshot::ActorSnapshot;
use ember_combat::melee::{self, MeleeParams};
use ember_combat::{DamageInfo, DropField, ProjectileParams};
use ember_core::error::validate_command;
use ember_core::{ActorId, ConfigError, EventQueue, WorldConfig};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Host-supplied tuning for a simulation run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub director: DirectorConfig,
    pub melee: MeleeParams,
    pub projectile: ProjectileParams,
    /// Seed for every random decision in the run
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            director: DirectorConfig::default(),
            melee: MeleeParams::default(),
            projectile: ProjectileParams::default(),
            seed: 0,
        }
    }
}

/// The combat simulation
///
/// Single owner of the roster, the player bridge, and the event
/// queue. All randomness flows through one seeded generator, so two
/// simulations with the same config and the same command sequence
/// stay identical.
pub struct Simulation {
    world: WorldConfig,
    melee: MeleeParams,
    player: Player,
    director: Director,
    projectiles: ProjectileBank,
    drops: DropField,
    events: EventQueue<SimEvent>,
    rng: StdRng,
}

impl Simulation {
    /// Build a simulation; rejects nonsense world bounds
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.world.validate()?;
        Ok(Self {
            world: config.world,
            melee: config.melee,
            player: Player::new(),
            director: Director::new(config.director),
            projectiles: ProjectileBank::new(config.projectile),
            drops: DropField::new(),
            events: EventQueue::new(),
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Advance the whole simulation by `dt` seconds
    ///
    /// Per-tick order: roster (difficulty, spawning, AI, deaths,
    /// removal), then projectiles, then drops. Events accumulate
    /// until the host drains them.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            log::warn!("ignoring tick with dt {dt}");
            return;
        }

        self.director.update(
            dt,
            &self.world,
            &mut self.player,
            &mut self.rng,
            &mut self.events,
            &mut self.drops,
        );
        self.projectiles.update(
            dt,
            &self.world,
            &mut self.director,
            &mut self.rng,
            &mut self.events,
        );
        self.director.book_deaths(&mut self.player, &mut self.events);

        let collected = self.drops.update(dt, self.player.position());
        if collected > 0 {
            self.events.publish(SimEvent::AmmoCollected { amount: collected });
        }
    }

    /// Resolve a player melee swing; returns the struck actor
    ///
    /// The strictly closest living target inside range and arc takes
    /// the hit, grunts before bosses on equal distance.
    pub fn melee_attack(&mut self, origin: Vec3, facing: Vec3) -> Option<ActorId> {
        let candidates = self.director.living_candidates();
        let hit = melee::resolve(&self.melee, origin, facing, candidates)?;

        let mut ai_out = Vec::new();
        if let Some(target) = self.director.combatant_mut(hit.target) {
            let damage = DamageInfo::new(self.melee.damage).with_knockback(hit.knockback);
            target.take_damage(&damage, &mut self.rng, &mut ai_out);
        }
        events::forward_dialogue(&ai_out, &mut self.events);
        self.director.book_deaths(&mut self.player, &mut self.events);
        Some(hit.target)
    }

    /// Launch a projectile from the player's weapon
    ///
    /// Malformed commands are rejected and reported as false; ammo
    /// accounting is the host's concern.
    pub fn fire_projectile(&mut self, origin: Vec3, direction: Vec3) -> bool {
        match validate_command(origin, direction) {
            Ok(dir) => {
                self.projectiles.fire(origin, dir);
                true
            }
            Err(err) => {
                log::warn!("projectile rejected: {err}");
                false
            }
        }
    }

    /// Place a grunt directly (scripting and debug paths)
    pub fn spawn_grunt(&mut self, x: f32, z: f32) -> Option<ActorId> {
        self.director
            .spawn_grunt(x, z, &self.world, &mut self.rng, &mut self.events)
    }

    /// Trigger a boss spawn ahead of the schedule
    pub fn spawn_boss(&mut self) -> Option<ActorId> {
        self.director.spawn_boss(
            &self.world,
            self.player.position(),
            &mut self.rng,
            &mut self.events,
        )
    }

    /// Snapshot every actor, corpses in their grace period included
    pub fn roster(&self) -> Vec<ActorSnapshot> {
        self.director
            .grunts
            .iter()
            .map(|g| ActorSnapshot::of(g))
            .chain(self.director.bosses.iter().map(|b| ActorSnapshot::of(b)))
            .collect()
    }

    /// Take every event published since the last drain, in order
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain().collect()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    pub fn drops(&self) -> &DropField {
        &self.drops
    }

    pub fn projectiles_in_flight(&self) -> usize {
        self.projectiles.len()
    }
}
