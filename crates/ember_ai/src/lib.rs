//! Ember AI - Hostile Actor Behavior
//!
//! This crate provides the per-actor behavior of the Ember simulation.
//!
//! # Features
//!
//! - Shared actor body (position, health, cooldowns)
//! - Grunt finite state machine (idle/patrol/chase/attack/flee)
//! - Boss phase machine with cooldown-gated abilities and enrage
//! - Tick-granular deferred effect scheduling for ability wind-ups
//! - Dialogue line tables with seeded-random selection
//!
//! # Example
//!
//! ```ignore
//! use ember_ai::prelude::*;
//!
//! let mut grunt = Grunt::spawn(id, 10.0, -5.0, level, &world, &mut rng);
//! let mut out = Vec::new();
//! grunt.update(dt, player_pos, &world, &mut rng, &mut out);
//! ```

pub mod actor;
pub mod boss;
pub mod dialogue;
pub mod grunt;
pub mod schedule;

pub mod prelude {
    pub use crate::actor::{ActorBody, ActorState, AiEvent, Combatant};
    pub use crate::boss::{Boss, BossState};
    pub use crate::grunt::{Grunt, GruntState};
    pub use crate::schedule::EffectQueue;
}

pub use prelude::*;
