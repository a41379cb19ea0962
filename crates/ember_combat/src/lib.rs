//! Ember Combat - Health, Damage, and Hit Resolution
//!
//! This crate provides combat resolution for the Ember simulation.
//!
//! # Features
//!
//! - Health pools with death latching
//! - Damage descriptors with source and knockback
//! - Melee arc hit-testing with closest-target selection
//! - Straight-line projectile simulation
//! - Ammo drop pickups
//!
//! # Example
//!
//! ```ignore
//! use ember_combat::prelude::*;
//!
//! let mut health = HealthPool::new(100.0);
//! let damage = DamageInfo::new(25.0).with_source(attacker);
//! let (dealt, died) = health.apply_damage(&damage);
//! ```

pub mod damage;
pub mod health;
pub mod melee;
pub mod pickup;
pub mod projectile;

pub mod prelude {
    pub use crate::damage::DamageInfo;
    pub use crate::health::HealthPool;
    pub use crate::melee::{MeleeHit, MeleeParams};
    pub use crate::pickup::{AmmoDrop, DropField};
    pub use crate::projectile::{Flight, Projectile, ProjectileParams};
}

pub use prelude::*;
