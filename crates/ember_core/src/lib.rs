//! Ember Core - Shared Simulation Types
//!
//! This crate provides the foundation types shared by the combat and AI
//! crates.
//!
//! # Features
//!
//! - Actor identifiers and allocation
//! - World bounds and tuning configuration
//! - Synchronous event queue with deterministic drain order
//! - Command validation errors
//!
//! # Example
//!
//! ```ignore
//! use ember_core::prelude::*;
//!
//! let mut ids = ActorIdAllocator::new();
//! let id = ids.next();
//!
//! let config = WorldConfig::default();
//! config.validate()?;
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod id;

pub mod prelude {
    pub use crate::config::{ConfigError, WorldConfig};
    pub use crate::error::CommandError;
    pub use crate::events::EventQueue;
    pub use crate::id::{ActorId, ActorIdAllocator};
}

pub use prelude::*;
