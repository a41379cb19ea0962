//! Actor identifiers

use core::fmt;
use serde::{Deserialize, Serialize};

/// A unique identifier for an actor in the roster
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    /// Create an ID from a raw index
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index
    #[inline]
    pub const fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic ID allocator owned by the roster owner
///
/// The roster is single-owner, so no atomics are needed here.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ActorIdAllocator {
    next: u32,
}

impl ActorIdAllocator {
    /// Create a new allocator
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next unique ID
    pub fn next(&mut self) -> ActorId {
        let id = ActorId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
