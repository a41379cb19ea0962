//! Tick-granular deferred effects
//!
//! Ability wind-ups (a boss smash's pre-impact window, a summon's
//! cast time) are scheduled here and fire on a later tick, never as a
//! blocking wait. The queue is owned by its actor and dropped with it;
//! the applier must still confirm the actor is alive, since it may die
//! during a wind-up.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScheduledEffect<K> {
    remaining: f32,
    kind: K,
}

/// Per-actor queue of effects keyed by remaining delay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectQueue<K> {
    pending: Vec<ScheduledEffect<K>>,
}

impl<K> EffectQueue<K> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Schedule an effect to fire after `delay` seconds
    pub fn schedule(&mut self, delay: f32, kind: K) {
        self.pending.push(ScheduledEffect {
            remaining: delay,
            kind,
        });
    }

    /// Advance by `dt` and collect every effect that came due, in
    /// schedule order
    pub fn tick(&mut self, dt: f32) -> Vec<K> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            self.pending[i].remaining -= dt;
            if self.pending[i].remaining <= 0.0 {
                due.push(self.pending.remove(i).kind);
            } else {
                i += 1;
            }
        }
        due
    }

    /// Whether anything is still pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending effect
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<K> Default for EffectQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
