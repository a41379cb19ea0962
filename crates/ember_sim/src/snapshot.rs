//! Per-actor roster snapshots
//!
//! Read-only view handed to rendering and HUD collaborators once per
//! frame. Corpses in their despawn grace period are included so death
//! animations have something to draw.

use ember_ai::actor::{ActorState, Combatant};
use ember_core::ActorId;
use glam::Vec3;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub pos: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub state: ActorState,
    pub is_boss: bool,
}

impl ActorSnapshot {
    pub fn of(actor: &dyn Combatant) -> Self {
        let body = actor.body();
        Self {
            id: body.id,
            pos: body.pos,
            health: body.health.current,
            max_health: body.health.max,
            state: actor.state_label(),
            is_boss: actor.is_boss(),
        }
    }
}
