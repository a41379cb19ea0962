//! Events the simulation emits to its host
//!
//! One-way notifications for UI, audio, and VFX collaborators; the
//! host drains them after each tick. Nothing here feeds back into the
//! simulation.

use ember_ai::actor::AiEvent;
use ember_core::{ActorId, EventQueue};
use glam::Vec3;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SimEvent {
    ActorSpawned { id: ActorId, pos: Vec3 },
    ActorDied { id: ActorId, pos: Vec3 },
    BossSpawned { id: ActorId, pos: Vec3 },
    BossPhaseChanged { id: ActorId, phase: u8 },
    BossDefeated { id: ActorId, pos: Vec3 },
    DifficultyChanged { level: u32 },
    Dialogue { text: &'static str },
    DropSpawned { pos: Vec3 },
    AmmoCollected { amount: u32 },
}

/// Forward dialogue lines from a damage reaction to the host queue
///
/// Damage handlers only ever speak; movement and summon effects come
/// out of the per-tick update path instead.
pub(crate) fn forward_dialogue(ai_out: &[AiEvent], events: &mut EventQueue<SimEvent>) {
    for event in ai_out {
        if let AiEvent::Dialogue(text) = *event {
            events.publish(SimEvent::Dialogue { text });
        }
    }
}
