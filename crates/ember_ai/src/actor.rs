//! Shared actor body and the capability seam between AI and combat

use ember_combat::{DamageInfo, HealthPool};
use ember_core::ActorId;
use glam::Vec3;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Behavior state exposed to the outside world
///
/// Grunts and bosses run different machines internally; snapshots and
/// events report through this shared set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorState {
    Idle,
    Patrol,
    Chase,
    Attack,
    Flee,
    Charge,
    Smash,
    Summon,
    Enraged,
    Dead,
}

/// Output of a single actor's AI update, drained by the simulation
///
/// Actors never touch the player or the roster directly; they describe
/// what happened and the simulation applies it in a fixed order.
#[derive(Debug, Clone, PartialEq)]
pub enum AiEvent {
    /// The actor landed a hit on the player
    HitPlayer { damage: f32, knockback: Vec3 },
    /// A dialogue line for the UI collaborator
    Dialogue(&'static str),
    /// A boss summon wind-up completed
    SummonMinions { center: Vec3, count: u32 },
    /// A boss entered a new phase
    PhaseChanged { phase: u8 },
}

/// The bookkeeping every hostile actor carries
///
/// Position is mutated only by the owning actor's update and by
/// external knockback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorBody {
    pub id: ActorId,
    pub pos: Vec3,
    pub vel: Vec3,
    /// Speed before any state multiplier
    pub base_speed: f32,
    /// Current movement speed (enrage rewrites this for bosses)
    pub speed: f32,
    pub damage: f32,
    pub attack_range: f32,
    pub detection_range: f32,
    pub attack_interval: f32,
    #[serde(skip)]
    pub attack_cooldown: f32,
    /// Seconds spent in the current behavior state
    #[serde(skip)]
    pub state_timer: f32,
    pub health: HealthPool,
    /// Remaining death-animation grace; `Some` only once dead
    #[serde(skip)]
    pub despawn_timer: Option<f32>,
    /// Whether the director has already booked this actor's death
    #[serde(skip)]
    pub kill_credited: bool,
}

impl ActorBody {
    /// Advance shared timers at the top of an update
    pub fn tick_timers(&mut self, dt: f32) {
        self.state_timer += dt;
        self.attack_cooldown -= dt;
    }

    /// Integrate velocity into position
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Distance to a point
    #[inline]
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.pos.distance(point)
    }

    /// Begin the death-animation grace period
    pub fn begin_despawn(&mut self, grace: f32) {
        self.vel = Vec3::ZERO;
        self.despawn_timer = Some(grace);
    }

    /// Tick the grace period; true once the corpse should leave the
    /// roster
    pub fn despawn_elapsed(&mut self, dt: f32) -> bool {
        match &mut self.despawn_timer {
            Some(t) => {
                *t -= dt;
                *t <= 0.0
            }
            None => false,
        }
    }
}

/// The capability set shared by grunts and bosses
///
/// Combat resolution and snapshots work through this seam so they
/// never care which machine is behind it.
pub trait Combatant {
    fn body(&self) -> &ActorBody;
    fn body_mut(&mut self) -> &mut ActorBody;
    fn is_boss(&self) -> bool;
    /// The externally visible behavior state
    fn state_label(&self) -> ActorState;
    /// Apply damage plus knockback; returns (dealt, died)
    fn take_damage(
        &mut self,
        damage: &DamageInfo,
        rng: &mut dyn RngCore,
        out: &mut Vec<AiEvent>,
    ) -> (f32, bool);

    /// Identifier shortcut
    fn id(&self) -> ActorId {
        self.body().id
    }

    /// Position shortcut
    fn position(&self) -> Vec3 {
        self.body().pos
    }

    /// Liveness shortcut
    fn is_alive(&self) -> bool {
        self.body().health.is_alive()
    }
}
