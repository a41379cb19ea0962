//! Boss phase machine
//!
//! A rare, high-stat hostile with cooldown-gated special abilities and
//! a one-way enrage at low health. Unlike grunts the boss has no
//! detection cutoff: it pursues the player from anywhere.

use crate::actor::{ActorBody, ActorState, AiEvent, Combatant};
use crate::dialogue;
use crate::schedule::EffectQueue;
use ember_combat::{DamageInfo, HealthPool};
use ember_core::{ActorId, WorldConfig};
use glam::Vec3;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

const MAX_HEALTH: f32 = 500.0;
const DAMAGE: f32 = 30.0;
const BASE_SPEED: f32 = 4.0;
const ATTACK_RANGE: f32 = 4.0;
const DETECTION_RANGE: f32 = 40.0;
const ATTACK_INTERVAL: f32 = 2.0;

const CHARGE_INTERVAL: f32 = 8.0;
const CHARGE_MIN_RANGE: f32 = 5.0;
const CHARGE_MAX_RANGE: f32 = 20.0;
const CHARGE_SPEED: f32 = 20.0;
const CHARGE_DURATION: f32 = 1.5;
const CHARGE_CONTACT_RANGE: f32 = 3.0;
const CHARGE_KNOCKBACK: f32 = 5.0;

const SMASH_INTERVAL: f32 = 12.0;
const SMASH_TRIGGER_RANGE: f32 = 6.0;
const SMASH_WINDUP: f32 = 0.8;
const SMASH_RADIUS: f32 = 8.0;

const SUMMON_INTERVAL: f32 = 15.0;
const SUMMON_WINDUP: f32 = 1.0;
const SUMMON_COUNT: u32 = 3;

const ENRAGE_THRESHOLD: f32 = 0.3;
const CHASE_SPEED_FACTOR: f32 = 1.5;
const HURT_DIALOGUE_CHANCE: f32 = 0.3;
const DESPAWN_GRACE: f32 = 3.0;

/// Boss behavior states
///
/// `Enraged` is a transient marker set at the phase flip; the next
/// behavior pass supersedes it with Chase/Attack/ability states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    Idle,
    Chase,
    Attack,
    Charge,
    Smash,
    Summon,
    Enraged,
}

impl BossState {
    fn label(self) -> ActorState {
        match self {
            Self::Idle => ActorState::Idle,
            Self::Chase => ActorState::Chase,
            Self::Attack => ActorState::Attack,
            Self::Charge => ActorState::Charge,
            Self::Smash => ActorState::Smash,
            Self::Summon => ActorState::Summon,
            Self::Enraged => ActorState::Enraged,
        }
    }
}

/// Deferred ability payloads; fired by the effect queue after wind-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum BossEffect {
    SmashImpact,
    ReleaseSummon,
}

/// The boss actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    body: ActorBody,
    state: BossState,
    /// 1 until the enrage flip; 2 afterwards, irreversibly
    phase: u8,
    #[serde(skip)]
    charge_cooldown: f32,
    #[serde(skip)]
    smash_cooldown: f32,
    #[serde(skip)]
    summon_cooldown: f32,
    #[serde(skip)]
    charge_dir: Vec3,
    #[serde(skip)]
    charge_timer: f32,
    #[serde(skip)]
    effects: EffectQueue<BossEffect>,
}

impl Boss {
    /// Spawn a boss at (x, z)
    pub fn spawn(id: ActorId, x: f32, z: f32, world: &WorldConfig) -> Self {
        Self {
            body: ActorBody {
                id,
                pos: Vec3::new(x, world.actor_height, z),
                vel: Vec3::ZERO,
                base_speed: BASE_SPEED,
                speed: BASE_SPEED,
                damage: DAMAGE,
                attack_range: ATTACK_RANGE,
                detection_range: DETECTION_RANGE,
                attack_interval: ATTACK_INTERVAL,
                attack_cooldown: 0.0,
                state_timer: 0.0,
                health: HealthPool::new(MAX_HEALTH),
                despawn_timer: None,
                kill_credited: false,
            },
            state: BossState::Idle,
            phase: 1,
            charge_cooldown: 0.0,
            smash_cooldown: 0.0,
            summon_cooldown: 0.0,
            charge_dir: Vec3::ZERO,
            charge_timer: 0.0,
            effects: EffectQueue::new(),
        }
    }

    /// Current behavior state
    pub fn state(&self) -> BossState {
        self.state
    }

    /// Current phase (1 or 2)
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Run one simulation tick
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        player_pos: Vec3,
        rng: &mut R,
        out: &mut Vec<AiEvent>,
    ) {
        if !self.body.health.is_alive() {
            return;
        }

        self.body.tick_timers(dt);
        // Ability timers run down regardless of state
        self.charge_cooldown -= dt;
        self.smash_cooldown -= dt;
        self.summon_cooldown -= dt;

        if self.phase == 1 && self.body.health.fraction() <= ENRAGE_THRESHOLD {
            self.enrage(out);
        }

        // Wind-ups that came due. The liveness guard above means a
        // dead boss never reaches this point.
        for effect in self.effects.tick(dt) {
            self.apply_effect(effect, player_pos, out);
        }

        let d = self.body.distance_to(player_pos);

        // Ability priority, skipped while a charge is running
        if self.state != BossState::Charge {
            if self.charge_cooldown <= 0.0 && d > CHARGE_MIN_RANGE && d < CHARGE_MAX_RANGE {
                self.start_charge(player_pos, out);
            } else if self.smash_cooldown <= 0.0 && d < SMASH_TRIGGER_RANGE {
                self.start_smash(out);
            } else if self.summon_cooldown <= 0.0 && self.phase == 2 {
                self.start_summon(out);
            }
        }

        match self.state {
            BossState::Charge => self.run_charge(dt, player_pos, out),
            BossState::Smash | BossState::Summon => self.body.vel = Vec3::ZERO,
            _ => {
                if d < self.body.attack_range {
                    self.state = BossState::Attack;
                    self.run_attack(player_pos, out);
                } else {
                    // No detection cutoff: the boss always pursues
                    self.state = BossState::Chase;
                    self.run_chase(player_pos);
                }
            }
        }

        self.body.integrate(dt);
    }

    fn enrage(&mut self, out: &mut Vec<AiEvent>) {
        self.phase = 2;
        self.state = BossState::Enraged;
        self.body.speed = self.body.base_speed * 1.5;
        self.body.damage *= 1.3;
        self.body.attack_interval *= 0.7;

        log::info!("boss {} enraged at {:.0}% health", self.body.id, self.body.health.fraction() * 100.0);
        out.push(AiEvent::PhaseChanged { phase: 2 });
        out.push(AiEvent::Dialogue(dialogue::BOSS_ENRAGE));
    }

    fn start_charge(&mut self, player_pos: Vec3, out: &mut Vec<AiEvent>) {
        self.state = BossState::Charge;
        self.charge_cooldown = CHARGE_INTERVAL;
        self.charge_timer = CHARGE_DURATION;
        self.charge_dir = (player_pos - self.body.pos).normalize_or_zero();
        self.body.vel = Vec3::ZERO;
        out.push(AiEvent::Dialogue(dialogue::BOSS_CHARGE));
    }

    fn run_charge(&mut self, dt: f32, player_pos: Vec3, out: &mut Vec<AiEvent>) {
        self.charge_timer -= dt;

        if self.charge_timer > 0.0 {
            self.body.vel = self.charge_dir * CHARGE_SPEED;

            if self.body.distance_to(player_pos) < CHARGE_CONTACT_RANGE {
                let knock_dir = (player_pos - self.body.pos).normalize_or_zero();
                out.push(AiEvent::HitPlayer {
                    damage: self.body.damage * 2.0,
                    knockback: knock_dir * CHARGE_KNOCKBACK,
                });
            }
        } else {
            self.state = BossState::Idle;
            self.body.vel = Vec3::ZERO;
        }
    }

    fn start_smash(&mut self, out: &mut Vec<AiEvent>) {
        self.state = BossState::Smash;
        self.smash_cooldown = SMASH_INTERVAL;
        self.effects.schedule(SMASH_WINDUP, BossEffect::SmashImpact);
        self.body.vel = Vec3::ZERO;
        out.push(AiEvent::Dialogue(dialogue::BOSS_SMASH));
    }

    fn start_summon(&mut self, out: &mut Vec<AiEvent>) {
        self.state = BossState::Summon;
        self.summon_cooldown = SUMMON_INTERVAL;
        self.effects.schedule(SUMMON_WINDUP, BossEffect::ReleaseSummon);
        self.body.vel = Vec3::ZERO;
        out.push(AiEvent::Dialogue(dialogue::BOSS_SUMMON));
    }

    fn apply_effect(&mut self, effect: BossEffect, player_pos: Vec3, out: &mut Vec<AiEvent>) {
        match effect {
            BossEffect::SmashImpact => {
                if self.body.distance_to(player_pos) < SMASH_RADIUS {
                    out.push(AiEvent::HitPlayer {
                        damage: self.body.damage * 1.5,
                        knockback: Vec3::ZERO,
                    });
                }
                self.state = BossState::Idle;
            }
            BossEffect::ReleaseSummon => {
                out.push(AiEvent::SummonMinions {
                    center: self.body.pos,
                    count: SUMMON_COUNT,
                });
                self.state = BossState::Idle;
            }
        }
    }

    fn run_attack(&mut self, player_pos: Vec3, out: &mut Vec<AiEvent>) {
        self.body.vel = Vec3::ZERO;
        if self.body.attack_cooldown <= 0.0 {
            if self.body.distance_to(player_pos) <= self.body.attack_range {
                out.push(AiEvent::HitPlayer {
                    damage: self.body.damage,
                    knockback: Vec3::ZERO,
                });
            }
            self.body.attack_cooldown = self.body.attack_interval;
        }
    }

    fn run_chase(&mut self, player_pos: Vec3) {
        let dir = (player_pos - self.body.pos).normalize_or_zero();
        self.body.vel = dir * (self.body.speed * CHASE_SPEED_FACTOR);
    }
}

impl Combatant for Boss {
    fn body(&self) -> &ActorBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut ActorBody {
        &mut self.body
    }

    fn is_boss(&self) -> bool {
        true
    }

    fn state_label(&self) -> ActorState {
        if !self.body.health.is_alive() {
            ActorState::Dead
        } else {
            self.state.label()
        }
    }

    fn take_damage(
        &mut self,
        damage: &DamageInfo,
        rng: &mut dyn RngCore,
        out: &mut Vec<AiEvent>,
    ) -> (f32, bool) {
        if !self.body.health.is_alive() {
            return (0.0, false);
        }

        self.body.pos += damage.knockback;
        let (dealt, died) = self.body.health.apply_damage(damage);

        if died {
            self.body.begin_despawn(DESPAWN_GRACE);
            // Anything still winding up dies with the boss
            self.effects.clear();
        } else if dealt > 0.0 && rng.gen::<f32>() < HURT_DIALOGUE_CHANCE {
            out.push(AiEvent::Dialogue(dialogue::pick(rng, dialogue::BOSS_HURT)));
        }
        (dealt, died)
    }
}
