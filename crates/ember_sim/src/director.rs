//! Population director
//!
//! Owns the hostile roster and everything about its lifecycle: timed
//! spawning around the player, boss scheduling, difficulty
//! progression, kill bookkeeping, and corpse removal. Difficulty only
//! ever rises, and an actor's stats are fixed by the level in effect
//! when it spawned.

use crate::events::SimEvent;
use crate::player::Player;
use ember_ai::actor::{AiEvent, Combatant};
use ember_ai::{Boss, Grunt};
use ember_combat::DropField;
use ember_core::{ActorId, ActorIdAllocator, EventQueue, WorldConfig};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

const LEVEL_SECONDS: f32 = 30.0;
const BASE_MAX_ENEMIES: u32 = 5;
const MAX_ENEMIES_PER_LEVEL: u32 = 3;
const BASE_SPAWN_INTERVAL: f32 = 5.0;
const SPAWN_INTERVAL_STEP: f32 = 0.3;
const MIN_SPAWN_INTERVAL: f32 = 0.5;
/// The first boss arrives shortly after the run starts
const INITIAL_BOSS_INTERVAL: f32 = 10.0;
const BOSS_INTERVAL_BASE: f32 = 60.0;
const BOSS_INTERVAL_STEP: f32 = 5.0;
const MIN_BOSS_INTERVAL: f32 = 30.0;
/// Automatic spawns land on a ring around the player
const SPAWN_RING_MIN: f32 = 30.0;
const SPAWN_RING_EXTRA: f32 = 20.0;
const BOSS_MIN_PLAYER_DISTANCE: f32 = 10.0;
const BOSS_PLACEMENT_ATTEMPTS: u32 = 16;
const SUMMON_RING_MIN: f32 = 5.0;
const SUMMON_RING_EXTRA: f32 = 3.0;
const STAMINA_PER_KILL: f32 = 15.0;

/// Director tuning the host may override
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DirectorConfig {
    /// Concurrent bosses allowed
    pub boss_cap: u32,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self { boss_cap: 1 }
    }
}

#[derive(Debug)]
pub struct Director {
    config: DirectorConfig,
    ids: ActorIdAllocator,
    pub(crate) grunts: Vec<Grunt>,
    pub(crate) bosses: Vec<Boss>,
    game_time: f32,
    difficulty_level: u32,
    kill_count: u32,
    bosses_defeated: u32,
    spawn_timer: f32,
    boss_spawn_timer: f32,
    boss_spawn_interval: f32,
}

impl Director {
    pub fn new(config: DirectorConfig) -> Self {
        Self {
            config,
            ids: ActorIdAllocator::new(),
            grunts: Vec::new(),
            bosses: Vec::new(),
            game_time: 0.0,
            difficulty_level: 1,
            kill_count: 0,
            bosses_defeated: 0,
            spawn_timer: 0.0,
            boss_spawn_timer: 0.0,
            boss_spawn_interval: INITIAL_BOSS_INTERVAL,
        }
    }

    pub fn game_time(&self) -> f32 {
        self.game_time
    }

    pub fn difficulty_level(&self) -> u32 {
        self.difficulty_level
    }

    pub fn kill_count(&self) -> u32 {
        self.kill_count
    }

    pub fn bosses_defeated(&self) -> u32 {
        self.bosses_defeated
    }

    /// Concurrent enemy cap at the current level
    pub fn max_enemies(&self) -> u32 {
        BASE_MAX_ENEMIES + MAX_ENEMIES_PER_LEVEL * (self.difficulty_level - 1)
    }

    /// Seconds between automatic grunt spawns at the current level
    pub fn spawn_interval(&self) -> f32 {
        (BASE_SPAWN_INTERVAL - SPAWN_INTERVAL_STEP * (self.difficulty_level - 1) as f32)
            .max(MIN_SPAWN_INTERVAL)
    }

    fn living_grunts(&self) -> u32 {
        self.grunts.iter().filter(|g| g.is_alive()).count() as u32
    }

    fn living_bosses(&self) -> u32 {
        self.bosses.iter().filter(|b| b.is_alive()).count() as u32
    }

    /// Run the roster for one tick
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        world: &WorldConfig,
        player: &mut Player,
        rng: &mut R,
        events: &mut EventQueue<SimEvent>,
        drops: &mut DropField,
    ) {
        self.advance_difficulty(dt, events);
        self.run_boss_spawner(dt, world, player.position(), rng, events);

        let mut summons: Vec<(Vec3, u32)> = Vec::new();
        let mut ai_out = Vec::new();

        for boss in &mut self.bosses {
            ai_out.clear();
            let id = boss.id();
            boss.update(dt, player.position(), rng, &mut ai_out);
            apply_ai_events(&ai_out, id, world, player, events, &mut summons);
        }
        for grunt in &mut self.grunts {
            ai_out.clear();
            let id = grunt.id();
            grunt.update(dt, player.position(), world, rng, &mut ai_out);
            apply_ai_events(&ai_out, id, world, player, events, &mut summons);
        }

        self.book_deaths(player, events);
        self.remove_corpses(dt, events, drops);

        for (center, count) in summons {
            self.spawn_summons(center, count, world, rng, events);
        }

        self.run_grunt_spawner(dt, world, player.position(), rng, events);
    }

    /// Credit any deaths not yet booked
    ///
    /// Called once per tick and again after each combat command, since
    /// melee and projectile damage land outside the roster update.
    pub(crate) fn book_deaths(&mut self, player: &mut Player, events: &mut EventQueue<SimEvent>) {
        for grunt in &mut self.grunts {
            let body = grunt.body_mut();
            if !body.health.is_alive() && !body.kill_credited {
                body.kill_credited = true;
                self.kill_count += 1;
                events.publish(SimEvent::ActorDied {
                    id: body.id,
                    pos: body.pos,
                });
                let heal = player.kill_heal_amount();
                player.heal(heal);
                player.heal_stamina(STAMINA_PER_KILL);
                log::debug!("grunt {} down, {} kills", body.id, self.kill_count);
            }
        }
        for boss in &mut self.bosses {
            let body = boss.body_mut();
            if !body.health.is_alive() && !body.kill_credited {
                body.kill_credited = true;
                self.bosses_defeated += 1;
                events.publish(SimEvent::BossDefeated {
                    id: body.id,
                    pos: body.pos,
                });
                // Each defeat brings the next boss sooner, to a floor
                self.boss_spawn_interval = (BOSS_INTERVAL_BASE
                    - BOSS_INTERVAL_STEP * self.bosses_defeated as f32)
                    .max(MIN_BOSS_INTERVAL);
                self.boss_spawn_timer = 0.0;
                log::info!(
                    "boss {} defeated, next in {:.0}s",
                    body.id,
                    self.boss_spawn_interval
                );
            }
        }
    }

    fn remove_corpses(
        &mut self,
        dt: f32,
        events: &mut EventQueue<SimEvent>,
        drops: &mut DropField,
    ) {
        self.grunts.retain_mut(|grunt| {
            if grunt.body_mut().despawn_elapsed(dt) {
                let pos = grunt.position();
                drops.spawn(pos);
                events.publish(SimEvent::DropSpawned { pos });
                false
            } else {
                true
            }
        });
        self.bosses
            .retain_mut(|boss| !boss.body_mut().despawn_elapsed(dt));
    }

    fn advance_difficulty(&mut self, dt: f32, events: &mut EventQueue<SimEvent>) {
        self.game_time += dt;
        let level = (self.game_time / LEVEL_SECONDS) as u32 + 1;
        if level > self.difficulty_level {
            self.difficulty_level = level;
            events.publish(SimEvent::DifficultyChanged { level });
            log::info!("difficulty raised to {level}");
        }
    }

    fn run_grunt_spawner<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        world: &WorldConfig,
        player_pos: Vec3,
        rng: &mut R,
        events: &mut EventQueue<SimEvent>,
    ) {
        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval() {
            self.spawn_timer = 0.0;
            let angle = rng.gen::<f32>() * TAU;
            let distance = SPAWN_RING_MIN + rng.gen::<f32>() * SPAWN_RING_EXTRA;
            let x = player_pos.x + angle.cos() * distance;
            let z = player_pos.z + angle.sin() * distance;
            let _ = self.spawn_grunt(x, z, world, rng, events);
        }
    }

    /// Spawn a grunt at (x, z), clamped to bounds, at the current
    /// difficulty. Returns `None` when the enemy cap is full.
    pub fn spawn_grunt<R: Rng + ?Sized>(
        &mut self,
        x: f32,
        z: f32,
        world: &WorldConfig,
        rng: &mut R,
        events: &mut EventQueue<SimEvent>,
    ) -> Option<ActorId> {
        if self.living_grunts() >= self.max_enemies() {
            log::debug!("enemy cap {} reached, spawn skipped", self.max_enemies());
            return None;
        }
        let clamped = world.clamp_to_bounds(Vec3::new(x, world.actor_height, z));
        let id = self.ids.next();
        let grunt = Grunt::spawn(id, clamped.x, clamped.z, self.difficulty_level, world, rng);
        events.publish(SimEvent::ActorSpawned {
            id,
            pos: grunt.position(),
        });
        self.grunts.push(grunt);
        Some(id)
    }

    fn run_boss_spawner<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        world: &WorldConfig,
        player_pos: Vec3,
        rng: &mut R,
        events: &mut EventQueue<SimEvent>,
    ) {
        self.boss_spawn_timer += dt;
        if self.boss_spawn_timer >= self.boss_spawn_interval {
            self.boss_spawn_timer = 0.0;
            let _ = self.spawn_boss(world, player_pos, rng, events);
        }
    }

    /// Spawn a boss somewhere away from the player
    ///
    /// Returns `None` when the boss cap is full. Placement rolls
    /// random map positions and keeps the first far enough from the
    /// player; a bounded retry count keeps this total.
    pub fn spawn_boss<R: Rng + ?Sized>(
        &mut self,
        world: &WorldConfig,
        player_pos: Vec3,
        rng: &mut R,
        events: &mut EventQueue<SimEvent>,
    ) -> Option<ActorId> {
        if self.living_bosses() >= self.config.boss_cap {
            log::debug!("boss cap {} reached, spawn skipped", self.config.boss_cap);
            return None;
        }

        let mut pos = None;
        for _ in 0..BOSS_PLACEMENT_ATTEMPTS {
            let candidate = Vec3::new(
                (rng.gen::<f32>() - 0.5) * 2.0 * world.half_extent,
                world.actor_height,
                (rng.gen::<f32>() - 0.5) * 2.0 * world.half_extent,
            );
            if candidate.distance(player_pos) >= BOSS_MIN_PLAYER_DISTANCE {
                pos = Some(candidate);
                break;
            }
        }
        let pos = pos.unwrap_or_else(|| {
            // Push straight out from the player as a last resort
            let angle = rng.gen::<f32>() * TAU;
            let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * BOSS_MIN_PLAYER_DISTANCE;
            let mut p = world.clamp_to_bounds(player_pos + offset);
            p.y = world.actor_height;
            p
        });

        let id = self.ids.next();
        self.bosses.push(Boss::spawn(id, pos.x, pos.z, world));
        events.publish(SimEvent::BossSpawned { id, pos });
        log::info!("boss {id} spawned at ({:.0}, {:.0})", pos.x, pos.z);
        Some(id)
    }

    fn spawn_summons<R: Rng + ?Sized>(
        &mut self,
        center: Vec3,
        count: u32,
        world: &WorldConfig,
        rng: &mut R,
        events: &mut EventQueue<SimEvent>,
    ) {
        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU;
            let distance = SUMMON_RING_MIN + rng.gen::<f32>() * SUMMON_RING_EXTRA;
            let _ = self.spawn_grunt(
                center.x + angle.cos() * distance,
                center.z + angle.sin() * distance,
                world,
                rng,
                events,
            );
        }
    }

    /// Living actors in roster order: grunts first, then bosses
    pub(crate) fn living_candidates(&self) -> Vec<(ActorId, Vec3, bool)> {
        self.grunts
            .iter()
            .filter(|g| g.is_alive())
            .map(|g| (g.id(), g.position(), false))
            .chain(
                self.bosses
                    .iter()
                    .filter(|b| b.is_alive())
                    .map(|b| (b.id(), b.position(), true)),
            )
            .collect()
    }

    pub(crate) fn combatant_mut(&mut self, id: ActorId) -> Option<&mut dyn Combatant> {
        if let Some(grunt) = self.grunts.iter_mut().find(|g| g.id() == id) {
            return Some(grunt as &mut dyn Combatant);
        }
        self.bosses
            .iter_mut()
            .find(|b| b.id() == id)
            .map(|b| b as &mut dyn Combatant)
    }
}

/// Apply one actor's update output in a fixed order
///
/// Summons are deferred to the end of the roster pass so spawning
/// never aliases the actor that requested it.
fn apply_ai_events(
    ai_out: &[AiEvent],
    source: ActorId,
    world: &WorldConfig,
    player: &mut Player,
    events: &mut EventQueue<SimEvent>,
    summons: &mut Vec<(Vec3, u32)>,
) {
    for event in ai_out {
        match *event {
            AiEvent::HitPlayer { damage, knockback } => {
                player.take_damage(damage);
                if knockback != Vec3::ZERO {
                    player.apply_knockback(knockback, world);
                }
            }
            AiEvent::Dialogue(text) => events.publish(SimEvent::Dialogue { text }),
            AiEvent::SummonMinions { center, count } => summons.push((center, count)),
            AiEvent::PhaseChanged { phase } => {
                events.publish(SimEvent::BossPhaseChanged { id: source, phase });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_combat::DamageInfo;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Fixture {
        director: Director,
        player: Player,
        world: WorldConfig,
        rng: StdRng,
        events: EventQueue<SimEvent>,
        drops: DropField,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                director: Director::new(DirectorConfig::default()),
                player: Player::new(),
                world: WorldConfig::default(),
                rng: StdRng::seed_from_u64(11),
                events: EventQueue::new(),
                drops: DropField::new(),
            }
        }

        fn update(&mut self, dt: f32) {
            self.director.update(
                dt,
                &self.world,
                &mut self.player,
                &mut self.rng,
                &mut self.events,
                &mut self.drops,
            );
        }

        fn drained(&mut self) -> Vec<SimEvent> {
            self.events.drain().collect()
        }
    }

    #[test]
    fn test_difficulty_rises_every_thirty_seconds() {
        let mut fx = Fixture::new();
        for _ in 0..130 {
            fx.update(0.5);
        }
        // 65 seconds in: level 3
        assert_eq!(fx.director.difficulty_level(), 3);

        let levels: Vec<u32> = fx
            .drained()
            .iter()
            .filter_map(|e| match e {
                SimEvent::DifficultyChanged { level } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![2, 3]);
    }

    #[test]
    fn test_difficulty_scales_caps_and_intervals() {
        let mut fx = Fixture::new();
        assert_eq!(fx.director.max_enemies(), 5);
        assert!((fx.director.spawn_interval() - 5.0).abs() < 1e-5);

        fx.update(61.0);
        assert_eq!(fx.director.difficulty_level(), 3);
        assert_eq!(fx.director.max_enemies(), 11);
        assert!((fx.director.spawn_interval() - 4.4).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_interval_floors() {
        let mut fx = Fixture::new();
        fx.update(3000.0);
        assert!(fx.director.difficulty_level() > 16);
        assert!((fx.director.spawn_interval() - MIN_SPAWN_INTERVAL).abs() < 1e-5);
    }

    #[test]
    fn test_enemy_cap_refuses_spawns() {
        let mut fx = Fixture::new();
        let Fixture {
            director,
            world,
            rng,
            events,
            ..
        } = &mut fx;

        for i in 0..5 {
            assert!(director
                .spawn_grunt(10.0 + i as f32, 10.0, world, rng, events)
                .is_some());
        }
        assert!(director.spawn_grunt(20.0, 20.0, world, rng, events).is_none());
        assert_eq!(director.grunts.len(), 5);
    }

    #[test]
    fn test_automatic_spawns_land_on_the_ring() {
        let mut fx = Fixture::new();
        fx.update(5.1);

        assert_eq!(fx.director.grunts.len(), 1);
        let pos = fx.director.grunts[0].position();
        let planar = Vec3::new(pos.x, 2.0, pos.z).distance(fx.player.position());
        assert!(planar >= 29.0 && planar <= 51.0);
        assert!(fx
            .drained()
            .iter()
            .any(|e| matches!(e, SimEvent::ActorSpawned { .. })));
    }

    #[test]
    fn test_first_boss_arrives_at_ten_seconds() {
        let mut fx = Fixture::new();
        fx.update(9.0);
        assert!(fx.director.bosses.is_empty());

        fx.update(1.1);
        assert_eq!(fx.director.bosses.len(), 1);
        assert!(
            fx.director.bosses[0]
                .position()
                .distance(fx.player.position())
                >= BOSS_MIN_PLAYER_DISTANCE
        );
        assert!(fx
            .drained()
            .iter()
            .any(|e| matches!(e, SimEvent::BossSpawned { .. })));
    }

    #[test]
    fn test_boss_cap_holds() {
        let mut fx = Fixture::new();
        let Fixture {
            director,
            player,
            world,
            rng,
            events,
            ..
        } = &mut fx;

        assert!(director
            .spawn_boss(world, player.position(), rng, events)
            .is_some());
        assert!(director
            .spawn_boss(world, player.position(), rng, events)
            .is_none());
    }

    #[test]
    fn test_kill_bookkeeping_heals_the_player() {
        let mut fx = Fixture::new();
        let id = {
            let Fixture {
                director,
                world,
                rng,
                events,
                ..
            } = &mut fx;
            director.spawn_grunt(50.0, 50.0, world, rng, events).unwrap()
        };
        fx.player.take_damage(40.0);

        let mut ai_out = Vec::new();
        fx.director
            .combatant_mut(id)
            .unwrap()
            .take_damage(&DamageInfo::new(500.0), &mut fx.rng, &mut ai_out);
        fx.director.book_deaths(&mut fx.player, &mut fx.events);

        assert_eq!(fx.director.kill_count(), 1);
        assert_eq!(fx.player.health(), 70.0);
        assert!(fx
            .drained()
            .iter()
            .any(|e| matches!(e, SimEvent::ActorDied { id: died, .. } if *died == id)));

        // Booking is idempotent
        fx.director.book_deaths(&mut fx.player, &mut fx.events);
        assert_eq!(fx.director.kill_count(), 1);
        assert_eq!(fx.player.health(), 70.0);
    }

    #[test]
    fn test_corpse_drops_ammo_after_grace() {
        let mut fx = Fixture::new();
        let id = {
            let Fixture {
                director,
                world,
                rng,
                events,
                ..
            } = &mut fx;
            director.spawn_grunt(50.0, 50.0, world, rng, events).unwrap()
        };

        let mut ai_out = Vec::new();
        fx.director
            .combatant_mut(id)
            .unwrap()
            .take_damage(&DamageInfo::new(500.0), &mut fx.rng, &mut ai_out);

        // Still on the roster through the grace period
        fx.update(1.0);
        assert_eq!(fx.director.grunts.len(), 1);

        fx.update(1.5);
        assert!(fx.director.grunts.is_empty());
        assert_eq!(fx.drops.len(), 1);
        assert!(fx
            .drained()
            .iter()
            .any(|e| matches!(e, SimEvent::DropSpawned { .. })));
    }

    #[test]
    fn test_boss_defeat_reschedules_the_spawner() {
        let mut fx = Fixture::new();
        let id = {
            let Fixture {
                director,
                player,
                world,
                rng,
                events,
                ..
            } = &mut fx;
            director
                .spawn_boss(world, player.position(), rng, events)
                .unwrap()
        };

        let mut ai_out = Vec::new();
        fx.director
            .combatant_mut(id)
            .unwrap()
            .take_damage(&DamageInfo::new(5000.0), &mut fx.rng, &mut ai_out);
        fx.director.book_deaths(&mut fx.player, &mut fx.events);

        assert_eq!(fx.director.bosses_defeated(), 1);
        assert!((fx.director.boss_spawn_interval - 55.0).abs() < 1e-5);
        assert_eq!(fx.director.boss_spawn_timer, 0.0);
        assert!(fx
            .drained()
            .iter()
            .any(|e| matches!(e, SimEvent::BossDefeated { .. })));
    }

    #[test]
    fn test_summons_ring_the_center_and_respect_the_cap() {
        let mut fx = Fixture::new();
        let center = Vec3::new(40.0, 1.0, 40.0);
        let Fixture {
            director,
            world,
            rng,
            events,
            ..
        } = &mut fx;

        director.spawn_summons(center, 3, world, rng, events);
        assert_eq!(director.grunts.len(), 3);
        for grunt in &director.grunts {
            let d = grunt.position().distance(center);
            assert!(d >= SUMMON_RING_MIN - 0.01 && d <= SUMMON_RING_MIN + SUMMON_RING_EXTRA + 0.01);
        }

        // Only two slots left under the level-1 cap of five
        director.spawn_summons(center, 3, world, rng, events);
        assert_eq!(director.grunts.len(), 5);
    }
}
