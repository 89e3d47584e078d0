//! Simulation engine: the session controller.
//!
//! `SimulationEngine` owns the entity registry, the physics backend and all
//! session state, processes player commands, runs the per-tick pipeline in a
//! fixed order, and produces `GameStateSnapshot`s. Completely headless.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use orbit_arena_core::commands::PlayerCommand;
use orbit_arena_core::components::{Character, PlayerState};
use orbit_arena_core::enums::{GamePhase, SessionMode};
use orbit_arena_core::events::{AudioEvent, UiEvent};
use orbit_arena_core::state::GameStateSnapshot;
use orbit_arena_core::types::SimTime;

use crate::collision::{self, ResolveContext, SessionEnd};
use crate::config::SimConfig;
use crate::deferred::{Decals, DeferredAction, DeferredQueue};
use crate::phase::PhaseDirector;
use crate::physics::{CircleWorld, PhysicsBackend};
use crate::progression::{self, Effects};
use crate::registry::Registry;
use crate::session::{PvpSession, ScoreState};
use crate::systems;
use crate::systems::snapshot::SnapshotSources;
use crate::systems::spawner::SpawnContext;
use crate::world_setup;

/// The simulation engine. Owns the registry, the physics world and all sim state.
pub struct SimulationEngine<P: PhysicsBackend = CircleWorld> {
    config: SimConfig,
    registry: Registry,
    physics: P,
    time: SimTime,
    phase: GamePhase,
    mode: SessionMode,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    audio_events: Vec<AudioEvent>,
    ui_events: Vec<UiEvent>,
    director: PhaseDirector,
    deferred: DeferredQueue,
    ring_rebuilds: Vec<Entity>,
    decals: Decals,
    score: ScoreState,
    pvp: PvpSession,
}

impl SimulationEngine<CircleWorld> {
    /// Create an engine backed by the built-in circle physics.
    pub fn new(config: SimConfig) -> Self {
        Self::with_physics(config, CircleWorld::new())
    }
}

impl<P: PhysicsBackend> SimulationEngine<P> {
    /// Create an engine on top of any physics backend.
    pub fn with_physics(config: SimConfig, physics: P) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            registry: Registry::new(),
            physics,
            time: SimTime::default(),
            phase: GamePhase::default(),
            mode: SessionMode::default(),
            rng,
            command_queue: VecDeque::new(),
            audio_events: Vec::new(),
            ui_events: Vec::new(),
            director: PhaseDirector::new(),
            deferred: DeferredQueue::new(),
            ring_rebuilds: Vec::new(),
            decals: Decals::default(),
            score: ScoreState::default(),
            pvp: PvpSession::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame and return the resulting snapshot.
    /// `frame_dt` is clamped to `max_frame_dt`.
    pub fn tick(&mut self, frame_dt: f32) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let dt = if frame_dt.is_finite() {
                frame_dt.clamp(0.0, self.config.max_frame_dt)
            } else {
                0.0
            };
            self.run_systems(dt);
        }

        self.snapshot()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn director(&self) -> &PhaseDirector {
        &self.director
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn pvp(&self) -> &PvpSession {
        &self.pvp
    }

    /// Read-only access to the registry (and through it, the ECS world).
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Live player entity in `slot`.
    pub fn player(&self, slot: u8) -> Option<Entity> {
        collision::player_by_slot(&self.registry, slot)
    }

    /// Current position of an entity's body.
    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.registry.position(&self.physics, entity)
    }

    /// Spawn helpers for scenario tests.
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        variant: orbit_arena_core::enums::EnemyVariant,
        tier: u32,
        position: Vec2,
    ) -> Entity {
        world_setup::spawn_enemy(&mut self.registry, &mut self.physics, variant, tier, position)
    }

    #[cfg(test)]
    pub fn spawn_test_projectile(&mut self, origin: Vec2, direction: Vec2, speed: f32) -> Entity {
        world_setup::spawn_projectile(&mut self.registry, &mut self.physics, origin, direction, speed)
    }

    #[cfg(test)]
    pub fn spawn_test_obstacle(
        &mut self,
        kind: orbit_arena_core::enums::ObstacleKind,
        position: Vec2,
    ) -> Entity {
        world_setup::spawn_obstacle(&mut self.registry, &mut self.physics, kind, position)
    }

    #[cfg(test)]
    pub fn spawn_test_item(
        &mut self,
        kind: orbit_arena_core::enums::ItemKind,
        position: Vec2,
    ) -> Entity {
        world_setup::spawn_item(&mut self.registry, &mut self.physics, kind, position)
    }

    #[cfg(test)]
    pub fn teleport(&mut self, entity: Entity, position: Vec2) {
        if let Some(body) = self.registry.body(entity) {
            self.physics.set_position(body, position);
        }
    }

    /// Direct access to the director, for jumping to later phases.
    #[cfg(test)]
    pub fn director_mut(&mut self) -> &mut PhaseDirector {
        &mut self.director
    }

    /// Level up the player in `slot` outside of combat.
    #[cfg(test)]
    pub fn level_up_player(&mut self, slot: u8) -> bool {
        let Some(player) = self.player(slot) else {
            return false;
        };
        let now = self.time.elapsed_secs;
        self.effects(now).level_up(player)
    }

    #[cfg(test)]
    fn effects(&mut self, now: f64) -> Effects<'_> {
        Effects {
            registry: &mut self.registry,
            physics: &mut self.physics,
            deferred: &mut self.deferred,
            audio: &mut self.audio_events,
            rebuilds: &mut self.ring_rebuilds,
            now,
            mode: self.mode,
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = command.validate() {
                log::warn!("rejected {command:?}: {err}");
                continue;
            }
            self.handle_command(command);
        }
    }

    /// Handle a single, already validated command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartSinglePlayer => self.start_single_player(),
            PlayerCommand::StartPvp { player_count } => self.start_pvp(player_count),
            PlayerCommand::Restart => match (self.phase, self.mode) {
                (GamePhase::MainMenu, _) => log::warn!("restart ignored: no session running"),
                (_, SessionMode::SinglePlayer) => self.start_single_player(),
                (_, SessionMode::Pvp) => self.start_pvp(self.pvp.player_count()),
            },
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::NextRound => {
                if self.phase == GamePhase::RoundOver && self.pvp.next_round() {
                    self.reset_world();
                    self.spawn_pvp_players();
                    self.pvp.start_battle();
                    self.phase = GamePhase::Active;
                    log::info!("pvp round {} started", self.pvp.round());
                }
            }
            PlayerCommand::SetIntent { slot, x, y } => {
                let Some(player) = self.player(slot) else {
                    return;
                };
                let mut intent = Vec2::new(x, y);
                if intent.length_squared() > 1.0 {
                    intent = intent.normalize();
                }
                if let Ok(mut character) = self.registry.world().get::<&mut Character>(player) {
                    character.intent = intent;
                }
            }
        }
    }

    /// Drop every entity, body and pending effect.
    fn reset_world(&mut self) {
        self.registry.clear(&mut self.physics);
        self.physics.drain_contacts();
        self.deferred.clear();
        self.ring_rebuilds.clear();
        self.decals.clear();
    }

    fn start_single_player(&mut self) {
        self.reset_world();
        self.director.reset();
        self.score = ScoreState::default();
        self.pvp.reset();
        self.mode = SessionMode::SinglePlayer;
        self.time = SimTime::default();
        world_setup::spawn_player(
            &mut self.registry,
            &mut self.physics,
            1,
            Vec2::ZERO,
            self.config.player_move_speed,
            self.mode,
        );
        self.phase = GamePhase::Active;
        self.ui_events.push(UiEvent::PhaseName {
            name: self.director.name(),
        });
        log::info!("single-player session started (seed {})", self.config.seed);
    }

    fn start_pvp(&mut self, player_count: u8) {
        self.reset_world();
        self.director.reset();
        self.score = ScoreState::default();
        self.pvp.init_session(player_count);
        self.mode = SessionMode::Pvp;
        self.time = SimTime::default();
        self.spawn_pvp_players();
        self.pvp.start_battle();
        self.phase = GamePhase::Active;
        log::info!("pvp match started with {player_count} players");
    }

    fn spawn_pvp_players(&mut self) {
        let count = self.pvp.player_count();
        for (i, position) in world_setup::pvp_spawn_points(count).into_iter().enumerate() {
            world_setup::spawn_player(
                &mut self.registry,
                &mut self.physics,
                i as u8 + 1,
                position,
                self.config.player_move_speed,
                SessionMode::Pvp,
            );
        }
    }

    /// Run the per-tick pipeline in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Detach bodies queued by last tick's deaths
        self.registry.flush_removals(&mut self.physics);

        // 2. Physics step
        self.physics.step(dt);
        self.time.advance(dt);
        let now = self.time.elapsed_secs;
        let contacts = self.physics.drain_contacts();

        // 3. Collision resolution
        let mut ctx = ResolveContext {
            fx: Effects {
                registry: &mut self.registry,
                physics: &mut self.physics,
                deferred: &mut self.deferred,
                audio: &mut self.audio_events,
                rebuilds: &mut self.ring_rebuilds,
                now,
                mode: self.mode,
            },
            director: &mut self.director,
            score: &mut self.score,
            pvp: &mut self.pvp,
            decals: &mut self.decals,
            ui: &mut self.ui_events,
            kills_per_level: self.config.kills_per_level,
        };
        if let Some(end) = collision::run(&mut ctx, &contacts) {
            self.end_session(end);
            self.registry.sweep_dead();
            return;
        }
        progression::rebuild_rings(
            &mut self.registry,
            &mut self.physics,
            &mut self.ring_rebuilds,
            self.mode,
        );

        // 4. Characters: intent, timers, orbit rings; then due deferred effects
        systems::characters::run(&mut self.registry, &mut self.physics, dt);
        self.apply_deferred(now);

        // 5. Arena boundary
        systems::arena::run(&mut self.registry, &mut self.physics, self.config.arena_radius);

        // 6. Enemy AI
        systems::enemy_ai::run(
            &mut self.registry,
            &mut self.physics,
            dt,
            &mut self.audio_events,
        );

        // 7. Transient lifetimes, then drop the dead
        systems::transient::run(&mut self.registry, dt);

        // 8. Spawns
        systems::spawner::run(&mut SpawnContext {
            registry: &mut self.registry,
            physics: &mut self.physics,
            rng: &mut self.rng,
            director: &mut self.director,
            config: &self.config,
            mode: self.mode,
        });
    }

    fn apply_deferred(&mut self, now: f64) {
        for action in self.deferred.drain_due(now) {
            let world = self.registry.world();
            match action {
                DeferredAction::RestoreMoveSpeed { entity } => {
                    if let (Ok(mut character), Ok(mut state)) = (
                        world.get::<&mut Character>(entity),
                        world.get::<&mut PlayerState>(entity),
                    ) {
                        character.move_speed = state.base_move_speed;
                        state.speed_boosted = false;
                    }
                }
                DeferredAction::EndPulse { entity } => {
                    if let Ok(mut state) = world.get::<&mut PlayerState>(entity) {
                        state.pulse = false;
                    }
                }
                DeferredAction::ExpireDecal { decal_id } => self.decals.expire(decal_id),
            }
        }
    }

    fn end_session(&mut self, end: SessionEnd) {
        self.phase = match end {
            SessionEnd::GameOver | SessionEnd::MatchOver { .. } => GamePhase::GameOver,
            SessionEnd::RoundOver { .. } => GamePhase::RoundOver,
        };
        self.deferred.clear();
        self.ring_rebuilds.clear();
        self.decals.clear();
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        let audio_events = std::mem::take(&mut self.audio_events);
        let ui_events = std::mem::take(&mut self.ui_events);
        systems::snapshot::build_snapshot(
            &self.registry,
            &self.physics,
            SnapshotSources {
                time: self.time,
                phase: self.phase,
                mode: self.mode,
                director: &self.director,
                score: &self.score,
                pvp: &self.pvp,
                decals: &self.decals,
            },
            audio_events,
            ui_events,
        )
    }
}
