//! Snapshot builder: converts ECS state into a `GameStateSnapshot`.

use glam::Vec2;

use orbit_arena_core::components::*;
use orbit_arena_core::enums::{EntityKind, GamePhase, SessionMode};
use orbit_arena_core::events::{AudioEvent, UiEvent};
use orbit_arena_core::state::*;
use orbit_arena_core::types::SimTime;

use crate::deferred::Decals;
use crate::orbit::OrbitWeaponSystem;
use crate::phase::PhaseDirector;
use crate::physics::PhysicsBackend;
use crate::registry::Registry;
use crate::session::{PvpSession, ScoreState};

/// Everything the snapshot reads besides the registry.
pub struct SnapshotSources<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub mode: SessionMode,
    pub director: &'a PhaseDirector,
    pub score: &'a ScoreState,
    pub pvp: &'a PvpSession,
    pub decals: &'a Decals,
}

pub fn build_snapshot(
    registry: &Registry,
    physics: &dyn PhysicsBackend,
    sources: SnapshotSources,
    audio_events: Vec<AudioEvent>,
    ui_events: Vec<UiEvent>,
) -> GameStateSnapshot {
    let world = registry.world();
    let pos = |meta: &EntityMeta| physics.position(meta.body).unwrap_or(Vec2::ZERO);

    let mut players: Vec<PlayerView> = world
        .query::<(&EntityMeta, &Character, &PlayerState, &OrbitWeaponSystem)>()
        .iter()
        .filter(|(_, (meta, ..))| !meta.is_dead)
        .map(|(_, (meta, character, state, orbit))| PlayerView {
            slot: state.slot,
            position: pos(meta),
            level: character.level,
            has_shield: state.has_shield,
            invulnerable_for: state.invulnerable_for,
            move_speed: character.move_speed,
            orbit: orbit.stats(),
            pulse: state.pulse,
        })
        .collect();
    players.sort_by_key(|p| p.slot);

    let enemies: Vec<EnemyView> = world
        .query::<(&EntityMeta, &Character, &EnemyState)>()
        .iter()
        .filter(|(_, (meta, ..))| !meta.is_dead)
        .map(|(_, (meta, character, enemy))| EnemyView {
            variant: enemy.variant,
            tier: character.level,
            position: pos(meta),
            velocity: physics.velocity(meta.body).unwrap_or(Vec2::ZERO),
        })
        .collect();

    let mut weapons = Vec::new();
    let mut projectiles = Vec::new();
    for (_entity, (meta, weapon, projectile)) in world
        .query::<(&EntityMeta, &Weapon, Option<&Projectile>)>()
        .iter()
    {
        if meta.is_dead {
            continue;
        }
        match projectile {
            Some(p) => projectiles.push(ProjectileView {
                position: pos(meta),
                direction: p.direction,
            }),
            None => weapons.push(WeaponView {
                owner: weapon.owner,
                position: pos(meta),
            }),
        }
    }

    let obstacles: Vec<ObstacleView> = world
        .query::<(&EntityMeta, &Obstacle)>()
        .iter()
        .filter(|(_, (meta, _))| !meta.is_dead)
        .map(|(_, (meta, obstacle))| ObstacleView {
            kind: obstacle.kind,
            position: pos(meta),
        })
        .collect();

    let items: Vec<ItemView> = world
        .query::<(&EntityMeta, &Item)>()
        .iter()
        .filter(|(_, (meta, _))| !meta.is_dead)
        .map(|(_, (meta, item))| ItemView {
            kind: item.kind,
            position: pos(meta),
        })
        .collect();

    GameStateSnapshot {
        time: sources.time,
        phase: sources.phase,
        mode: sources.mode,
        director: sources.director.view(),
        players,
        enemies,
        weapons,
        projectiles,
        obstacles,
        items,
        decals: sources.decals.views(),
        score: sources
            .score
            .view(registry.count(EntityKind::Enemy) as u32),
        pvp: sources.pvp.view(),
        audio_events,
        ui_events,
    }
}
