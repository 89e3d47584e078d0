//! Game state snapshot: the complete visible state sent to the host each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, UiEvent};
use crate::types::{OrbitStats, SimTime};

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub mode: SessionMode,
    pub director: DirectorView,
    pub players: Vec<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub weapons: Vec<WeaponView>,
    pub projectiles: Vec<ProjectileView>,
    pub obstacles: Vec<ObstacleView>,
    pub items: Vec<ItemView>,
    pub decals: Vec<DecalView>,
    pub score: ScoreView,
    pub pvp: PvpView,
    pub audio_events: Vec<AudioEvent>,
    pub ui_events: Vec<UiEvent>,
}

/// Phase director progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorView {
    pub phase: ArenaPhase,
    pub name: String,
    pub sub_level: u32,
    pub iteration: u32,
    pub kills: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub slot: u8,
    pub position: Vec2,
    pub level: u32,
    pub has_shield: bool,
    pub invulnerable_for: f32,
    pub move_speed: f32,
    pub orbit: OrbitStats,
    /// Level-up pulse is showing.
    pub pulse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub variant: EnemyVariant,
    pub tier: u32,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Orbit weapon position. Rotation follows from the owner's position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub owner: Faction,
    pub position: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec2,
    pub direction: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub position: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub kind: ItemKind,
    pub position: Vec2,
}

/// Scorch mark left by an explosion; fades out on a timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecalView {
    pub id: u32,
    pub position: Vec2,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    /// Single-player kill score.
    pub score: u32,
    pub enemies_alive: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PvpView {
    pub state: PvpState,
    pub round: u32,
    pub max_rounds: u32,
    /// Score per slot, index 0 = slot 1.
    pub scores: Vec<u32>,
}
