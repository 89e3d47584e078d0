//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Ownership tag controlling which collision rules apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
    #[default]
    Neutral,
}

/// Top-level entity variant held by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Weapon,
    Projectile,
    Obstacle,
    Item,
}

/// Enemy variant: decides movement and ranged-attack policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    /// Plain chaser.
    #[default]
    Raso,
    /// Keeps its distance and fires projectiles.
    Launcher,
    /// Slow, heavily armed chaser.
    Tank,
}

impl EnemyVariant {
    /// Specials are the variants only unlocked in the free phase.
    pub fn is_special(&self) -> bool {
        !matches!(self, EnemyVariant::Raso)
    }
}

/// Obstacle variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Dynamic and destructible; explodes on a player.
    Bomb,
    /// Static collider with no rule of its own.
    Wall,
}

/// Pickable item variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Shield,
    Speed,
    ExtraOrbit,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Shield, ItemKind::Speed, ItemKind::ExtraOrbit];
}

/// Difficulty phase of the phase director. Ordered; never goes backwards.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ArenaPhase {
    #[default]
    Tutorial,
    Escalation,
    Obstacles,
    Free,
}

/// Session mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    #[default]
    SinglePlayer,
    Pvp,
}

/// Game phase (top-level session state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// PVP round finished, waiting for `NextRound`.
    RoundOver,
    GameOver,
}

/// PVP match bookkeeping state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PvpState {
    #[default]
    Inactive,
    RoundStart,
    Battle,
    RoundEnd,
    MatchOver,
}

/// How a physics body is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Integrated from velocity by the physics engine.
    Dynamic,
    /// Positioned directly by simulation logic.
    Kinematic,
    /// Never moves.
    Static,
}
