//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in the simulation crate, not here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::BodyHandle;

/// Identity and lifecycle record carried by every registered entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EntityMeta {
    pub kind: EntityKind,
    pub faction: Faction,
    /// Collision category bit of the entity's body.
    pub category: u32,
    /// Back-reference to the physics body (a lookup key, not ownership).
    pub body: BodyHandle,
    /// Flips to true exactly once.
    pub is_dead: bool,
}

/// Shared state of every character (player or enemy).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Level for players, tier for enemies. Always >= 1.
    pub level: u32,
    /// Current move speed (units per second).
    pub move_speed: f32,
    /// Desired movement direction for this tick (unit length or zero).
    pub intent: Vec2,
}

/// Player-only progression and damage state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Session slot, 1-based.
    pub slot: u8,
    pub has_shield: bool,
    /// Remaining invulnerability (seconds). Hits are absorbed while > 0.
    pub invulnerable_for: f32,
    /// Move speed without temporary boosts.
    pub base_move_speed: f32,
    pub speed_boosted: bool,
    /// Kills since the last automatic level-up.
    pub kills_toward_level: u32,
    /// True while the level-up pulse is showing.
    pub pulse: bool,
}

/// Enemy-only behaviour state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyState {
    pub variant: EnemyVariant,
    /// Seconds until the next ranged attack is allowed.
    pub fire_cooldown: f32,
}

/// A body that damages on contact: orbit weapon or projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub owner: Faction,
    /// Player slot of the owner, if a player owns it.
    pub owner_slot: Option<u8>,
    pub is_projectile: bool,
}

/// Free-flying shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub direction: Vec2,
    pub speed: f32,
    pub ttl_secs: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub ttl_secs: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub ttl_secs: f32,
}

/// Marks an entity as the player-controlled character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks an entity as an enemy character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;
