//! Events emitted by the simulation for audio and UI feedback.
//!
//! Both streams are fire-and-forget: the simulation never waits on a consumer.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Audio events for the host sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// An enemy was destroyed.
    Kill { x: f32, y: f32 },
    /// A player took a lethal hit.
    Damage { slot: u8 },
    /// A shield absorbed a hit.
    ShieldBreak { slot: u8 },
    /// An item was collected.
    Pickup { slot: u8, item: ItemKind },
    /// A player gained a level.
    LevelUp { slot: u8, level: u32 },
    /// The phase director moved to a new sub-level or phase.
    PhaseAdvance { phase: ArenaPhase, sub_level: u32 },
    /// A projectile or bomb blew up.
    Explosion { x: f32, y: f32 },
    /// An enemy fired a projectile.
    Launch { x: f32, y: f32 },
}

/// Observational notifications for the score/UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiEvent {
    /// Score changed; `slot` is the player whose weapon made the kill.
    ScoreDelta { slot: u8, delta: u32 },
    /// New phase display name.
    PhaseName { name: String },
    /// Single-player run ended.
    GameOver { score: u32 },
    /// PVP round ended; `winner` is None on a draw.
    RoundOver { round: u32, winner: Option<u8> },
    /// PVP match ended.
    MatchOver { winner: u8, scores: Vec<u32> },
}
