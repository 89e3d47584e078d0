//! Player commands sent from the host to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// Smallest and largest PVP session sizes.
pub const MIN_PVP_PLAYERS: u8 = 2;
pub const MAX_PVP_PLAYERS: u8 = 4;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session control ---
    /// Start a single-player run from the main menu (or over any session).
    StartSinglePlayer,
    /// Start a local PVP match.
    StartPvp { player_count: u8 },
    /// Restart the current mode from scratch.
    Restart,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Begin the next PVP round after a round ended.
    NextRound,

    // --- Input ---
    /// Movement intent for one local player, already deadzone-filtered.
    SetIntent { slot: u8, x: f32, y: f32 },
}

impl PlayerCommand {
    /// Reject commands whose payload can never be valid.
    pub fn validate(&self) -> Result<(), ArenaError> {
        match self {
            PlayerCommand::StartPvp { player_count }
                if !(MIN_PVP_PLAYERS..=MAX_PVP_PLAYERS).contains(player_count) =>
            {
                Err(ArenaError::InvalidCommand(format!(
                    "pvp needs {MIN_PVP_PLAYERS}..={MAX_PVP_PLAYERS} players, got {player_count}"
                )))
            }
            PlayerCommand::SetIntent { slot, x, y } => {
                if *slot == 0 {
                    return Err(ArenaError::InvalidCommand(
                        "player slots start at 1".to_string(),
                    ));
                }
                if !x.is_finite() || !y.is_finite() {
                    return Err(ArenaError::InvalidCommand(format!(
                        "non-finite intent ({x}, {y}) for slot {slot}"
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
