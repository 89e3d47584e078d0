//! Error type for the fallible edges of the simulation.
//!
//! Gameplay never fails: double kills, unmatched contacts and post-game
//! contacts are no-ops. Only configuration and command input can be wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid command: {0}")]
    InvalidCommand(String),
}
