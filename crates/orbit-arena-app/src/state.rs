//! State shared between the runner and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use orbit_arena_core::commands::PlayerCommand;
use orbit_arena_core::state::GameStateSnapshot;

/// Messages sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Stop the game loop thread.
    Shutdown,
}

/// Latest snapshot published by the game loop, `None` until the first tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Handle to a running game loop thread.
pub struct GameLoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub latest_snapshot: SharedSnapshot,
    pub thread: JoinHandle<()>,
}

impl GameLoopHandle {
    /// Forward a player command. Returns false once the loop has exited.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    /// Clone of the most recently published snapshot.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    /// Ask the loop to stop and wait for the thread to finish.
    pub fn shutdown(self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        if self.thread.join().is_err() {
            log::warn!("game loop thread panicked");
        }
    }
}
