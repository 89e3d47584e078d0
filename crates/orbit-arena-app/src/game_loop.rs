//! Game loop thread: runs the simulation at a fixed target rate and publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread boundary.
//! Commands arrive via `mpsc` channel. Each frame measures real elapsed time and hands
//! it to the engine, which clamps it before stepping.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use orbit_arena_core::error::ArenaError;
use orbit_arena_core::state::GameStateSnapshot;
use orbit_arena_sim::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, GameLoopHandle};

/// Target frames per second for the loop.
pub const TARGET_FPS: u32 = 60;

/// Nominal duration of one frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TARGET_FPS as u64);

/// Spawns the game loop in a named thread.
pub fn spawn_game_loop(config: SimConfig) -> Result<GameLoopHandle, ArenaError> {
    config.validate()?;

    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>> = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("orbit-arena-game-loop".into())
        .spawn(move || run_game_loop(config, command_rx, &shared))?;

    Ok(GameLoopHandle {
        command_tx,
        latest_snapshot,
        thread,
    })
}

/// Forward every pending command to the engine.
///
/// Returns false when the loop should stop (shutdown or disconnected sender).
fn drain_commands(
    command_rx: &mpsc::Receiver<GameLoopCommand>,
    engine: &mut SimulationEngine,
) -> bool {
    loop {
        match command_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut last_frame = Instant::now();
    let mut next_frame = last_frame;
    log::debug!("game loop started at {TARGET_FPS} fps");

    loop {
        if !drain_commands(&command_rx, &mut engine) {
            log::debug!("game loop stopping after {} ticks", engine.time().tick);
            return;
        }

        let now = Instant::now();
        let frame_dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        let snapshot = engine.tick(frame_dt);
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        next_frame += FRAME_DURATION;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else if now - next_frame > FRAME_DURATION * 2 {
            // Too far behind, skip ahead instead of bursting frames
            next_frame = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_arena_core::commands::PlayerCommand;
    use orbit_arena_core::enums::GamePhase;

    #[test]
    fn test_drain_commands_stops_on_shutdown() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        let mut engine = SimulationEngine::new(SimConfig::default());

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSinglePlayer))
            .unwrap();
        assert!(drain_commands(&rx, &mut engine));

        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&rx, &mut engine));

        let snap = engine.tick(0.016);
        assert_eq!(snap.phase, GamePhase::Active);
    }

    #[test]
    fn test_drain_commands_stops_on_disconnect() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        let mut engine = SimulationEngine::new(SimConfig::default());
        drop(tx);
        assert!(!drain_commands(&rx, &mut engine));
    }

    #[test]
    fn test_spawned_loop_publishes_snapshots() {
        let handle = spawn_game_loop(SimConfig::default()).unwrap();
        assert!(handle.send(PlayerCommand::StartSinglePlayer));

        let deadline = Instant::now() + Duration::from_secs(2);
        let mut active = false;
        while Instant::now() < deadline {
            if let Some(snap) = handle.snapshot() {
                if snap.phase == GamePhase::Active && snap.time.tick > 0 {
                    active = true;
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        handle.shutdown();
        assert!(active, "loop never published an active snapshot");
    }

    #[test]
    fn test_invalid_config_is_rejected_before_spawning() {
        let config = SimConfig {
            arena_radius: -1.0,
            ..SimConfig::default()
        };
        assert!(spawn_game_loop(config).is_err());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartSinglePlayer);
        for _ in 0..120 {
            engine.tick(1.0 / 60.0);
        }
        let json = serde_json::to_string(&engine.tick(1.0 / 60.0)).unwrap();
        assert!(json.contains("\"players\""));
        assert!(json.contains("\"director\""));
    }

    #[test]
    fn test_frame_duration_constant() {
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
    }
}
