use std::time::{Duration, Instant};

use orbit_arena_app::game_loop::spawn_game_loop;
use orbit_arena_app::script::CircleStrafe;
use orbit_arena_core::commands::PlayerCommand;
use orbit_arena_core::ArenaError;
use orbit_arena_sim::SimConfig;

/// Wall-clock length of the scripted demo.
const DEMO_DURATION: Duration = Duration::from_secs(20);

/// How often the script re-sends the movement intent.
const INPUT_INTERVAL: Duration = Duration::from_millis(50);

const SEED_ENV: &str = "ORBIT_ARENA_SEED";

fn load_config() -> Result<SimConfig, ArenaError> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {path}");
            SimConfig::load(&path)?
        }
        None => SimConfig::default(),
    };

    if let Ok(raw) = std::env::var(SEED_ENV) {
        match raw.parse::<u64>() {
            Ok(seed) => config.seed = seed,
            Err(_) => log::warn!("Ignoring {SEED_ENV}={raw:?}: not a u64"),
        }
    }
    Ok(config)
}

fn main() -> Result<(), ArenaError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!("Orbit arena starting (seed {})", config.seed);

    let handle = spawn_game_loop(config)?;
    handle.send(PlayerCommand::StartSinglePlayer);

    let script = CircleStrafe::default();
    let started = Instant::now();
    while started.elapsed() < DEMO_DURATION {
        if !handle.send(script.command_at(started.elapsed().as_secs_f32())) {
            log::warn!("Game loop exited early");
            break;
        }
        std::thread::sleep(INPUT_INTERVAL);
    }

    match handle.snapshot() {
        Some(snap) => log::info!(
            "Demo finished: {:?}, score {}, {} ({} ticks)",
            snap.phase,
            snap.score.score,
            snap.director.name,
            snap.time.tick
        ),
        None => log::warn!("Demo finished without a snapshot"),
    }

    handle.shutdown();
    Ok(())
}
