//! Headless runner for the arena simulation.
//!
//! Hosts the engine on its own thread and drives it with commands over a channel.

pub mod game_loop;
pub mod script;
pub mod state;

pub use orbit_arena_core as core;
