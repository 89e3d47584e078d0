//! Simulation engine for the orbit arena.
//!
//! Owns the entity registry, the physics seam, and every rules component
//! (orbit rings, collision resolver, phase director, progression), runs the
//! per-tick pipeline, and produces GameStateSnapshots for the host.

pub mod collision;
pub mod config;
pub mod deferred;
pub mod engine;
pub mod orbit;
pub mod phase;
pub mod physics;
pub mod progression;
pub mod registry;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use config::SimConfig;
pub use engine::SimulationEngine;
pub use orbit_arena_core as core;
pub use physics::{CircleWorld, PhysicsBackend};
