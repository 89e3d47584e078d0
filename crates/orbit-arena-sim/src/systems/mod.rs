//! Per-tick systems run by the session controller.
//!
//! Systems are free functions over the registry and the physics backend.
//! They do not own state; all state lives in components or the engine.

pub mod arena;
pub mod characters;
pub mod enemy_ai;
pub mod snapshot;
pub mod spawner;
pub mod transient;
