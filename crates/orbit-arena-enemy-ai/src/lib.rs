//! Enemy AI for the orbit arena.
//!
//! Implements per-variant movement and ranged-attack policies and the
//! tier-driven stat tables. Pure functions over plain data; no ECS.

pub mod fsm;
pub mod profiles;

pub use orbit_arena_core as core;

#[cfg(test)]
mod tests;
