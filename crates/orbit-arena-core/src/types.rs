//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

/// Opaque handle to a body owned by the physics collaborator.
///
/// The physics side only ever sees this integer; the entity registry maps it
/// back to the entity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}

/// Orbit ring parameters: how many weapons, how far out, how fast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitStats {
    pub count: u32,
    pub radius: f32,
    /// Angular speed in radians per second.
    pub speed: f32,
}

impl OrbitStats {
    pub fn new(count: u32, radius: f32, speed: f32) -> Self {
        Self {
            count,
            radius,
            speed,
        }
    }
}
