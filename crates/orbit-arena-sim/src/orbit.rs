//! Orbit weapon ring carried by every character.
//!
//! Pure bookkeeping: the ring decides where its weapons go and which weapon
//! entities must be retired. Spawning and killing the weapon bodies is done by
//! the caller through the entity registry.

use std::f32::consts::TAU;

use glam::Vec2;
use hecs::Entity;

use orbit_arena_core::constants::ORBIT_REBUILD_EPSILON;
use orbit_arena_core::types::OrbitStats;

/// Result of a stat change that needs a fresh set of weapons.
#[derive(Debug, Clone, PartialEq)]
pub struct Rebuild {
    /// Weapons to kill.
    pub retired: Vec<Entity>,
    /// Where the replacement weapons go, in ring order.
    pub positions: Vec<Vec2>,
}

#[derive(Debug, Clone)]
pub struct OrbitWeaponSystem {
    stats: OrbitStats,
    /// Monotonic accumulator, never reset.
    angle: f32,
    weapons: Vec<Entity>,
}

impl OrbitWeaponSystem {
    /// A ring with no weapons yet; call `set_stats` to populate it.
    pub fn new() -> Self {
        Self {
            stats: OrbitStats::new(0, 0.0, 0.0),
            angle: 0.0,
            weapons: Vec::new(),
        }
    }

    pub fn stats(&self) -> OrbitStats {
        self.stats
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn weapons(&self) -> &[Entity] {
        &self.weapons
    }

    fn step(&self) -> f32 {
        TAU / self.stats.count.max(1) as f32
    }

    /// Update stats. Returns a rebuild when count or radius moved by more
    /// than the epsilon; a speed-only change is applied in place.
    pub fn set_stats(&mut self, stats: OrbitStats, center: Vec2) -> Option<Rebuild> {
        let count_changed = stats.count != self.stats.count;
        let radius_changed = (stats.radius - self.stats.radius).abs() > ORBIT_REBUILD_EPSILON;
        self.stats.speed = stats.speed;
        if !count_changed && !radius_changed {
            return None;
        }
        self.stats = stats;
        Some(Rebuild {
            retired: std::mem::take(&mut self.weapons),
            positions: self.positions(center),
        })
    }

    /// Install the weapons spawned for the last rebuild.
    pub fn attach(&mut self, weapons: Vec<Entity>) {
        self.weapons = weapons;
    }

    /// Advance the angle and return the new position of every weapon.
    pub fn update(&mut self, dt: f32, center: Vec2) -> Vec<(Entity, Vec2)> {
        self.angle += self.stats.speed * dt;
        let positions = self.positions(center);
        self.weapons.iter().copied().zip(positions).collect()
    }

    /// Ring positions around `center` at the current angle.
    pub fn positions(&self, center: Vec2) -> Vec<Vec2> {
        let step = self.step();
        (0..self.stats.count)
            .map(|i| {
                let a = self.angle + i as f32 * step;
                center + self.stats.radius * Vec2::new(a.cos(), a.sin())
            })
            .collect()
    }

    /// Hand back every weapon for removal; the ring is empty afterwards.
    pub fn destroy(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.weapons)
    }
}

impl Default for OrbitWeaponSystem {
    fn default() -> Self {
        Self::new()
    }
}
