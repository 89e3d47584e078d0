//! Variant- and tier-specific enemy profiles.
//!
//! Consolidates the stat table the spawner and the decision function read.

use orbit_arena_core::constants::*;
use orbit_arena_core::enums::EnemyVariant;
use orbit_arena_core::types::OrbitStats;

/// Behavioral profile for one enemy variant at one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    /// Orbit ring carried by the enemy.
    pub orbit: OrbitStats,
    /// Base move speed (units per second).
    pub move_speed: f32,
    /// Distance the enemy tries to keep from its target, None for chasers.
    pub preferred_range: Option<f32>,
    /// Seconds between ranged attacks, None for melee-only variants.
    pub fire_interval: Option<f32>,
    /// Speed of fired projectiles.
    pub projectile_speed: f32,
}

/// Orbit stats of a plain tier-`tier` enemy.
pub fn tier_orbit(tier: u32) -> OrbitStats {
    let tier = tier.max(1);
    let step = (tier - 1) as f32;
    OrbitStats::new(tier, 0.8 + step * 0.4, 1.5 + step * 0.4)
}

/// Base move speed of a tier-`tier` enemy.
pub fn tier_move_speed(tier: u32) -> f32 {
    0.8 + tier.max(1) as f32 * 0.7
}

/// Get the profile for a variant at the given tier (clamped to >= 1).
pub fn get_profile(variant: EnemyVariant, tier: u32) -> EnemyProfile {
    let base = tier_orbit(tier);
    let speed = tier_move_speed(tier);

    match variant {
        EnemyVariant::Raso => EnemyProfile {
            orbit: base,
            move_speed: speed,
            preferred_range: None,
            fire_interval: None,
            projectile_speed: 0.0,
        },
        EnemyVariant::Launcher => EnemyProfile {
            orbit: OrbitStats {
                count: base.count.saturating_sub(1).max(1),
                ..base
            },
            move_speed: speed,
            preferred_range: Some(LAUNCHER_PREFERRED_RANGE),
            fire_interval: Some(LAUNCHER_FIRE_INTERVAL_SECS),
            projectile_speed: PROJECTILE_SPEED,
        },
        EnemyVariant::Tank => EnemyProfile {
            orbit: OrbitStats {
                count: base.count + TANK_EXTRA_WEAPONS,
                radius: base.radius + TANK_EXTRA_RADIUS,
                speed: base.speed,
            },
            move_speed: speed * TANK_SPEED_FACTOR,
            preferred_range: None,
            fire_interval: None,
            projectile_speed: 0.0,
        },
    }
}
