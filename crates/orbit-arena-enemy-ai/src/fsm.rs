//! Enemy decision function.
//!
//! Given an enemy's situation, compute this tick's velocity and whether it
//! fires. The simulation applies the result; nothing here touches the world.

use glam::Vec2;
use orbit_arena_core::constants::*;
use orbit_arena_core::enums::EnemyVariant;

use crate::profiles::EnemyProfile;

/// Input to the decision function for a single enemy.
pub struct EnemyContext {
    pub variant: EnemyVariant,
    pub position: Vec2,
    /// Position of the chosen target, None when no player is alive.
    pub target: Option<Vec2>,
    /// Current move speed (may differ from the profile after spawn tweaks).
    pub move_speed: f32,
    /// Seconds left before the enemy may fire again.
    pub fire_cooldown: f32,
    pub dt: f32,
}

/// Output of the decision function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyDecision {
    pub velocity: Vec2,
    /// Unit direction of a projectile to fire this tick.
    pub fire: Option<Vec2>,
    pub fire_cooldown: f32,
}

/// Pick the nearest candidate to `from`. Ties go to the first candidate.
pub fn select_target<I>(from: Vec2, candidates: I) -> Option<Vec2>
where
    I: IntoIterator<Item = Vec2>,
{
    candidates.into_iter().fold(None, |best: Option<Vec2>, c| match best {
        Some(b) if b.distance_squared(from) <= c.distance_squared(from) => Some(b),
        _ => Some(c),
    })
}

/// Evaluate one enemy for one tick.
pub fn evaluate(ctx: &EnemyContext, profile: &EnemyProfile) -> EnemyDecision {
    let Some(target) = ctx.target else {
        return EnemyDecision {
            velocity: Vec2::ZERO,
            fire: None,
            fire_cooldown: (ctx.fire_cooldown - ctx.dt).max(0.0),
        };
    };

    let to_target = target - ctx.position;
    let distance = to_target.length();
    let heading = to_target.normalize_or_zero();

    let velocity = match ctx.variant {
        EnemyVariant::Raso | EnemyVariant::Tank => chase(heading, distance, ctx.move_speed),
        EnemyVariant::Launcher => {
            let range = profile.preferred_range.unwrap_or(LAUNCHER_PREFERRED_RANGE);
            keep_distance(heading, distance, range, ctx.move_speed)
        }
    };

    let (fire, fire_cooldown) = match profile.fire_interval {
        Some(interval) => {
            let remaining = ctx.fire_cooldown - ctx.dt;
            if remaining <= 0.0 && heading != Vec2::ZERO {
                (Some(heading), interval)
            } else {
                (None, remaining.max(0.0))
            }
        }
        None => (None, 0.0),
    };

    EnemyDecision {
        velocity,
        fire,
        fire_cooldown,
    }
}

fn chase(heading: Vec2, distance: f32, speed: f32) -> Vec2 {
    if distance <= ENEMY_ARRIVE_DISTANCE {
        Vec2::ZERO
    } else {
        heading * speed
    }
}

fn keep_distance(heading: Vec2, distance: f32, range: f32, speed: f32) -> Vec2 {
    if distance > range + LAUNCHER_RANGE_TOLERANCE {
        heading * speed
    } else if distance < range - LAUNCHER_RANGE_TOLERANCE {
        -heading * speed
    } else {
        Vec2::ZERO
    }
}
