//! Spawn arbitration: probabilistic enemy, obstacle and item spawns gated by
//! the phase director's quotas and caps.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use orbit_arena_core::components::{EnemyState, EntityMeta};
use orbit_arena_core::constants::*;
use orbit_arena_core::enums::*;

use crate::config::SimConfig;
use crate::phase::PhaseDirector;
use crate::physics::PhysicsBackend;
use crate::registry::Registry;
use crate::world_setup;

pub struct SpawnContext<'a> {
    pub registry: &'a mut Registry,
    pub physics: &'a mut dyn PhysicsBackend,
    pub rng: &'a mut ChaCha8Rng,
    pub director: &'a mut PhaseDirector,
    pub config: &'a SimConfig,
    pub mode: SessionMode,
}

/// Roll every spawn once. Rolls happen in a fixed order each tick so a seed
/// always replays the same way.
pub fn run(ctx: &mut SpawnContext) {
    let enemy_roll = roll(ctx.rng, ctx.config.enemy_spawn_chance);
    let obstacle_roll = roll(ctx.rng, ctx.config.obstacle_spawn_chance);
    let item_roll = roll(ctx.rng, ctx.config.item_spawn_chance);

    if enemy_roll && ctx.mode == SessionMode::SinglePlayer {
        try_spawn_enemy(ctx);
    }
    if obstacle_roll && (ctx.mode == SessionMode::Pvp || ctx.director.obstacles_enabled()) {
        try_spawn_obstacle(ctx);
    }
    if item_roll {
        try_spawn_item(ctx);
    }
}

fn roll(rng: &mut ChaCha8Rng, chance: f64) -> bool {
    rng.gen_bool(chance.clamp(0.0, 1.0))
}

fn alive_specials(registry: &Registry) -> usize {
    registry
        .world()
        .query::<(&EntityMeta, &EnemyState)>()
        .iter()
        .filter(|(_, (meta, enemy))| !meta.is_dead && enemy.variant.is_special())
        .count()
}

fn try_spawn_enemy(ctx: &mut SpawnContext) {
    let alive = ctx.registry.count(EntityKind::Enemy);
    if alive >= ctx.director.max_simultaneous_enemies() || !ctx.director.take_spawn() {
        return;
    }
    let variant = match ctx.director.special_variant() {
        Some(special) if alive_specials(ctx.registry) < ctx.director.special_cap() => special,
        _ => EnemyVariant::Raso,
    };
    let tier = ctx.director.spawn_tier();
    let position =
        world_setup::random_point_on_circle(ctx.rng, ctx.config.arena_radius + ENEMY_SPAWN_MARGIN);
    world_setup::spawn_enemy(ctx.registry, ctx.physics, variant, tier, position);
    log::trace!("spawned {variant:?} tier {tier}");
}

fn try_spawn_obstacle(ctx: &mut SpawnContext) {
    if ctx.registry.count(EntityKind::Obstacle) >= ctx.config.max_obstacles {
        return;
    }
    let kind = pick_obstacle_kind(ctx.rng);
    let position =
        world_setup::random_point_in_disc(ctx.rng, ctx.config.arena_radius * INNER_SPAWN_FRACTION);
    world_setup::spawn_obstacle(ctx.registry, ctx.physics, kind, position);
}

/// Bombs with probability `BOMB_SHARE`, walls otherwise.
fn pick_obstacle_kind(rng: &mut ChaCha8Rng) -> ObstacleKind {
    if rng.gen_bool(BOMB_SHARE) {
        ObstacleKind::Bomb
    } else {
        ObstacleKind::Wall
    }
}

fn try_spawn_item(ctx: &mut SpawnContext) {
    let cap = match ctx.mode {
        SessionMode::SinglePlayer => ctx.director.item_cap(),
        SessionMode::Pvp => PVP_ITEM_CAP,
    };
    if ctx.registry.count(EntityKind::Item) >= cap {
        return;
    }
    let kind = ItemKind::ALL[ctx.rng.gen_range(0..ItemKind::ALL.len())];
    let position =
        world_setup::random_point_in_disc(ctx.rng, ctx.config.arena_radius * INNER_SPAWN_FRACTION);
    world_setup::spawn_item(ctx.registry, ctx.physics, kind, position);
}
