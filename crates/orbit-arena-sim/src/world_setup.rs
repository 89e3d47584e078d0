//! Entity spawn factories.
//!
//! Creates players, enemies, weapons, projectiles, obstacles and items with
//! their component bundles and physics bodies.

use std::f32::consts::TAU;

use glam::Vec2;
use hecs::Entity;

use orbit_arena_core::components::*;
use orbit_arena_core::constants::*;
use orbit_arena_core::enums::*;
use orbit_arena_core::types::OrbitStats;
use orbit_arena_enemy_ai::profiles::get_profile;

use crate::orbit::OrbitWeaponSystem;
use crate::physics::{BodyDesc, PhysicsBackend};
use crate::progression::player_orbit_stats;
use crate::registry::Registry;

fn body(kind: BodyKind, radius: f32, position: Vec2, group: u32, mask: u32) -> BodyDesc {
    BodyDesc {
        kind,
        radius,
        position,
        velocity: Vec2::ZERO,
        group,
        mask,
    }
}

/// Spawn a player at level 1 with a fresh orbit ring.
pub fn spawn_player(
    registry: &mut Registry,
    physics: &mut dyn PhysicsBackend,
    slot: u8,
    position: Vec2,
    move_speed: f32,
    mode: SessionMode,
) -> Entity {
    let mask = match mode {
        SessionMode::SinglePlayer => MASK_PLAYER,
        SessionMode::Pvp => MASK_PLAYER_PVP,
    };
    let player = registry.spawn(
        physics,
        EntityKind::Player,
        Faction::Player,
        body(BodyKind::Dynamic, CHARACTER_RADIUS, position, CATEGORY_PLAYER, mask),
        (
            Player,
            Character {
                level: 1,
                move_speed,
                intent: Vec2::ZERO,
            },
            PlayerState {
                slot,
                has_shield: false,
                invulnerable_for: 0.0,
                base_move_speed: move_speed,
                speed_boosted: false,
                kills_toward_level: 0,
                pulse: false,
            },
            OrbitWeaponSystem::new(),
        ),
    );
    apply_orbit_stats(registry, physics, player, player_orbit_stats(1), mode);
    player
}

/// Spawn an enemy of the given variant and tier.
pub fn spawn_enemy(
    registry: &mut Registry,
    physics: &mut dyn PhysicsBackend,
    variant: EnemyVariant,
    tier: u32,
    position: Vec2,
) -> Entity {
    let profile = get_profile(variant, tier);
    let enemy = registry.spawn(
        physics,
        EntityKind::Enemy,
        Faction::Enemy,
        body(BodyKind::Dynamic, CHARACTER_RADIUS, position, CATEGORY_ENEMY, MASK_ENEMY),
        (
            Enemy,
            Character {
                level: tier.max(1),
                move_speed: profile.move_speed,
                intent: Vec2::ZERO,
            },
            EnemyState {
                variant,
                fire_cooldown: profile.fire_interval.unwrap_or(0.0),
            },
            OrbitWeaponSystem::new(),
        ),
    );
    apply_orbit_stats(registry, physics, enemy, profile.orbit, SessionMode::SinglePlayer);
    enemy
}

/// Enemy projectile flying along `direction` (unit length).
pub fn spawn_projectile(
    registry: &mut Registry,
    physics: &mut dyn PhysicsBackend,
    origin: Vec2,
    direction: Vec2,
    speed: f32,
) -> Entity {
    let mut desc = body(
        BodyKind::Dynamic,
        PROJECTILE_RADIUS,
        origin,
        CATEGORY_ENEMY_WEAPON,
        MASK_ENEMY_WEAPON,
    );
    desc.velocity = direction * speed;
    registry.spawn(
        physics,
        EntityKind::Projectile,
        Faction::Enemy,
        desc,
        (
            Weapon {
                owner: Faction::Enemy,
                owner_slot: None,
                is_projectile: true,
            },
            Projectile {
                direction,
                speed,
                ttl_secs: PROJECTILE_TTL_SECS,
            },
        ),
    )
}

/// Bombs are dynamic and destructible; walls are static colliders.
pub fn spawn_obstacle(
    registry: &mut Registry,
    physics: &mut dyn PhysicsBackend,
    kind: ObstacleKind,
    position: Vec2,
) -> Entity {
    let body_kind = match kind {
        ObstacleKind::Bomb => BodyKind::Dynamic,
        ObstacleKind::Wall => BodyKind::Static,
    };
    registry.spawn(
        physics,
        EntityKind::Obstacle,
        Faction::Neutral,
        body(body_kind, OBSTACLE_RADIUS, position, CATEGORY_OBSTACLE, MASK_OBSTACLE),
        (Obstacle {
            kind,
            ttl_secs: OBSTACLE_TTL_SECS,
        },),
    )
}

pub fn spawn_item(
    registry: &mut Registry,
    physics: &mut dyn PhysicsBackend,
    kind: ItemKind,
    position: Vec2,
) -> Entity {
    registry.spawn(
        physics,
        EntityKind::Item,
        Faction::Neutral,
        body(BodyKind::Kinematic, ITEM_RADIUS, position, CATEGORY_ITEM, MASK_ITEM),
        (Item {
            kind,
            ttl_secs: ITEM_TTL_SECS,
        },),
    )
}

fn spawn_orbit_weapon(
    registry: &mut Registry,
    physics: &mut dyn PhysicsBackend,
    owner: Faction,
    owner_slot: Option<u8>,
    position: Vec2,
    mode: SessionMode,
) -> Entity {
    let (group, mask) = match (owner, mode) {
        (Faction::Enemy, _) => (CATEGORY_ENEMY_WEAPON, MASK_ENEMY_WEAPON),
        (_, SessionMode::Pvp) => (CATEGORY_PLAYER_WEAPON, MASK_PLAYER_WEAPON_PVP),
        _ => (CATEGORY_PLAYER_WEAPON, MASK_PLAYER_WEAPON),
    };
    registry.spawn(
        physics,
        EntityKind::Weapon,
        owner,
        body(BodyKind::Kinematic, WEAPON_RADIUS, position, group, mask),
        (Weapon {
            owner,
            owner_slot,
            is_projectile: false,
        },),
    )
}

/// Push new stats into a character's ring, rebuilding weapons if needed.
pub fn apply_orbit_stats(
    registry: &mut Registry,
    physics: &mut dyn PhysicsBackend,
    owner: Entity,
    stats: OrbitStats,
    mode: SessionMode,
) {
    let Some(meta) = registry.meta(owner) else {
        return;
    };
    let Some(center) = physics.position(meta.body) else {
        return;
    };
    let slot = registry
        .world()
        .get::<&PlayerState>(owner)
        .ok()
        .map(|p| p.slot);

    let rebuild = match registry.world().get::<&mut OrbitWeaponSystem>(owner) {
        Ok(mut orbit) => orbit.set_stats(stats, center),
        Err(_) => return,
    };
    let Some(rebuild) = rebuild else {
        return;
    };

    for weapon in rebuild.retired {
        registry.mark_dead(weapon);
    }
    let weapons: Vec<Entity> = rebuild
        .positions
        .into_iter()
        .map(|p| spawn_orbit_weapon(registry, physics, meta.faction, slot, p, mode))
        .collect();
    if let Ok(mut orbit) = registry.world().get::<&mut OrbitWeaponSystem>(owner) {
        orbit.attach(weapons);
    }
}

/// Evenly spaced PVP start positions.
pub fn pvp_spawn_points(count: u8) -> Vec<Vec2> {
    let step = TAU / count.max(1) as f32;
    (0..count)
        .map(|i| {
            let a = i as f32 * step;
            PVP_SPAWN_RADIUS * Vec2::new(a.cos(), a.sin())
        })
        .collect()
}

/// Uniformly random point inside a disc of `radius` around the origin.
pub fn random_point_in_disc(rng: &mut impl rand::Rng, radius: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let r = radius * rng.gen::<f32>().sqrt();
    Vec2::new(angle.cos(), angle.sin()) * r
}

/// Random point on a circle of `radius`.
pub fn random_point_on_circle(rng: &mut impl rand::Rng, radius: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    Vec2::new(angle.cos(), angle.sin()) * radius
}
