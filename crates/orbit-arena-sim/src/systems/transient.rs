//! Transient entities: projectile, obstacle and item lifetimes.
//!
//! Expired entities go through the normal death path, then every entity
//! marked dead this tick is dropped from the registry.

use hecs::Entity;

use orbit_arena_core::components::{EntityMeta, Item, Obstacle, Projectile};

use crate::registry::Registry;

pub fn run(registry: &mut Registry, dt: f32) {
    let mut expired: Vec<Entity> = Vec::new();
    let world = registry.world_mut();

    for (entity, (meta, projectile)) in world.query_mut::<(&EntityMeta, &mut Projectile)>() {
        projectile.ttl_secs -= dt;
        if !meta.is_dead && projectile.ttl_secs <= 0.0 {
            expired.push(entity);
        }
    }
    for (entity, (meta, obstacle)) in world.query_mut::<(&EntityMeta, &mut Obstacle)>() {
        obstacle.ttl_secs -= dt;
        if !meta.is_dead && obstacle.ttl_secs <= 0.0 {
            expired.push(entity);
        }
    }
    for (entity, (meta, item)) in world.query_mut::<(&EntityMeta, &mut Item)>() {
        item.ttl_secs -= dt;
        if !meta.is_dead && item.ttl_secs <= 0.0 {
            expired.push(entity);
        }
    }

    for entity in expired {
        registry.mark_dead(entity);
    }
    registry.sweep_dead();
}
