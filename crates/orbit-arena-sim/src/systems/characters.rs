//! Character update: movement intent, invulnerability timers, orbit rings.

use glam::Vec2;
use hecs::Entity;

use orbit_arena_core::components::{Character, EntityMeta, PlayerState};

use crate::orbit::OrbitWeaponSystem;
use crate::physics::PhysicsBackend;
use crate::progression::tick_invulnerability;
use crate::registry::Registry;

pub fn run(registry: &mut Registry, physics: &mut dyn PhysicsBackend, dt: f32) {
    let world = registry.world_mut();

    for (_entity, (meta, character, state)) in
        world.query_mut::<(&EntityMeta, &Character, &mut PlayerState)>()
    {
        if meta.is_dead {
            continue;
        }
        physics.set_velocity(meta.body, character.intent * character.move_speed);
        tick_invulnerability(state, dt);
    }

    let mut moves: Vec<(Entity, Vec2)> = Vec::new();
    for (_entity, (meta, orbit)) in world.query_mut::<(&EntityMeta, &mut OrbitWeaponSystem)>() {
        if meta.is_dead {
            continue;
        }
        let Some(center) = physics.position(meta.body) else {
            continue;
        };
        moves.extend(orbit.update(dt, center));
    }

    for (weapon, position) in moves {
        if let Some(body) = registry.body(weapon) {
            physics.set_position(body, position);
        }
    }
}
