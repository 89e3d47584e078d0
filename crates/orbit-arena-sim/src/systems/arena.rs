//! Arena boundary: characters outside the radius are projected back onto it.

use orbit_arena_core::components::{Character, EntityMeta};

use crate::physics::PhysicsBackend;
use crate::registry::Registry;

pub fn run(registry: &mut Registry, physics: &mut dyn PhysicsBackend, radius: f32) {
    for (_entity, (meta, _character)) in registry
        .world_mut()
        .query_mut::<(&EntityMeta, &Character)>()
    {
        if meta.is_dead {
            continue;
        }
        let Some(position) = physics.position(meta.body) else {
            continue;
        };
        let distance = position.length();
        if distance > radius {
            physics.set_position(meta.body, position * (radius / distance));
        }
    }
}
