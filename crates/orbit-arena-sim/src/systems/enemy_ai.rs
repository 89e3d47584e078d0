//! Enemy AI system: target selection, movement and ranged fire.

use glam::Vec2;
use hecs::World;

use orbit_arena_core::components::{Character, EnemyState, EntityMeta, PlayerState};
use orbit_arena_core::events::AudioEvent;
use orbit_arena_enemy_ai::fsm::{evaluate, select_target, EnemyContext};
use orbit_arena_enemy_ai::profiles::get_profile;

use crate::physics::PhysicsBackend;
use crate::registry::Registry;
use crate::world_setup;

/// Positions of every live player.
fn player_positions(world: &World, physics: &dyn PhysicsBackend) -> Vec<Vec2> {
    world
        .query::<(&EntityMeta, &PlayerState)>()
        .iter()
        .filter(|(_, (meta, _))| !meta.is_dead)
        .filter_map(|(_, (meta, _))| physics.position(meta.body))
        .collect()
}

pub fn run(
    registry: &mut Registry,
    physics: &mut dyn PhysicsBackend,
    dt: f32,
    audio_events: &mut Vec<AudioEvent>,
) {
    let targets = player_positions(registry.world(), &*physics);

    let mut shots: Vec<(Vec2, Vec2, f32)> = Vec::new();
    for (_entity, (meta, character, enemy)) in registry
        .world_mut()
        .query_mut::<(&EntityMeta, &Character, &mut EnemyState)>()
    {
        if meta.is_dead {
            continue;
        }
        let Some(position) = physics.position(meta.body) else {
            continue;
        };
        let profile = get_profile(enemy.variant, character.level);
        let ctx = EnemyContext {
            variant: enemy.variant,
            position,
            target: select_target(position, targets.iter().copied()),
            move_speed: character.move_speed,
            fire_cooldown: enemy.fire_cooldown,
            dt,
        };
        let decision = evaluate(&ctx, &profile);
        physics.set_velocity(meta.body, decision.velocity);
        enemy.fire_cooldown = decision.fire_cooldown;
        if let Some(direction) = decision.fire {
            shots.push((position, direction, profile.projectile_speed));
        }
    }

    for (origin, direction, speed) in shots {
        world_setup::spawn_projectile(registry, physics, origin, direction, speed);
        audio_events.push(AudioEvent::Launch {
            x: origin.x,
            y: origin.y,
        });
    }
}
