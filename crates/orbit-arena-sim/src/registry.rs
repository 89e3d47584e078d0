//! Entity registry: the single owner of entity lifetimes.
//!
//! Wraps the hecs world and the body-handle lookup. Removal is two-phase:
//! `mark_dead` only records the death; bodies are detached by
//! `flush_removals` at the start of the next tick, entities are despawned by
//! `sweep_dead` once the tick's updates are done.

use std::collections::HashMap;

use glam::Vec2;
use hecs::{DynamicBundle, Entity, EntityBuilder, World};

use orbit_arena_core::components::EntityMeta;
use orbit_arena_core::enums::{EntityKind, Faction};
use orbit_arena_core::types::BodyHandle;

use crate::orbit::OrbitWeaponSystem;
use crate::physics::{BodyDesc, PhysicsBackend};

#[derive(Default)]
pub struct Registry {
    world: World,
    bodies: HashMap<BodyHandle, Entity>,
    pending_removals: Vec<BodyHandle>,
    despawn_buffer: Vec<Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Create the body, then the entity with its meta record.
    pub fn spawn(
        &mut self,
        physics: &mut dyn PhysicsBackend,
        kind: EntityKind,
        faction: Faction,
        desc: BodyDesc,
        components: impl DynamicBundle,
    ) -> Entity {
        let body = physics.create_body(desc);
        let mut builder = EntityBuilder::new();
        builder.add_bundle(components).add(EntityMeta {
            kind,
            faction,
            category: desc.group,
            body,
            is_dead: false,
        });
        let entity = self.world.spawn(builder.build());
        self.bodies.insert(body, entity);
        entity
    }

    /// Live entity owning `handle`. None once the entity is marked dead.
    pub fn lookup(&self, handle: BodyHandle) -> Option<Entity> {
        self.bodies.get(&handle).copied()
    }

    pub fn meta(&self, entity: Entity) -> Option<EntityMeta> {
        self.world.get::<&EntityMeta>(entity).ok().map(|m| *m)
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.meta(entity).is_some_and(|m| !m.is_dead)
    }

    pub fn body(&self, entity: Entity) -> Option<BodyHandle> {
        self.meta(entity).map(|m| m.body)
    }

    pub fn position(&self, physics: &dyn PhysicsBackend, entity: Entity) -> Option<Vec2> {
        self.body(entity).and_then(|b| physics.position(b))
    }

    /// The `die()` contract. The first call flags the entity, drops its
    /// lookup, queues its body and despawn, and takes its orbit weapons down
    /// with it. Later calls return false and change nothing.
    pub fn mark_dead(&mut self, entity: Entity) -> bool {
        let body = {
            let Ok(mut meta) = self.world.get::<&mut EntityMeta>(entity) else {
                return false;
            };
            if meta.is_dead {
                return false;
            }
            meta.is_dead = true;
            meta.body
        };
        self.bodies.remove(&body);
        self.pending_removals.push(body);
        self.despawn_buffer.push(entity);

        let weapons = self
            .world
            .get::<&mut OrbitWeaponSystem>(entity)
            .map(|mut orbit| orbit.destroy())
            .unwrap_or_default();
        for weapon in weapons {
            self.mark_dead(weapon);
        }
        true
    }

    /// Detach every queued body. Call outside the physics step.
    pub fn flush_removals(&mut self, physics: &mut dyn PhysicsBackend) {
        for body in std::mem::take(&mut self.pending_removals) {
            physics.remove_body(body);
        }
    }

    /// Despawn entities marked dead since the last sweep.
    pub fn sweep_dead(&mut self) {
        for entity in self.despawn_buffer.drain(..) {
            if self.world.despawn(entity).is_err() {
                log::debug!("sweep skipped {entity:?}: already despawned");
            }
        }
    }

    pub fn pending_removals(&self) -> usize {
        self.pending_removals.len()
    }

    /// Live entities of one kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.world
            .query::<&EntityMeta>()
            .iter()
            .filter(|(_, m)| m.kind == kind && !m.is_dead)
            .count()
    }

    /// Drop every entity and body, including queued removals.
    pub fn clear(&mut self, physics: &mut dyn PhysicsBackend) {
        for (_, meta) in self.world.query::<&EntityMeta>().iter() {
            physics.remove_body(meta.body);
        }
        self.flush_removals(physics);
        self.world.clear();
        self.bodies.clear();
        self.despawn_buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::CircleWorld;
    use orbit_arena_core::enums::BodyKind;
    use orbit_arena_core::types::OrbitStats;

    fn desc() -> BodyDesc {
        BodyDesc {
            kind: BodyKind::Dynamic,
            radius: 0.5,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            group: 1,
            mask: 0,
        }
    }

    #[test]
    fn test_mark_dead_is_idempotent_and_deferred() {
        let mut physics = CircleWorld::new();
        let mut reg = Registry::new();
        let e = reg.spawn(&mut physics, EntityKind::Item, Faction::Neutral, desc(), ());
        let body = reg.body(e).unwrap();
        assert_eq!(reg.lookup(body), Some(e));

        assert!(reg.mark_dead(e));
        assert!(!reg.mark_dead(e));
        // Lookup is gone at once; body and entity stay until flushed.
        assert_eq!(reg.lookup(body), None);
        assert_eq!(physics.body_count(), 1);
        assert_eq!(reg.pending_removals(), 1);
        assert!(reg.world().contains(e));

        reg.flush_removals(&mut physics);
        assert_eq!(physics.body_count(), 0);
        assert_eq!(reg.pending_removals(), 0);

        reg.sweep_dead();
        assert!(!reg.world().contains(e));
        assert!(!reg.mark_dead(e));
    }

    #[test]
    fn test_character_death_kills_orbit_weapons() {
        let mut physics = CircleWorld::new();
        let mut reg = Registry::new();
        let mut orbit = OrbitWeaponSystem::new();
        orbit.set_stats(OrbitStats::new(2, 1.0, 1.0), Vec2::ZERO);
        let owner = reg.spawn(&mut physics, EntityKind::Enemy, Faction::Enemy, desc(), (orbit,));
        let weapons: Vec<Entity> = (0..2)
            .map(|_| reg.spawn(&mut physics, EntityKind::Weapon, Faction::Enemy, desc(), ()))
            .collect();
        reg.world()
            .get::<&mut OrbitWeaponSystem>(owner)
            .unwrap()
            .attach(weapons.clone());

        assert!(reg.mark_dead(owner));
        for w in &weapons {
            assert!(!reg.is_alive(*w));
        }
        assert_eq!(reg.pending_removals(), 3);
        assert_eq!(reg.count(EntityKind::Weapon), 0);
    }

    #[test]
    fn test_sweep_only_despawns_the_dead() {
        let mut physics = CircleWorld::new();
        let mut reg = Registry::new();
        let dead = reg.spawn(&mut physics, EntityKind::Item, Faction::Neutral, desc(), ());
        let live = reg.spawn(&mut physics, EntityKind::Item, Faction::Neutral, desc(), ());
        reg.mark_dead(dead);
        reg.flush_removals(&mut physics);

        reg.sweep_dead();
        reg.sweep_dead();
        assert!(!reg.world().contains(dead));
        assert!(reg.world().contains(live));
        assert_eq!(reg.world().len(), 1);
        assert_eq!(reg.count(EntityKind::Item), 1);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut physics = CircleWorld::new();
        let mut reg = Registry::new();
        let a = reg.spawn(&mut physics, EntityKind::Item, Faction::Neutral, desc(), ());
        reg.spawn(&mut physics, EntityKind::Item, Faction::Neutral, desc(), ());
        reg.mark_dead(a);

        reg.clear(&mut physics);
        assert_eq!(physics.body_count(), 0);
        assert_eq!(reg.world().len(), 0);
        assert_eq!(reg.pending_removals(), 0);
    }
}
