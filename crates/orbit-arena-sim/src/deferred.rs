//! Time-ordered deferred actions and the scorch decals they expire.
//!
//! Timed effects (speed boost, level-up pulse, decal fade) are entries in a
//! queue drained every tick, so a reset can drop them all at once.

use glam::Vec2;
use hecs::Entity;

use orbit_arena_core::state::DecalView;

/// Something to do once simulation time reaches a given point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// End a speed boost: move speed goes back to the base value.
    RestoreMoveSpeed { entity: Entity },
    /// End the level-up pulse.
    EndPulse { entity: Entity },
    /// Remove a scorch decal.
    ExpireDecal { decal_id: u32 },
}

impl DeferredAction {
    fn targets(&self, entity: Entity) -> bool {
        match *self {
            DeferredAction::RestoreMoveSpeed { entity: e } | DeferredAction::EndPulse { entity: e } => {
                e == entity
            }
            DeferredAction::ExpireDecal { .. } => false,
        }
    }
}

/// Entries sorted by fire time; equal times keep insertion order.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    entries: Vec<(f64, DeferredAction)>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at_secs: f64, action: DeferredAction) {
        let idx = self.entries.partition_point(|(t, _)| *t <= fire_at_secs);
        self.entries.insert(idx, (fire_at_secs, action));
    }

    /// Schedule `action`, dropping any pending copy of it first.
    pub fn reschedule(&mut self, fire_at_secs: f64, action: DeferredAction) {
        self.entries.retain(|(_, a)| *a != action);
        self.schedule(fire_at_secs, action);
    }

    /// Remove and return every action due at or before `now_secs`.
    pub fn drain_due(&mut self, now_secs: f64) -> Vec<DeferredAction> {
        let due = self.entries.partition_point(|(t, _)| *t <= now_secs);
        self.entries.drain(..due).map(|(_, a)| a).collect()
    }

    /// Drop pending actions aimed at an entity that no longer exists.
    pub fn cancel_for(&mut self, entity: Entity) {
        self.entries.retain(|(_, a)| !a.targets(entity));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Live scorch marks left by explosions.
#[derive(Debug, Default)]
pub struct Decals {
    next_id: u32,
    live: Vec<DecalView>,
}

impl Decals {
    pub fn add(&mut self, position: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.live.push(DecalView { id, position });
        id
    }

    pub fn expire(&mut self, id: u32) {
        self.live.retain(|d| d.id != id);
    }

    pub fn views(&self) -> Vec<DecalView> {
        self.live.clone()
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    #[test]
    fn test_drain_in_time_order() {
        let mut q = DeferredQueue::new();
        q.schedule(2.0, DeferredAction::ExpireDecal { decal_id: 2 });
        q.schedule(1.0, DeferredAction::ExpireDecal { decal_id: 1 });
        q.schedule(1.0, DeferredAction::ExpireDecal { decal_id: 3 });

        assert!(q.drain_due(0.5).is_empty());
        assert_eq!(
            q.drain_due(1.0),
            vec![
                DeferredAction::ExpireDecal { decal_id: 1 },
                DeferredAction::ExpireDecal { decal_id: 3 }
            ]
        );
        assert_eq!(q.len(), 1);
        assert_eq!(q.drain_due(10.0).len(), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn test_reschedule_refreshes_instead_of_stacking() {
        let mut world = World::new();
        let entity = world.spawn((0u8,));
        let mut q = DeferredQueue::new();
        q.schedule(5.0, DeferredAction::RestoreMoveSpeed { entity });
        q.reschedule(8.0, DeferredAction::RestoreMoveSpeed { entity });

        assert_eq!(q.len(), 1);
        assert!(q.drain_due(5.0).is_empty());
        assert_eq!(q.drain_due(8.0).len(), 1);
    }

    #[test]
    fn test_cancel_for_entity() {
        let mut world = World::new();
        let a = world.spawn((0u8,));
        let b = world.spawn((1u8,));
        let mut q = DeferredQueue::new();
        q.schedule(1.0, DeferredAction::EndPulse { entity: a });
        q.schedule(1.0, DeferredAction::EndPulse { entity: b });
        q.schedule(1.0, DeferredAction::RestoreMoveSpeed { entity: a });
        q.schedule(1.0, DeferredAction::ExpireDecal { decal_id: 0 });

        q.cancel_for(a);
        assert_eq!(q.len(), 2);
        q.clear();
        assert!(q.is_empty());
    }

    #[test]
    fn test_decal_lifecycle() {
        let mut decals = Decals::default();
        let first = decals.add(Vec2::new(1.0, 2.0));
        let second = decals.add(Vec2::ZERO);
        assert_ne!(first, second);
        decals.expire(first);
        let views = decals.views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].id, second);
    }
}
