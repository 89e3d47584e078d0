//! Physics collaborator seam.
//!
//! The simulation only issues body commands (create, remove, move, set
//! velocity) and consumes results (positions, contact-begin pairs).
//! `CircleWorld` is a small deterministic backend for headless runs and tests.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;

use orbit_arena_core::enums::BodyKind;
use orbit_arena_core::types::BodyHandle;

/// Everything needed to create a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub radius: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Collision category bit.
    pub group: u32,
    /// Categories this body reports contacts with.
    pub mask: u32,
}

/// Two bodies started touching during the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContactPair {
    pub a: BodyHandle,
    pub b: BodyHandle,
}

/// True when both filters accept each other.
pub fn filters_match(group_a: u32, mask_a: u32, group_b: u32, mask_b: u32) -> bool {
    (group_a & mask_b) != 0 && (group_b & mask_a) != 0
}

/// Operations the simulation needs from a rigid-body engine.
///
/// Calls with an unknown handle are no-ops (getters return None).
pub trait PhysicsBackend {
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle;
    fn remove_body(&mut self, handle: BodyHandle);
    /// Advance the world. Must not be called while contacts are being handled.
    fn step(&mut self, dt: f32);
    /// Contact-begin pairs produced since the last drain.
    fn drain_contacts(&mut self) -> Vec<ContactPair>;
    fn position(&self, handle: BodyHandle) -> Option<Vec2>;
    fn set_position(&mut self, handle: BodyHandle, position: Vec2);
    fn velocity(&self, handle: BodyHandle) -> Option<Vec2>;
    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2);
    fn body_count(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Body {
    desc: BodyDesc,
}

/// Circle-only physics: velocity integration, static push-out, and
/// begin-contact detection by diffing overlap sets between steps.
#[derive(Debug, Default)]
pub struct CircleWorld {
    bodies: BTreeMap<BodyHandle, Body>,
    next_handle: u32,
    touching: BTreeSet<(BodyHandle, BodyHandle)>,
    contacts: Vec<ContactPair>,
}

impl CircleWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn overlapping_pairs(&self) -> BTreeSet<(BodyHandle, BodyHandle)> {
        let mut pairs = BTreeSet::new();
        let bodies: Vec<(&BodyHandle, &Body)> = self.bodies.iter().collect();
        for (i, (ha, a)) in bodies.iter().enumerate() {
            for (hb, b) in &bodies[i + 1..] {
                if !filters_match(a.desc.group, a.desc.mask, b.desc.group, b.desc.mask) {
                    continue;
                }
                let reach = a.desc.radius + b.desc.radius;
                if a.desc.position.distance_squared(b.desc.position) < reach * reach {
                    pairs.insert((**ha, **hb));
                }
            }
        }
        pairs
    }

    /// Push dynamic bodies out of overlapping static ones.
    fn resolve_static_overlaps(&mut self) {
        let statics: Vec<BodyDesc> = self
            .bodies
            .values()
            .filter(|b| b.desc.kind == BodyKind::Static)
            .map(|b| b.desc)
            .collect();
        for body in self.bodies.values_mut() {
            if body.desc.kind != BodyKind::Dynamic {
                continue;
            }
            for wall in &statics {
                if !filters_match(body.desc.group, body.desc.mask, wall.group, wall.mask) {
                    continue;
                }
                let offset = body.desc.position - wall.position;
                let reach = body.desc.radius + wall.radius;
                let distance = offset.length();
                if distance < reach {
                    let normal = if distance > f32::EPSILON {
                        offset / distance
                    } else {
                        Vec2::X
                    };
                    body.desc.position = wall.position + normal * reach;
                }
            }
        }
    }
}

impl PhysicsBackend for CircleWorld {
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.bodies.insert(handle, Body { desc });
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies.remove(&handle);
        self.touching.retain(|(a, b)| *a != handle && *b != handle);
    }

    fn step(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            if body.desc.kind == BodyKind::Dynamic {
                body.desc.position += body.desc.velocity * dt;
            }
        }

        // Contacts are detected before push-out so resting contacts still begin.
        let now = self.overlapping_pairs();
        for &(a, b) in now.difference(&self.touching) {
            self.contacts.push(ContactPair { a, b });
        }
        self.touching = now;

        self.resolve_static_overlaps();
    }

    fn drain_contacts(&mut self) -> Vec<ContactPair> {
        std::mem::take(&mut self.contacts)
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(&handle).map(|b| b.desc.position)
    }

    fn set_position(&mut self, handle: BodyHandle, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.desc.position = position;
        }
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(&handle).map(|b| b.desc.velocity)
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.desc.velocity = velocity;
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(kind: BodyKind, x: f32, group: u32, mask: u32) -> BodyDesc {
        BodyDesc {
            kind,
            radius: 0.5,
            position: Vec2::new(x, 0.0),
            velocity: Vec2::ZERO,
            group,
            mask,
        }
    }

    #[test]
    fn test_contact_begins_once() {
        let mut world = CircleWorld::new();
        let a = world.create_body(circle(BodyKind::Dynamic, 0.0, 1, 8));
        let b = world.create_body(circle(BodyKind::Dynamic, 0.5, 8, 1));

        world.step(0.016);
        assert_eq!(world.drain_contacts(), vec![ContactPair { a, b }]);

        // Still overlapping: no new begin event.
        world.step(0.016);
        assert!(world.drain_contacts().is_empty());

        // Separate, then touch again.
        world.set_position(b, Vec2::new(5.0, 0.0));
        world.step(0.016);
        world.set_position(b, Vec2::new(0.2, 0.0));
        world.step(0.016);
        assert_eq!(world.drain_contacts().len(), 1);
    }

    #[test]
    fn test_filters_must_match_both_ways() {
        let mut world = CircleWorld::new();
        world.create_body(circle(BodyKind::Dynamic, 0.0, 1, 8));
        // Group 8 but does not accept group 1.
        world.create_body(circle(BodyKind::Dynamic, 0.1, 8, 2));
        world.step(0.016);
        assert!(world.drain_contacts().is_empty());
    }

    #[test]
    fn test_dynamic_integrates_kinematic_does_not() {
        let mut world = CircleWorld::new();
        let mut d = circle(BodyKind::Dynamic, 0.0, 1, 0);
        d.velocity = Vec2::new(2.0, 0.0);
        let mut k = circle(BodyKind::Kinematic, 10.0, 2, 0);
        k.velocity = Vec2::new(2.0, 0.0);
        let dh = world.create_body(d);
        let kh = world.create_body(k);

        world.step(0.5);
        assert_eq!(world.position(dh), Some(Vec2::new(1.0, 0.0)));
        assert_eq!(world.position(kh), Some(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_static_pushes_dynamic_out() {
        let mut world = CircleWorld::new();
        let wall = world.create_body(circle(BodyKind::Static, 0.0, 16, 1));
        let player = world.create_body(circle(BodyKind::Dynamic, 0.4, 1, 16));

        world.step(0.016);
        assert_eq!(world.drain_contacts().len(), 1);
        let pos = world.position(player).unwrap();
        let wall_pos = world.position(wall).unwrap();
        assert!((pos.distance(wall_pos) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_unknown_handles_are_ignored() {
        let mut world = CircleWorld::new();
        let h = world.create_body(circle(BodyKind::Dynamic, 0.0, 1, 1));
        world.remove_body(h);
        world.remove_body(h);
        world.set_velocity(h, Vec2::ONE);
        assert_eq!(world.position(h), None);
        assert_eq!(world.body_count(), 0);
    }
}
