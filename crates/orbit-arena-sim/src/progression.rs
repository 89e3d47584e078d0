//! Player progression: levelling curve, damage resolution, item effects.

use hecs::Entity;

use orbit_arena_core::components::{Character, PlayerState};
use orbit_arena_core::constants::*;
use orbit_arena_core::enums::{ItemKind, SessionMode};
use orbit_arena_core::events::AudioEvent;
use orbit_arena_core::types::OrbitStats;

use crate::deferred::{DeferredAction, DeferredQueue};
use crate::physics::PhysicsBackend;
use crate::registry::Registry;
use crate::world_setup::apply_orbit_stats;

/// Orbit ring of a player at `level`. Fixed design table.
pub fn player_orbit_stats(level: u32) -> OrbitStats {
    let level = level.max(1);
    let step = (level - 1) as f32;
    OrbitStats::new(
        (1 + level / 2).min(PLAYER_MAX_ORBIT_WEAPONS),
        PLAYER_BASE_ORBIT_RADIUS + step * PLAYER_ORBIT_RADIUS_PER_LEVEL,
        PLAYER_BASE_ORBIT_SPEED + step * PLAYER_ORBIT_SPEED_PER_LEVEL,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable: nothing changes.
    Absorbed,
    /// Shield consumed, short invulnerability granted.
    ShieldBroken,
    Died,
}

impl DamageOutcome {
    pub fn died(self) -> bool {
        self == DamageOutcome::Died
    }
}

/// Damage decision as a function of the two protection flags.
pub fn resolve_damage(invulnerable: bool, has_shield: bool) -> DamageOutcome {
    if invulnerable {
        DamageOutcome::Absorbed
    } else if has_shield {
        DamageOutcome::ShieldBroken
    } else {
        DamageOutcome::Died
    }
}

/// Apply one hit to a player.
pub fn take_damage(state: &mut PlayerState) -> DamageOutcome {
    let outcome = resolve_damage(state.invulnerable_for > 0.0, state.has_shield);
    match outcome {
        DamageOutcome::Absorbed => {}
        DamageOutcome::ShieldBroken => {
            state.has_shield = false;
            state.invulnerable_for = SHIELD_INVULNERABILITY_SECS;
        }
        DamageOutcome::Died => {
            state.has_shield = false;
            state.invulnerable_for = 0.0;
        }
    }
    outcome
}

/// Count invulnerability down, floored at zero.
pub fn tick_invulnerability(state: &mut PlayerState, dt: f32) {
    state.invulnerable_for = (state.invulnerable_for - dt).max(0.0);
}

/// Rebuild the ring of every queued player from its current level.
///
/// Runs after collision resolution: the old weapons must stay live for the
/// rest of the step's contacts.
pub fn rebuild_rings(
    registry: &mut Registry,
    physics: &mut dyn PhysicsBackend,
    pending: &mut Vec<Entity>,
    mode: SessionMode,
) {
    for player in pending.drain(..) {
        if !registry.is_alive(player) {
            continue;
        }
        let Some(level) = registry
            .world()
            .get::<&Character>(player)
            .ok()
            .map(|c| c.level)
        else {
            continue;
        };
        apply_orbit_stats(registry, physics, player, player_orbit_stats(level), mode);
    }
}

/// Mutable pieces of the session that progression effects touch.
pub struct Effects<'a> {
    pub registry: &'a mut Registry,
    pub physics: &'a mut dyn PhysicsBackend,
    pub deferred: &'a mut DeferredQueue,
    pub audio: &'a mut Vec<AudioEvent>,
    /// Players whose ring must be rebuilt once the contact batch is done.
    pub rebuilds: &'a mut Vec<Entity>,
    pub now: f64,
    pub mode: SessionMode,
}

impl Effects<'_> {
    /// Raise a player's level (capped) and queue its ring rebuild.
    /// Returns false at the cap or if the player is gone.
    pub fn level_up(&mut self, player: Entity) -> bool {
        let (level, slot) = {
            let world = self.registry.world();
            let Ok(mut character) = world.get::<&mut Character>(player) else {
                return false;
            };
            let Ok(mut state) = world.get::<&mut PlayerState>(player) else {
                return false;
            };
            if character.level >= PLAYER_MAX_LEVEL {
                return false;
            }
            character.level += 1;
            state.pulse = true;
            (character.level, state.slot)
        };

        if !self.rebuilds.contains(&player) {
            self.rebuilds.push(player);
        }
        self.deferred.reschedule(
            self.now + LEVEL_UP_PULSE_SECS,
            DeferredAction::EndPulse { entity: player },
        );
        self.audio.push(AudioEvent::LevelUp { slot, level });
        log::debug!("player {slot} reached level {level}");
        true
    }

    /// Credit a kill; every `kills_per_level` kills grant a level.
    pub fn credit_kill(&mut self, player: Entity, kills_per_level: u32) {
        let level_up = {
            let Ok(mut state) = self.registry.world().get::<&mut PlayerState>(player) else {
                return;
            };
            state.kills_toward_level += 1;
            if kills_per_level > 0 && state.kills_toward_level >= kills_per_level {
                state.kills_toward_level = 0;
                true
            } else {
                false
            }
        };
        if level_up {
            self.level_up(player);
        }
    }

    /// Apply an item to the player who touched it.
    pub fn apply_item(&mut self, player: Entity, kind: ItemKind) {
        match kind {
            ItemKind::Shield => {
                if let Ok(mut state) = self.registry.world().get::<&mut PlayerState>(player) {
                    state.has_shield = true;
                }
            }
            ItemKind::Speed => {
                let world = self.registry.world();
                let (Ok(mut character), Ok(mut state)) = (
                    world.get::<&mut Character>(player),
                    world.get::<&mut PlayerState>(player),
                ) else {
                    return;
                };
                character.move_speed = state.base_move_speed * SPEED_BOOST_FACTOR;
                state.speed_boosted = true;
                self.deferred.reschedule(
                    self.now + SPEED_BOOST_SECS,
                    DeferredAction::RestoreMoveSpeed { entity: player },
                );
            }
            ItemKind::ExtraOrbit => {
                self.level_up(player);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_state() -> PlayerState {
        PlayerState {
            slot: 1,
            has_shield: false,
            invulnerable_for: 0.0,
            base_move_speed: PLAYER_MOVE_SPEED,
            speed_boosted: false,
            kills_toward_level: 0,
            pulse: false,
        }
    }

    #[test]
    fn test_orbit_curve() {
        let l1 = player_orbit_stats(1);
        assert_eq!(l1.count, 1);
        assert!((l1.radius - 1.2).abs() < 1e-6);
        assert!((l1.speed - 2.0).abs() < 1e-6);

        assert_eq!(player_orbit_stats(2).count, 2);
        assert_eq!(player_orbit_stats(3).count, 2);
        assert_eq!(player_orbit_stats(4).count, 3);

        let l10 = player_orbit_stats(10);
        assert_eq!(l10.count, 6);
        assert!((l10.radius - 3.0).abs() < 1e-5);
        assert!((l10.speed - 4.7).abs() < 1e-5);
    }

    #[test]
    fn test_damage_truth_table() {
        assert_eq!(resolve_damage(true, true), DamageOutcome::Absorbed);
        assert_eq!(resolve_damage(true, false), DamageOutcome::Absorbed);
        assert_eq!(resolve_damage(false, true), DamageOutcome::ShieldBroken);
        assert_eq!(resolve_damage(false, false), DamageOutcome::Died);
    }

    #[test]
    fn test_take_damage_state_changes() {
        let mut s = fresh_state();
        s.invulnerable_for = 0.3;
        s.has_shield = true;
        assert_eq!(take_damage(&mut s), DamageOutcome::Absorbed);
        assert!(s.has_shield);
        assert_eq!(s.invulnerable_for, 0.3);

        let mut s = fresh_state();
        s.has_shield = true;
        assert!(!take_damage(&mut s).died());
        assert!(!s.has_shield);
        assert_eq!(s.invulnerable_for, SHIELD_INVULNERABILITY_SECS);
        // The window blocks the overlapping follow-up hit.
        assert_eq!(take_damage(&mut s), DamageOutcome::Absorbed);

        let mut s = fresh_state();
        assert!(take_damage(&mut s).died());
        assert_eq!(s.invulnerable_for, 0.0);
        assert!(!s.has_shield);
    }

    #[test]
    fn test_invulnerability_countdown_floors_at_zero() {
        let mut s = fresh_state();
        s.invulnerable_for = 0.5;
        tick_invulnerability(&mut s, 0.3);
        assert!((s.invulnerable_for - 0.2).abs() < 1e-6);
        tick_invulnerability(&mut s, 0.3);
        assert_eq!(s.invulnerable_for, 0.0);
    }
}
