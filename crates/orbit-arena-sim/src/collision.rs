//! Collision resolver: turns contact-begin pairs into game rules.
//!
//! Each body is described by a tag answering independent predicates
//! (weapon? owner? bomb? item? player?). Rules are tried in a fixed priority
//! order, both ways round, and the first match wins. Unmatched pairs are
//! ignored.

use glam::Vec2;
use hecs::Entity;

use orbit_arena_core::components::{EntityMeta, Item, Obstacle, PlayerState, Weapon};
use orbit_arena_core::constants::DECAL_TTL_SECS;
use orbit_arena_core::enums::*;
use orbit_arena_core::events::{AudioEvent, UiEvent};

use crate::deferred::{Decals, DeferredAction};
use crate::phase::PhaseDirector;
use crate::physics::ContactPair;
use crate::progression::{take_damage, DamageOutcome, Effects};
use crate::registry::Registry;
use crate::session::{PvpSession, RoundResult, ScoreState};

/// Collision-relevant facts about one live entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionTag {
    pub entity: Entity,
    pub kind: EntityKind,
    pub faction: Faction,
    pub obstacle: Option<ObstacleKind>,
    pub item: Option<ItemKind>,
    /// Player slot of the character, or of the weapon's owner.
    pub slot: Option<u8>,
}

impl CollisionTag {
    pub fn read(registry: &Registry, entity: Entity) -> Option<Self> {
        let world = registry.world();
        let meta = *world.get::<&EntityMeta>(entity).ok()?;
        if meta.is_dead {
            return None;
        }
        let slot = match meta.kind {
            EntityKind::Player => world.get::<&PlayerState>(entity).ok().map(|p| p.slot),
            EntityKind::Weapon | EntityKind::Projectile => {
                world.get::<&Weapon>(entity).ok().and_then(|w| w.owner_slot)
            }
            _ => None,
        };
        Some(Self {
            entity,
            kind: meta.kind,
            faction: meta.faction,
            obstacle: world.get::<&Obstacle>(entity).ok().map(|o| o.kind),
            item: world.get::<&Item>(entity).ok().map(|i| i.kind),
            slot,
        })
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, EntityKind::Weapon | EntityKind::Projectile)
    }

    pub fn is_projectile(&self) -> bool {
        self.kind == EntityKind::Projectile
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }

    pub fn is_enemy(&self) -> bool {
        self.kind == EntityKind::Enemy
    }

    pub fn is_obstacle(&self) -> bool {
        self.obstacle.is_some()
    }

    pub fn is_bomb(&self) -> bool {
        self.obstacle == Some(ObstacleKind::Bomb)
    }
}

/// The single rule a contact resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    EnemyKilled {
        enemy: Entity,
        killer_slot: Option<u8>,
    },
    PlayerHit {
        player: Entity,
        /// Set when the hit came from a projectile, which then self-destructs.
        projectile: Option<Entity>,
    },
    BombHit {
        player: Entity,
        bomb: Entity,
    },
    ItemPickup {
        player: Entity,
        item: Entity,
        kind: ItemKind,
    },
    ProjectileBlocked {
        projectile: Entity,
        /// Bomb caught in the blast.
        bomb: Option<Entity>,
    },
}

type Rule = fn(&CollisionTag, &CollisionTag, SessionMode) -> Option<Resolution>;

/// Priority order. The first rule to match either way round wins.
const RULES: [Rule; 6] = [
    player_weapon_kills_enemy,
    enemy_weapon_hits_player,
    rival_weapon_hits_player,
    bomb_hits_player,
    player_collects_item,
    projectile_hits_obstacle,
];

fn player_weapon_kills_enemy(
    a: &CollisionTag,
    b: &CollisionTag,
    _: SessionMode,
) -> Option<Resolution> {
    (a.is_weapon() && a.faction == Faction::Player && b.is_enemy()).then_some(
        Resolution::EnemyKilled {
            enemy: b.entity,
            killer_slot: a.slot,
        },
    )
}

fn enemy_weapon_hits_player(
    a: &CollisionTag,
    b: &CollisionTag,
    _: SessionMode,
) -> Option<Resolution> {
    (a.is_weapon() && a.faction == Faction::Enemy && b.is_player()).then_some(
        Resolution::PlayerHit {
            player: b.entity,
            projectile: a.is_projectile().then_some(a.entity),
        },
    )
}

fn rival_weapon_hits_player(
    a: &CollisionTag,
    b: &CollisionTag,
    mode: SessionMode,
) -> Option<Resolution> {
    (mode == SessionMode::Pvp
        && a.is_weapon()
        && a.faction == Faction::Player
        && b.is_player()
        && a.slot != b.slot)
        .then_some(Resolution::PlayerHit {
            player: b.entity,
            projectile: None,
        })
}

fn bomb_hits_player(
    a: &CollisionTag,
    b: &CollisionTag,
    _: SessionMode,
) -> Option<Resolution> {
    (a.is_bomb() && b.is_player()).then_some(Resolution::BombHit {
        player: b.entity,
        bomb: a.entity,
    })
}

fn player_collects_item(
    a: &CollisionTag,
    b: &CollisionTag,
    _: SessionMode,
) -> Option<Resolution> {
    match (a.item, b.is_player()) {
        (Some(kind), true) => Some(Resolution::ItemPickup {
            player: b.entity,
            item: a.entity,
            kind,
        }),
        _ => None,
    }
}

fn projectile_hits_obstacle(
    a: &CollisionTag,
    b: &CollisionTag,
    _: SessionMode,
) -> Option<Resolution> {
    (a.is_projectile() && b.is_obstacle()).then_some(Resolution::ProjectileBlocked {
        projectile: a.entity,
        bomb: b.is_bomb().then_some(b.entity),
    })
}

/// Pick the rule for an unordered pair, or None for inert pairs.
pub fn classify(
    a: &CollisionTag,
    b: &CollisionTag,
    mode: SessionMode,
) -> Option<Resolution> {
    RULES
        .iter()
        .find_map(|rule| rule(a, b, mode).or_else(|| rule(b, a, mode)))
}

/// How a contact ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    GameOver,
    RoundOver { winner: Option<u8> },
    MatchOver { winner: u8 },
}

pub struct ResolveContext<'a> {
    pub fx: Effects<'a>,
    pub director: &'a mut PhaseDirector,
    pub score: &'a mut ScoreState,
    pub pvp: &'a mut PvpSession,
    pub decals: &'a mut Decals,
    pub ui: &'a mut Vec<UiEvent>,
    pub kills_per_level: u32,
}

/// Resolve one physics step's contacts.
///
/// A single-player death ends the session at once and the remaining contacts
/// are ignored. PVP deaths are collected and the round is judged once the
/// whole batch is resolved, so simultaneous eliminations draw.
pub fn run(ctx: &mut ResolveContext, contacts: &[ContactPair]) -> Option<SessionEnd> {
    let mut pvp_deaths = 0;
    for contact in contacts {
        let registry = &*ctx.fx.registry;
        let (Some(a), Some(b)) = (registry.lookup(contact.a), registry.lookup(contact.b)) else {
            continue;
        };
        let (Some(tag_a), Some(tag_b)) =
            (CollisionTag::read(registry, a), CollisionTag::read(registry, b))
        else {
            continue;
        };
        let Some(resolution) = classify(&tag_a, &tag_b, ctx.fx.mode) else {
            continue;
        };
        if !ctx.apply(resolution) {
            continue;
        }
        match ctx.fx.mode {
            SessionMode::SinglePlayer => return Some(ctx.game_over()),
            SessionMode::Pvp => pvp_deaths += 1,
        }
    }
    if pvp_deaths > 0 {
        ctx.judge_round()
    } else {
        None
    }
}

impl ResolveContext<'_> {
    /// Apply one rule. Returns true when a player died.
    fn apply(&mut self, resolution: Resolution) -> bool {
        match resolution {
            Resolution::EnemyKilled { enemy, killer_slot } => {
                self.kill_enemy(enemy, killer_slot);
                false
            }
            Resolution::PlayerHit { player, projectile } => {
                if let Some(projectile) = projectile {
                    self.detonate(projectile);
                }
                self.damage_player(player)
            }
            Resolution::BombHit { player, bomb } => {
                self.detonate(bomb);
                self.damage_player(player)
            }
            Resolution::ItemPickup { player, item, kind } => {
                if self.fx.registry.mark_dead(item) {
                    self.fx.apply_item(player, kind);
                    if let Some(slot) = player_slot(&*self.fx.registry, player) {
                        self.fx.audio.push(AudioEvent::Pickup { slot, item: kind });
                    }
                }
                false
            }
            Resolution::ProjectileBlocked { projectile, bomb } => {
                self.fx.registry.mark_dead(projectile);
                if let Some(bomb) = bomb {
                    self.detonate(bomb);
                }
                false
            }
        }
    }

    fn position(&self, entity: Entity) -> Vec2 {
        self.fx
            .registry
            .position(&*self.fx.physics, entity)
            .unwrap_or(Vec2::ZERO)
    }

    /// Kill `entity` with an explosion: sound, scorch decal.
    fn detonate(&mut self, entity: Entity) {
        let at = self.position(entity);
        if !self.fx.registry.mark_dead(entity) {
            return;
        }
        self.fx.audio.push(AudioEvent::Explosion { x: at.x, y: at.y });
        let decal_id = self.decals.add(at);
        self.fx.deferred.schedule(
            self.fx.now + DECAL_TTL_SECS,
            DeferredAction::ExpireDecal { decal_id },
        );
    }

    fn kill_enemy(&mut self, enemy: Entity, killer_slot: Option<u8>) {
        let at = self.position(enemy);
        if !self.fx.registry.mark_dead(enemy) {
            return;
        }
        self.fx.deferred.cancel_for(enemy);
        self.score.score += 1;
        self.score.enemies_killed += 1;
        self.fx.audio.push(AudioEvent::Kill { x: at.x, y: at.y });
        if let Some(slot) = killer_slot {
            self.ui.push(UiEvent::ScoreDelta { slot, delta: 1 });
        }

        if self.director.on_enemy_killed() {
            let phase = self.director.phase();
            let sub_level = self.director.sub_level();
            let name = self.director.name();
            log::info!("advanced to {name}");
            self.fx.audio.push(AudioEvent::PhaseAdvance { phase, sub_level });
            self.ui.push(UiEvent::PhaseName { name });
        }

        if let Some(player) = killer_slot.and_then(|s| player_by_slot(&*self.fx.registry, s)) {
            self.fx.credit_kill(player, self.kills_per_level);
        }
    }

    /// Returns true when the hit killed the player.
    fn damage_player(&mut self, player: Entity) -> bool {
        let (outcome, slot) = {
            let Ok(mut state) = self.fx.registry.world().get::<&mut PlayerState>(player) else {
                return false;
            };
            (take_damage(&mut state), state.slot)
        };
        match outcome {
            DamageOutcome::Absorbed => false,
            DamageOutcome::ShieldBroken => {
                self.fx.audio.push(AudioEvent::ShieldBreak { slot });
                false
            }
            DamageOutcome::Died => {
                self.fx.audio.push(AudioEvent::Damage { slot });
                self.fx.deferred.cancel_for(player);
                self.fx.registry.mark_dead(player)
            }
        }
    }

    fn game_over(&mut self) -> SessionEnd {
        log::info!("game over with score {}", self.score.score);
        self.ui.push(UiEvent::GameOver {
            score: self.score.score,
        });
        SessionEnd::GameOver
    }

    /// End the PVP round once at most one player is left standing.
    fn judge_round(&mut self) -> Option<SessionEnd> {
        let alive = living_slots(&*self.fx.registry);
        if alive.len() > 1 {
            return None;
        }
        let winner = alive.first().copied();
        let round = self.pvp.round();
        self.ui.push(UiEvent::RoundOver { round, winner });
        match self.pvp.finish_round(winner) {
            RoundResult::RoundEnd => {
                log::info!("round {round} over, winner {winner:?}");
                Some(SessionEnd::RoundOver { winner })
            }
            RoundResult::MatchOver { winner } => {
                log::info!("match over, player {winner} wins");
                self.ui.push(UiEvent::MatchOver {
                    winner,
                    scores: self.pvp.scores().to_vec(),
                });
                Some(SessionEnd::MatchOver { winner })
            }
        }
    }
}

fn player_slot(registry: &Registry, player: Entity) -> Option<u8> {
    registry
        .world()
        .get::<&PlayerState>(player)
        .ok()
        .map(|p| p.slot)
}

/// Live player with the given slot.
pub fn player_by_slot(registry: &Registry, slot: u8) -> Option<Entity> {
    registry
        .world()
        .query::<(&PlayerState, &EntityMeta)>()
        .iter()
        .find(|(_, (p, m))| p.slot == slot && !m.is_dead)
        .map(|(e, _)| e)
}

/// Slots of every live player, ascending.
pub fn living_slots(registry: &Registry) -> Vec<u8> {
    let mut slots: Vec<u8> = registry
        .world()
        .query::<(&PlayerState, &EntityMeta)>()
        .iter()
        .filter(|(_, (_, m))| !m.is_dead)
        .map(|(_, (p, _))| p.slot)
        .collect();
    slots.sort_unstable();
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|i| world.spawn((i as u32,))).collect()
    }

    fn tag(entity: Entity, kind: EntityKind, faction: Faction) -> CollisionTag {
        CollisionTag {
            entity,
            kind,
            faction,
            obstacle: None,
            item: None,
            slot: None,
        }
    }

    fn player(entity: Entity, slot: u8) -> CollisionTag {
        CollisionTag {
            slot: Some(slot),
            ..tag(entity, EntityKind::Player, Faction::Player)
        }
    }

    fn player_weapon(entity: Entity, slot: u8) -> CollisionTag {
        CollisionTag {
            slot: Some(slot),
            ..tag(entity, EntityKind::Weapon, Faction::Player)
        }
    }

    fn obstacle(entity: Entity, kind: ObstacleKind) -> CollisionTag {
        CollisionTag {
            obstacle: Some(kind),
            ..tag(entity, EntityKind::Obstacle, Faction::Neutral)
        }
    }

    const SP: SessionMode = SessionMode::SinglePlayer;

    #[test]
    fn test_order_independent() {
        let e = entities(2);
        let weapon = player_weapon(e[0], 1);
        let enemy = tag(e[1], EntityKind::Enemy, Faction::Enemy);
        let expected = Some(Resolution::EnemyKilled {
            enemy: e[1],
            killer_slot: Some(1),
        });
        assert_eq!(classify(&weapon, &enemy, SP), expected);
        assert_eq!(classify(&enemy, &weapon, SP), expected);
    }

    #[test]
    fn test_projectile_vs_player() {
        let e = entities(2);
        let projectile = tag(e[0], EntityKind::Projectile, Faction::Enemy);
        let p = player(e[1], 1);
        assert_eq!(
            classify(&p, &projectile, SP),
            Some(Resolution::PlayerHit {
                player: e[1],
                projectile: Some(e[0]),
            })
        );

        // Orbit weapons do not self-destruct.
        let orbit = tag(e[0], EntityKind::Weapon, Faction::Enemy);
        assert_eq!(
            classify(&orbit, &p, SP),
            Some(Resolution::PlayerHit {
                player: e[1],
                projectile: None,
            })
        );
    }

    #[test]
    fn test_bomb_item_and_blocked_projectile() {
        let e = entities(3);
        let p = player(e[0], 1);
        let bomb = obstacle(e[1], ObstacleKind::Bomb);
        assert_eq!(
            classify(&bomb, &p, SP),
            Some(Resolution::BombHit {
                player: e[0],
                bomb: e[1],
            })
        );

        let item = CollisionTag {
            item: Some(ItemKind::Speed),
            ..tag(e[2], EntityKind::Item, Faction::Neutral)
        };
        assert_eq!(
            classify(&p, &item, SP),
            Some(Resolution::ItemPickup {
                player: e[0],
                item: e[2],
                kind: ItemKind::Speed,
            })
        );

        let projectile = tag(e[2], EntityKind::Projectile, Faction::Enemy);
        assert_eq!(
            classify(&bomb, &projectile, SP),
            Some(Resolution::ProjectileBlocked {
                projectile: e[2],
                bomb: Some(e[1]),
            })
        );
        let wall = obstacle(e[1], ObstacleKind::Wall);
        assert_eq!(
            classify(&projectile, &wall, SP),
            Some(Resolution::ProjectileBlocked {
                projectile: e[2],
                bomb: None,
            })
        );
        // Walls have no rule against players.
        assert_eq!(classify(&wall, &p, SP), None);
    }

    #[test]
    fn test_inert_pairs() {
        let e = entities(2);
        let a = tag(e[0], EntityKind::Enemy, Faction::Enemy);
        let b = tag(e[1], EntityKind::Enemy, Faction::Enemy);
        assert_eq!(classify(&a, &b, SP), None);

        let w1 = player_weapon(e[0], 1);
        let w2 = tag(e[1], EntityKind::Weapon, Faction::Enemy);
        assert_eq!(classify(&w1, &w2, SP), None);
    }

    #[test]
    fn test_rival_weapons_only_in_pvp() {
        let e = entities(3);
        let weapon = player_weapon(e[0], 1);
        let rival = player(e[1], 2);
        let owner = player(e[2], 1);

        assert_eq!(classify(&weapon, &rival, SP), None);
        assert_eq!(
            classify(&weapon, &rival, SessionMode::Pvp),
            Some(Resolution::PlayerHit {
                player: e[1],
                projectile: None,
            })
        );
        assert_eq!(classify(&weapon, &owner, SessionMode::Pvp), None);
    }

    #[test]
    fn test_enemy_rule_outranks_bomb_rule() {
        let e = entities(2);
        // A projectile tagged as both weapon and obstacle still resolves as a weapon hit.
        let odd = CollisionTag {
            obstacle: Some(ObstacleKind::Bomb),
            ..tag(e[0], EntityKind::Projectile, Faction::Enemy)
        };
        let p = player(e[1], 1);
        assert!(matches!(
            classify(&odd, &p, SP),
            Some(Resolution::PlayerHit { .. })
        ));
    }
}
