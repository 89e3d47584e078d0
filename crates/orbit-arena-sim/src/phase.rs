//! Phase director: the difficulty state machine.
//!
//! Phases only move forward (Tutorial, Escalation, Obstacles, Free). Each
//! sub-level carries a kill quota; filling it advances the machine.

use orbit_arena_core::constants::*;
use orbit_arena_core::enums::{ArenaPhase, EnemyVariant};
use orbit_arena_core::state::DirectorView;

#[derive(Debug, Clone)]
pub struct PhaseDirector {
    phase: ArenaPhase,
    sub_level: u32,
    iteration: u32,
    kills: u32,
    total: u32,
    to_spawn: u32,
}

impl Default for PhaseDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseDirector {
    pub fn new() -> Self {
        let mut director = Self {
            phase: ArenaPhase::Tutorial,
            sub_level: 1,
            iteration: 1,
            kills: 0,
            total: 0,
            to_spawn: 0,
        };
        director.setup();
        director
    }

    /// Back to Tutorial sub-level 1 with fresh quotas.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn setup(&mut self) {
        self.total = match self.phase {
            ArenaPhase::Tutorial => TUTORIAL_ENEMIES_PER_SUB_LEVEL,
            ArenaPhase::Escalation => ESCALATION_ENEMIES_PER_ROUND,
            ArenaPhase::Obstacles => OBSTACLE_ENEMIES_PER_ITERATION,
            ArenaPhase::Free => FREE_BASE_ENEMIES + (self.iteration - 1) / 2,
        };
        self.to_spawn = self.total;
        self.kills = 0;
    }

    /// Count a kill. Returns true when it completed the current sub-level
    /// (the director has already advanced when this returns).
    pub fn on_enemy_killed(&mut self) -> bool {
        self.kills += 1;
        if self.kills >= self.total {
            self.next_sub_level();
            true
        } else {
            false
        }
    }

    fn next_sub_level(&mut self) {
        self.sub_level += 1;
        match self.phase {
            ArenaPhase::Tutorial => {
                if self.sub_level > TUTORIAL_SUB_LEVELS {
                    self.phase = ArenaPhase::Escalation;
                    self.sub_level = 1;
                }
            }
            ArenaPhase::Escalation => {
                if self.sub_level > ESCALATION_ROUNDS {
                    self.phase = ArenaPhase::Obstacles;
                    self.sub_level = 1;
                    self.iteration = 1;
                }
            }
            ArenaPhase::Obstacles => {
                if self.iteration >= OBSTACLE_ITERATIONS {
                    self.phase = ArenaPhase::Free;
                    self.sub_level = 1;
                    self.iteration = 1;
                } else {
                    self.iteration += 1;
                }
            }
            ArenaPhase::Free => {
                // Round A and Round B alternate forever.
                self.iteration += 1;
                self.sub_level = (self.sub_level % 2) + 1;
            }
        }
        self.setup();
    }

    /// Consume one unit of spawn quota. False once the quota is spent.
    pub fn take_spawn(&mut self) -> bool {
        if self.to_spawn == 0 {
            return false;
        }
        self.to_spawn -= 1;
        true
    }

    pub fn phase(&self) -> ArenaPhase {
        self.phase
    }

    pub fn sub_level(&self) -> u32 {
        self.sub_level
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Kills required to finish the current sub-level.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn enemies_to_spawn(&self) -> u32 {
        self.to_spawn
    }

    pub fn max_simultaneous_enemies(&self) -> usize {
        match self.phase {
            ArenaPhase::Tutorial => 5,
            _ => 15,
        }
    }

    pub fn item_cap(&self) -> usize {
        match self.phase {
            ArenaPhase::Tutorial | ArenaPhase::Escalation => 1,
            ArenaPhase::Obstacles => 2,
            ArenaPhase::Free => 3,
        }
    }

    /// Concurrent special enemies allowed; zero outside the free phase.
    pub fn special_cap(&self) -> usize {
        match self.phase {
            ArenaPhase::Free => 1 + ((self.iteration - 1) / 2) as usize,
            _ => 0,
        }
    }

    /// Special variant of the current free-phase round, if any.
    pub fn special_variant(&self) -> Option<EnemyVariant> {
        match (self.phase, self.sub_level) {
            (ArenaPhase::Free, 1) => Some(EnemyVariant::Launcher),
            (ArenaPhase::Free, _) => Some(EnemyVariant::Tank),
            _ => None,
        }
    }

    pub fn obstacles_enabled(&self) -> bool {
        self.phase >= ArenaPhase::Obstacles
    }

    /// Tier given to newly spawned enemies.
    pub fn spawn_tier(&self) -> u32 {
        match self.phase {
            ArenaPhase::Tutorial => 1,
            ArenaPhase::Escalation => self.sub_level.min(MAX_ENEMY_TIER),
            ArenaPhase::Obstacles => (self.iteration + 1).min(MAX_ENEMY_TIER),
            ArenaPhase::Free => MAX_ENEMY_TIER,
        }
    }

    pub fn name(&self) -> String {
        match self.phase {
            ArenaPhase::Tutorial => format!("Phase 1: Tutorial (Lvl {})", self.sub_level),
            ArenaPhase::Escalation => format!("Phase 2: Escalation (Rnd {})", self.sub_level),
            ArenaPhase::Obstacles => format!("Phase 3: Obstacles (Iter {})", self.iteration),
            ArenaPhase::Free => format!(
                "Phase 4: Free Mode (Iter {}) - {}",
                self.iteration,
                if self.sub_level == 1 { "Rnd A" } else { "Rnd B" }
            ),
        }
    }

    pub fn view(&self) -> DirectorView {
        DirectorView {
            phase: self.phase,
            name: self.name(),
            sub_level: self.sub_level,
            iteration: self.iteration,
            kills: self.kills,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Kill until the current sub-level completes; returns kills used.
    fn finish_sub_level(director: &mut PhaseDirector) -> u32 {
        let total = director.total();
        for i in 1..total {
            assert!(!director.on_enemy_killed(), "kill {i} of {total} advanced early");
        }
        assert!(director.on_enemy_killed());
        total
    }

    #[test]
    fn test_tutorial_takes_twelve_kills() {
        let mut d = PhaseDirector::new();
        let mut kills = 0;
        while d.phase() == ArenaPhase::Tutorial {
            kills += finish_sub_level(&mut d);
        }
        assert_eq!(kills, 12);
        assert_eq!(d.phase(), ArenaPhase::Escalation);
        assert_eq!(d.sub_level(), 1);
        assert_eq!(d.total(), 10);
    }

    #[test]
    fn test_full_progression_reaches_free() {
        let mut d = PhaseDirector::new();
        let mut seen = vec![d.phase()];
        let mut kills = 0;
        while d.phase() != ArenaPhase::Free {
            kills += finish_sub_level(&mut d);
            if seen.last() != Some(&d.phase()) {
                seen.push(d.phase());
            }
        }
        assert_eq!(
            seen,
            vec![
                ArenaPhase::Tutorial,
                ArenaPhase::Escalation,
                ArenaPhase::Obstacles,
                ArenaPhase::Free
            ]
        );
        // 4x3 + 3x10 + 2x10
        assert_eq!(kills, 62);
        assert_eq!(d.sub_level(), 1);
        assert_eq!(d.iteration(), 1);
    }

    #[test]
    fn test_escalation_tiers_follow_round() {
        let mut d = PhaseDirector::new();
        while d.phase() == ArenaPhase::Tutorial {
            assert_eq!(d.spawn_tier(), 1);
            finish_sub_level(&mut d);
        }
        for round in 1..=3 {
            assert_eq!(d.sub_level(), round);
            assert_eq!(d.spawn_tier(), round);
            finish_sub_level(&mut d);
        }
        assert_eq!(d.phase(), ArenaPhase::Obstacles);
        assert!(d.obstacles_enabled());
        assert_eq!(d.item_cap(), 2);
    }

    #[test]
    fn test_free_phase_alternates_and_ramps() {
        let mut d = PhaseDirector::new();
        while d.phase() != ArenaPhase::Free {
            finish_sub_level(&mut d);
        }
        assert_eq!(d.special_variant(), Some(EnemyVariant::Launcher));
        assert_eq!(d.special_cap(), 1);
        assert_eq!(d.total(), 10);

        finish_sub_level(&mut d);
        assert_eq!(d.iteration(), 2);
        assert_eq!(d.sub_level(), 2);
        assert_eq!(d.special_variant(), Some(EnemyVariant::Tank));
        assert_eq!(d.total(), 10);

        finish_sub_level(&mut d);
        assert_eq!(d.iteration(), 3);
        assert_eq!(d.sub_level(), 1);
        assert_eq!(d.total(), 11);
        assert_eq!(d.special_cap(), 2);
        assert!(d.name().ends_with("Rnd A"));
    }

    #[test]
    fn test_policy_values() {
        let d = PhaseDirector::new();
        assert_eq!(d.max_simultaneous_enemies(), 5);
        assert_eq!(d.item_cap(), 1);
        assert_eq!(d.special_cap(), 0);
        assert!(d.special_variant().is_none());
        assert!(!d.obstacles_enabled());
        assert_eq!(d.name(), "Phase 1: Tutorial (Lvl 1)");
    }

    #[test]
    fn test_spawn_quota() {
        let mut d = PhaseDirector::new();
        assert_eq!(d.enemies_to_spawn(), 3);
        assert!(d.take_spawn());
        assert!(d.take_spawn());
        assert!(d.take_spawn());
        assert!(!d.take_spawn());
        assert_eq!(d.enemies_to_spawn(), 0);
    }

    #[test]
    fn test_reset_restores_tutorial() {
        let mut d = PhaseDirector::new();
        for _ in 0..20 {
            d.on_enemy_killed();
        }
        assert_ne!(d.phase(), ArenaPhase::Tutorial);
        d.reset();
        assert_eq!(d.phase(), ArenaPhase::Tutorial);
        assert_eq!(d.sub_level(), 1);
        assert_eq!(d.kills(), 0);
        assert_eq!(d.enemies_to_spawn(), 3);
    }
}
