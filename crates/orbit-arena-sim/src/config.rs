//! Configuration for starting a new simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use orbit_arena_core::constants::*;
use orbit_arena_core::ArenaError;

/// Tunables for one engine. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub arena_radius: f32,
    /// Frame deltas above this are clamped before the physics step.
    pub max_frame_dt: f32,
    /// Per-tick spawn probabilities.
    pub enemy_spawn_chance: f64,
    pub obstacle_spawn_chance: f64,
    pub item_spawn_chance: f64,
    pub max_obstacles: usize,
    pub player_move_speed: f32,
    /// Kills per automatic level-up (0 disables it).
    pub kills_per_level: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena_radius: ARENA_RADIUS,
            max_frame_dt: MAX_FRAME_DT,
            enemy_spawn_chance: ENEMY_SPAWN_CHANCE,
            obstacle_spawn_chance: OBSTACLE_SPAWN_CHANCE,
            item_spawn_chance: ITEM_SPAWN_CHANCE,
            max_obstacles: MAX_OBSTACLES,
            player_move_speed: PLAYER_MOVE_SPEED,
            kills_per_level: KILLS_PER_LEVEL,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ArenaError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArenaError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.arena_radius.is_nan() || self.arena_radius <= 0.0 {
            return Err(ArenaError::Config(format!(
                "arena_radius must be positive, got {}",
                self.arena_radius
            )));
        }
        if self.max_frame_dt.is_nan() || self.max_frame_dt <= 0.0 {
            return Err(ArenaError::Config(format!(
                "max_frame_dt must be positive, got {}",
                self.max_frame_dt
            )));
        }
        if self.player_move_speed.is_nan() || self.player_move_speed < 0.0 {
            return Err(ArenaError::Config(format!(
                "player_move_speed must not be negative, got {}",
                self.player_move_speed
            )));
        }
        for (name, chance) in [
            ("enemy_spawn_chance", self.enemy_spawn_chance),
            ("obstacle_spawn_chance", self.obstacle_spawn_chance),
            ("item_spawn_chance", self.item_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ArenaError::Config(format!(
                    "{name} must be within [0, 1], got {chance}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.arena_radius, 15.0);
        assert_eq!(config.kills_per_level, 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json_str(r#"{"seed": 7, "max_obstacles": 2}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_obstacles, 2);
        assert_eq!(config.max_frame_dt, MAX_FRAME_DT);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SimConfig::from_json_str(r#"{"arena_radius": 0.0}"#),
            Err(ArenaError::Config(_))
        ));
        assert!(SimConfig::from_json_str(r#"{"item_spawn_chance": 1.5}"#).is_err());
        assert!(SimConfig::from_json_str(r#"{"max_frame_dt": -1.0}"#).is_err());
        assert!(matches!(
            SimConfig::from_json_str("not json"),
            Err(ArenaError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = SimConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ArenaError::Io(_)));
    }
}
