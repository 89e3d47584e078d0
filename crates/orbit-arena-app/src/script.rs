//! Scripted input for headless demo runs.

use glam::Vec2;

use orbit_arena_core::commands::PlayerCommand;

/// Strafes around the arena centre: the intent is always tangent to a circle,
/// with a slow radial wobble so the player sweeps different rings.
#[derive(Debug, Clone, Copy)]
pub struct CircleStrafe {
    pub slot: u8,
    /// Full turns per second of the intent direction.
    pub turn_rate: f32,
    /// Radial wobble amplitude, 0 keeps a pure circle.
    pub wobble: f32,
}

impl Default for CircleStrafe {
    fn default() -> Self {
        Self {
            slot: 1,
            turn_rate: 0.25,
            wobble: 0.3,
        }
    }
}

impl CircleStrafe {
    /// Unit-length (or zero) intent at `elapsed_secs` into the run.
    pub fn intent_at(&self, elapsed_secs: f32) -> Vec2 {
        let angle = elapsed_secs * self.turn_rate * std::f32::consts::TAU;
        let tangent = Vec2::new(-angle.sin(), angle.cos());
        let radial = Vec2::new(angle.cos(), angle.sin());
        let sway = (elapsed_secs * 0.5).sin() * self.wobble;
        (tangent + radial * sway).normalize_or_zero()
    }

    pub fn command_at(&self, elapsed_secs: f32) -> PlayerCommand {
        let intent = self.intent_at(elapsed_secs);
        PlayerCommand::SetIntent {
            slot: self.slot,
            x: intent.x,
            y: intent.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_is_unit_length() {
        let strafe = CircleStrafe::default();
        for i in 0..100 {
            let intent = strafe.intent_at(i as f32 * 0.37);
            assert!((intent.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_pure_circle_is_tangent() {
        let strafe = CircleStrafe {
            wobble: 0.0,
            ..CircleStrafe::default()
        };
        // Quarter turn at 0.25 turns/s takes 1 second.
        let intent = strafe.intent_at(1.0);
        assert!((intent - Vec2::new(-1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_command_targets_slot() {
        let strafe = CircleStrafe {
            slot: 3,
            ..CircleStrafe::default()
        };
        let cmd = strafe.command_at(2.0);
        assert!(cmd.validate().is_ok());
        assert!(matches!(cmd, PlayerCommand::SetIntent { slot: 3, .. }));
    }
}
