#[cfg(test)]
mod tests {
    use glam::Vec2;
    use orbit_arena_core::constants::*;
    use orbit_arena_core::enums::EnemyVariant;

    use crate::fsm::{evaluate, select_target, EnemyContext};
    use crate::profiles::{get_profile, tier_move_speed, tier_orbit};

    fn make_context(variant: EnemyVariant, distance: f32, cooldown: f32) -> EnemyContext {
        // Enemy on the +x axis, target at the origin
        EnemyContext {
            variant,
            position: Vec2::new(distance, 0.0),
            target: Some(Vec2::ZERO),
            move_speed: 2.0,
            fire_cooldown: cooldown,
            dt: 0.1,
        }
    }

    #[test]
    fn test_tier_stat_table() {
        let t1 = tier_orbit(1);
        assert_eq!(t1.count, 1);
        assert!((t1.radius - 0.8).abs() < 1e-6);
        assert!((t1.speed - 1.5).abs() < 1e-6);

        let t3 = tier_orbit(3);
        assert_eq!(t3.count, 3);
        assert!((t3.radius - 1.6).abs() < 1e-6);
        assert!((t3.speed - 2.3).abs() < 1e-6);

        assert!((tier_move_speed(1) - 1.5).abs() < 1e-6);
        assert!((tier_move_speed(3) - 2.9).abs() < 1e-6);
        // Tier 0 is treated as tier 1
        assert_eq!(tier_orbit(0), t1);
    }

    #[test]
    fn test_variant_profiles() {
        let launcher = get_profile(EnemyVariant::Launcher, 1);
        assert_eq!(launcher.orbit.count, 1, "launcher keeps at least one weapon");
        assert_eq!(get_profile(EnemyVariant::Launcher, 3).orbit.count, 2);
        assert_eq!(launcher.fire_interval, Some(LAUNCHER_FIRE_INTERVAL_SECS));

        let tank = get_profile(EnemyVariant::Tank, 3);
        assert_eq!(tank.orbit.count, 5);
        assert!((tank.orbit.radius - 2.0).abs() < 1e-6);
        assert!((tank.move_speed - tier_move_speed(3) * TANK_SPEED_FACTOR).abs() < 1e-6);
        assert!(tank.fire_interval.is_none());
    }

    #[test]
    fn test_raso_chases_target() {
        let ctx = make_context(EnemyVariant::Raso, 10.0, 0.0);
        let out = evaluate(&ctx, &get_profile(EnemyVariant::Raso, 1));
        assert!(out.velocity.x < 0.0, "should move toward the origin");
        assert!((out.velocity.length() - 2.0).abs() < 1e-5);
        assert!(out.fire.is_none());
    }

    #[test]
    fn test_raso_stops_on_arrival() {
        let ctx = make_context(EnemyVariant::Raso, 0.05, 0.0);
        let out = evaluate(&ctx, &get_profile(EnemyVariant::Raso, 1));
        assert_eq!(out.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_no_target_means_idle() {
        let mut ctx = make_context(EnemyVariant::Launcher, 10.0, 0.0);
        ctx.target = None;
        let out = evaluate(&ctx, &get_profile(EnemyVariant::Launcher, 1));
        assert_eq!(out.velocity, Vec2::ZERO);
        assert!(out.fire.is_none());
    }

    #[test]
    fn test_launcher_keeps_distance() {
        let profile = get_profile(EnemyVariant::Launcher, 2);

        let far = evaluate(&make_context(EnemyVariant::Launcher, 12.0, 1.0), &profile);
        assert!(far.velocity.x < 0.0, "approach when too far");

        let close = evaluate(&make_context(EnemyVariant::Launcher, 3.0, 1.0), &profile);
        assert!(close.velocity.x > 0.0, "retreat when too close");

        let held = evaluate(&make_context(EnemyVariant::Launcher, 6.0, 1.0), &profile);
        assert_eq!(held.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_launcher_fire_cadence() {
        let profile = get_profile(EnemyVariant::Launcher, 2);

        let waiting = evaluate(&make_context(EnemyVariant::Launcher, 6.0, 1.0), &profile);
        assert!(waiting.fire.is_none());
        assert!((waiting.fire_cooldown - 0.9).abs() < 1e-5);

        let ready = evaluate(&make_context(EnemyVariant::Launcher, 6.0, 0.05), &profile);
        let dir = ready.fire.expect("cooldown elapsed, should fire");
        assert!((dir - Vec2::new(-1.0, 0.0)).length() < 1e-5);
        assert_eq!(ready.fire_cooldown, LAUNCHER_FIRE_INTERVAL_SECS);
    }

    #[test]
    fn test_select_nearest_target() {
        let from = Vec2::new(0.0, 0.0);
        let picked = select_target(
            from,
            [Vec2::new(5.0, 0.0), Vec2::new(0.0, 2.0), Vec2::new(-3.0, 0.0)],
        );
        assert_eq!(picked, Some(Vec2::new(0.0, 2.0)));
        assert_eq!(select_target(from, std::iter::empty()), None);
    }
}
