//! Tests for AggressionController.

#[cfg(test)]
mod tests {
    use super::super::controller::{AggressionController, AggressionState, Contact, HealthState};
    use super::super::intents::{move_towards, CueKind, EnemyIntent};
    use crate::components::{AnimatorParams, Enemy};
    use crate::config::{AggressionConfig, DamagePolicy};
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn cues(intents: &[EnemyIntent], kind: CueKind) -> usize {
        intents
            .iter()
            .filter(|intent| matches!(intent, EnemyIntent::PlayCue { cue, .. } if *cue == kind))
            .count()
    }

    /// Враг, который уже перешёл в AGGRESSIVE (spawn в 0, limit 1.0, тик в 1.5)
    fn aggressive_enemy(rng: &mut ChaCha8Rng) -> AggressionController {
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), rng)
            .with_aggression_timer_limit(1.0);
        enemy.tick(1.5, 0.016, Vec3::ZERO, None, rng);
        assert_eq!(enemy.aggression_state(), AggressionState::Aggressive);
        enemy
    }

    #[test]
    fn test_spawn_draws_within_ranges() {
        let config = AggressionConfig::default();

        for seed in 0..500 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let enemy = AggressionController::spawn(0.0, &config, &mut rng);

            assert!(config.pursue_rate.contains(enemy.pursue_rate()), "pursue_rate = {}", enemy.pursue_rate());
            assert!(config.aggression_delay.contains(enemy.aggression_timer_limit()));
            assert!(config.death_linger.contains(enemy.death_time_limit()));
            assert_eq!(enemy.health_state(), HealthState::Alive);
            assert_eq!(enemy.aggression_state(), AggressionState::Neutral);
            assert_eq!(enemy.health(), config.max_health);
        }
    }

    #[test]
    fn test_neutral_until_limit_then_aggressive() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng)
            .with_aggression_timer_limit(1.0);

        let intents = enemy.tick(0.5, 0.5, Vec3::ZERO, Some(Vec3::X), &mut rng);
        assert!(intents.is_empty());
        assert_eq!(enemy.aggression_state(), AggressionState::Neutral);

        let intents = enemy.tick(1.1, 0.6, Vec3::ZERO, Some(Vec3::X), &mut rng);
        assert_eq!(enemy.aggression_state(), AggressionState::Aggressive);
        assert_eq!(intents.len(), 1);
        assert_eq!(cues(&intents, CueKind::Aggression), 1);
    }

    #[test]
    fn test_exact_aggression_limit_stays_neutral() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng)
            .with_aggression_timer_limit(1.0);

        // Переход только при строгом превышении лимита
        let intents = enemy.tick(1.0, 0.5, Vec3::ZERO, Some(Vec3::X), &mut rng);
        assert!(intents.is_empty());
        assert_eq!(enemy.aggression_state(), AggressionState::Neutral);

        enemy.tick(1.25, 0.25, Vec3::ZERO, Some(Vec3::X), &mut rng);
        assert_eq!(enemy.aggression_state(), AggressionState::Aggressive);
    }

    #[test]
    fn test_aggression_transition_happens_once() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng)
            .with_aggression_timer_limit(2.0);

        let mut transitions = 0;
        let mut now = 0.0;
        for _ in 0..300 {
            now += 1.0 / 60.0;
            let intents = enemy.tick(now, 1.0 / 60.0, Vec3::ZERO, Some(Vec3::new(50.0, 0.0, 0.0)), &mut rng);
            transitions += cues(&intents, CueKind::Aggression);

            if now > 2.0 + 1.0 / 60.0 {
                // Инвариант: AGGRESSIVE не откатывается в NEUTRAL
                assert_eq!(enemy.aggression_state(), AggressionState::Aggressive);
            }
        }

        assert_eq!(transitions, 1);
    }

    #[test]
    fn test_pursuit_starts_on_next_tick() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng)
            .with_aggression_timer_limit(1.0);
        let target = Some(Vec3::new(0.0, 0.0, 10.0));

        let intents = enemy.tick(1.1, 0.1, Vec3::ZERO, target, &mut rng);
        assert!(!intents.iter().any(|i| matches!(i, EnemyIntent::MoveToward { .. })));

        let intents = enemy.tick(1.2, 0.1, Vec3::ZERO, target, &mut rng);
        assert!(matches!(intents[0], EnemyIntent::Pursue { facing } if (facing - Vec3::Z).length() < 1e-6));
        assert!(matches!(
            intents[1],
            EnemyIntent::MoveToward { max_distance, .. } if max_distance == enemy.pursue_rate()
        ));
    }

    #[test]
    fn test_move_toward_converges_without_overshoot() {
        let mut rng = rng();
        let mut enemy = aggressive_enemy(&mut rng);
        let target = Vec3::new(0.3, 0.0, -0.2);

        let mut position = Vec3::ZERO;
        let mut previous_distance = position.distance(target);
        let mut now = 1.5;

        for _ in 0..200 {
            now += 0.016;
            for intent in enemy.tick(now, 0.016, position, Some(target), &mut rng) {
                if let EnemyIntent::MoveToward { target, max_distance } = intent {
                    let next = move_towards(position, target, max_distance);
                    assert!(next.distance(position) <= enemy.pursue_rate() + 1e-6);
                    position = next;
                }
            }

            let distance = position.distance(target);
            // Монотонное сближение, без колебаний вокруг цели
            assert!(distance <= previous_distance + 1e-6);
            previous_distance = distance;
        }

        assert_eq!(position, target);
    }

    #[test]
    fn test_missing_target_holds_position() {
        let mut rng = rng();
        let mut enemy = aggressive_enemy(&mut rng);

        let intents = enemy.tick(2.0, 0.016, Vec3::ZERO, None, &mut rng);
        assert!(intents.is_empty());
        assert_eq!(enemy.aggression_state(), AggressionState::Aggressive);
    }

    #[test]
    fn test_lethal_damage_on_low_health() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng).with_health(1.0);
        let position = Vec3::new(2.0, 0.0, 0.0);
        let origin = Vec3::ZERO;

        let intents = enemy.receive_damage(3.0, 10.0, origin, position, &mut rng);

        assert_eq!(enemy.health_state(), HealthState::Dead);
        assert_eq!(enemy.health(), 0.0);
        assert_eq!(enemy.death_timer(), Some(3.0));
        assert_eq!(cues(&intents, CueKind::Death), 1);

        let impulses: Vec<_> = intents
            .iter()
            .filter_map(|intent| match intent {
                EnemyIntent::ApplyImpulse { direction, magnitude, at } => Some((*direction, *magnitude, *at)),
                _ => None,
            })
            .collect();
        assert_eq!(impulses.len(), 1);

        let (direction, magnitude, at) = impulses[0];
        assert!(direction.dot(position - origin) > 0.0, "impulse must push away from origin");
        assert!((direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(magnitude, 10.0);
        assert_eq!(at, origin);
        assert!(intents.contains(&EnemyIntent::Detag));
    }

    #[test]
    fn test_any_hit_is_lethal_by_default() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng);
        assert_eq!(enemy.health(), 100.0);

        enemy.receive_damage(0.5, 1.0, Vec3::ZERO, Vec3::X, &mut rng);
        assert_eq!(enemy.health_state(), HealthState::Dead);
        assert_eq!(enemy.health(), 0.0);
    }

    #[test]
    fn test_proportional_damage_policy() {
        let mut rng = rng();
        let config = AggressionConfig {
            damage_policy: DamagePolicy::Proportional,
            ..AggressionConfig::default()
        };
        let mut enemy = AggressionController::spawn(0.0, &config, &mut rng);

        let intents = enemy.receive_damage(1.0, 30.0, Vec3::ZERO, Vec3::X, &mut rng);
        assert_eq!(enemy.health(), 70.0);
        assert!(enemy.is_alive());
        assert_eq!(cues(&intents, CueKind::Hurt), 1);
        assert!(!intents.contains(&EnemyIntent::Detag));

        let intents = enemy.receive_damage(2.0, 80.0, Vec3::ZERO, Vec3::X, &mut rng);
        assert_eq!(enemy.health(), 0.0);
        assert_eq!(enemy.health_state(), HealthState::Dead);
        assert_eq!(cues(&intents, CueKind::Death), 1);
    }

    #[test]
    fn test_damage_after_death_is_noop() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng);

        enemy.receive_damage(1.0, 5.0, Vec3::ZERO, Vec3::X, &mut rng);
        let intents = enemy.receive_damage(1.5, 5.0, Vec3::ZERO, Vec3::X, &mut rng);

        assert!(intents.is_empty());
        assert_eq!(enemy.death_timer(), Some(1.0));
    }

    #[test]
    fn test_invalid_damage_is_ignored() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng);

        assert!(enemy.receive_damage(1.0, 0.0, Vec3::ZERO, Vec3::X, &mut rng).is_empty());
        assert!(enemy.receive_damage(1.0, -3.0, Vec3::ZERO, Vec3::X, &mut rng).is_empty());
        assert!(enemy.receive_damage(1.0, f32::NAN, Vec3::ZERO, Vec3::X, &mut rng).is_empty());
        assert!(enemy.is_alive());
    }

    #[test]
    fn test_despawn_fires_exactly_once() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng)
            .with_death_time_limit(3.0);

        enemy.receive_damage(1.0, 5.0, Vec3::ZERO, Vec3::X, &mut rng);

        let before = enemy.tick(1.0 + 3.0 - 0.01, 0.016, Vec3::X, None, &mut rng);
        assert!(!before.contains(&EnemyIntent::Despawn));

        let at = enemy.tick(1.0 + 3.0 + 0.01, 0.016, Vec3::X, None, &mut rng);
        assert_eq!(at, vec![EnemyIntent::Despawn]);
        assert!(enemy.is_removed());

        let after = enemy.tick(10.0, 0.016, Vec3::X, None, &mut rng);
        assert!(after.is_empty());
    }

    #[test]
    fn test_exact_death_limit_does_not_despawn() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng)
            .with_death_time_limit(3.0);

        enemy.receive_damage(1.0, 5.0, Vec3::ZERO, Vec3::X, &mut rng);

        let at_limit = enemy.tick(4.0, 0.25, Vec3::X, None, &mut rng);
        assert!(at_limit.is_empty());
        assert!(!enemy.is_removed());

        let past_limit = enemy.tick(4.25, 0.25, Vec3::X, None, &mut rng);
        assert_eq!(past_limit, vec![EnemyIntent::Despawn]);
    }

    #[test]
    fn test_dead_enemy_never_aggresses() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng)
            .with_aggression_timer_limit(1.0)
            .with_death_time_limit(100.0);

        enemy.receive_damage(0.1, 5.0, Vec3::ZERO, Vec3::X, &mut rng);
        let intents = enemy.tick(2.0, 0.016, Vec3::X, Some(Vec3::ZERO), &mut rng);

        assert!(intents.is_empty());
        assert_eq!(enemy.aggression_state(), AggressionState::Neutral);
    }

    #[test]
    fn test_contact_with_player_emits_attack_cue() {
        let mut rng = rng();
        let mut enemy = AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng);

        let intents = enemy.on_contact(Contact::Player, &mut rng);
        assert_eq!(cues(&intents, CueKind::Attack), 1);

        assert!(enemy.on_contact(Contact::Other, &mut rng).is_empty());

        enemy.receive_damage(1.0, 5.0, Vec3::ZERO, Vec3::X, &mut rng);
        assert!(enemy.on_contact(Contact::Player, &mut rng).is_empty());
    }

    #[test]
    fn test_animator_params_follow_state() {
        let mut rng = rng();
        let mut enemy = aggressive_enemy(&mut rng);
        let mut params = AnimatorParams::default();

        enemy.on_contact(Contact::Player, &mut rng);
        enemy.tick(2.0, 0.5, Vec3::ZERO, Some(Vec3::new(0.0, 0.0, 10.0)), &mut rng);
        enemy.write_animator(&mut params);

        assert!(params.attacking);
        assert!(!params.dead);
        assert!((params.forward_speed - enemy.pursue_rate() / 0.5).abs() < 1e-5);

        // attacking держится один тик
        enemy.tick(2.5, 0.5, Vec3::ZERO, Some(Vec3::new(0.0, 0.0, 10.0)), &mut rng);
        enemy.write_animator(&mut params);
        assert!(!params.attacking);

        enemy.receive_damage(3.0, 5.0, Vec3::ZERO, Vec3::X, &mut rng);
        enemy.write_animator(&mut params);
        assert!(params.dead);
        assert!(params.damaged);
        assert_eq!(params.forward_speed, 0.0);
    }

    #[test]
    fn test_turn_amount_tracks_facing_change() {
        let mut rng = rng();
        let mut enemy = aggressive_enemy(&mut rng);
        let mut params = AnimatorParams::default();

        enemy.tick(2.0, 0.1, Vec3::ZERO, Some(Vec3::new(0.0, 0.0, 10.0)), &mut rng);
        enemy.tick(2.1, 0.1, Vec3::ZERO, Some(Vec3::new(10.0, 0.0, 0.0)), &mut rng);
        enemy.write_animator(&mut params);

        assert!((params.turn_amount - std::f32::consts::FRAC_PI_2).abs() < 1e-5, "turn = {}", params.turn_amount);
    }

    #[test]
    fn test_enemy_component_is_reflectable() {
        use bevy::reflect::Struct;

        let mut rng = rng();
        let enemy = Enemy::new(AggressionController::spawn(0.0, &AggressionConfig::default(), &mut rng));

        let controller = enemy.field("controller").expect("controller field");
        assert!(controller.reflect_type_path().ends_with("AggressionController"));
    }
}
