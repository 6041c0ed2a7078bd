//! Aggression tick system (FSM шаг для всех врагов)

use bevy::prelude::*;

use crate::ai::{AggressionState, EnemyIntentEvent};
use crate::components::{AggressTarget, Enemy};
use crate::host::{Clock, TargetProvider};
use crate::DeterministicRng;

/// Система: один тик AggressionController на каждого врага
///
/// Цель резолвится через TargetProvider (Query<&Transform>):
/// despawned цель → None → враг стоит на месте.
/// Intents уходят в EnemyIntentEvent, executors исполняют их дальше по chain.
pub fn tick_enemies(
    mut enemies: Query<(Entity, &mut Enemy, &Transform, Option<&AggressTarget>)>,
    targets: Query<&Transform>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut intent_events: EventWriter<EnemyIntentEvent>,
) {
    let now = time.now();
    let delta = time.tick_delta();

    for (entity, mut enemy, transform, aggress_target) in enemies.iter_mut() {
        let target = aggress_target
            .and_then(|target| target.0)
            .and_then(|target| targets.target_position(target));

        let was_neutral = enemy.controller.aggression_state() == AggressionState::Neutral;
        let intents = enemy.controller.tick(now, delta, transform.translation, target, &mut rng.rng);

        if was_neutral && enemy.controller.aggression_state() == AggressionState::Aggressive {
            crate::log(&format!("⚔️ Enemy {:?} Neutral → Aggressive (t = {:.2})", entity, now));
        }

        for intent in intents {
            intent_events.write(EnemyIntentEvent { enemy: entity, intent });
        }
    }
}
