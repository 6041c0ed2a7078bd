//! Intent executors: исполнение EnemyIntent через host contracts
//!
//! Каждый executor читает EnemyIntentEvent своим reader'ом и берёт только
//! свои intents. Всё в одном FixedUpdate chain → intents исполняются в том же тике.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, LockedAxes};

use crate::ai::{CueOutcome, CuePlayed, EnemyIntent, EnemyIntentEvent};
use crate::components::{AnimatorParams, Enemy, Targetable};
use crate::config::AggressionConfig;
use crate::host::{AudioGateway, EnemyBody, SfxBudget, SpatialHandle};

/// Система: сброс SFX бюджета в начале тика
///
/// Лимит берётся из конфига каждый тик: host может заменить конфиг после старта.
pub fn reset_sfx_budget(mut budget: ResMut<SfxBudget>, config: Res<AggressionConfig>) {
    budget.reset(config.sfx_budget_per_tick);
}

/// Система: Pursue / MoveToward / ApplyImpulse → Transform + rapier компоненты
///
/// ApplyImpulse (смерть) также снимает LockedAxes: труп падает свободно.
pub fn execute_spatial_intents(
    mut intent_events: EventReader<EnemyIntentEvent>,
    mut bodies: Query<(&mut Transform, &mut ExternalImpulse, Option<&mut LockedAxes>), With<Enemy>>,
    config: Res<AggressionConfig>,
) {
    let yaw_offset = config.facing_yaw_offset_degrees.to_radians();

    for event in intent_events.read() {
        if !matches!(
            event.intent,
            EnemyIntent::Pursue { .. } | EnemyIntent::MoveToward { .. } | EnemyIntent::ApplyImpulse { .. }
        ) {
            continue;
        }

        let Ok((mut transform, mut impulse, locked_axes)) = bodies.get_mut(event.enemy) else {
            continue;
        };

        let mut body = EnemyBody {
            transform: &mut transform,
            impulse: &mut impulse,
            yaw_offset,
        };

        match event.intent {
            EnemyIntent::Pursue { facing } => {
                body.face_point(body.position() + facing);
            }
            EnemyIntent::MoveToward { target, max_distance } => {
                body.move_toward(target, max_distance);
            }
            EnemyIntent::ApplyImpulse { direction, magnitude, at } => {
                body.apply_impulse(direction * magnitude, at);
                if let Some(mut axes) = locked_axes {
                    *axes = LockedAxes::empty();
                }
            }
            _ => {}
        }
    }
}

/// Система: PlayCue → AudioGateway (SfxBudget) → CuePlayed
///
/// Silent исход и отказ бюджета: нормальный flow, просто пропускаем.
pub fn execute_cue_intents(
    mut intent_events: EventReader<EnemyIntentEvent>,
    mut budget: ResMut<SfxBudget>,
    mut played_events: EventWriter<CuePlayed>,
) {
    for event in intent_events.read() {
        let EnemyIntent::PlayCue { cue, outcome } = event.intent else {
            continue;
        };
        let CueOutcome::Play(variant) = outcome else {
            continue;
        };

        if budget.try_play_one_of(cue, variant) {
            played_events.write(CuePlayed { enemy: event.enemy, cue, variant });
        } else {
            crate::log(&format!("🔇 SFX budget exhausted, skipping {:?} cue for {:?}", cue, event.enemy));
        }
    }
}

/// Система: Detag / Despawn через Commands
pub fn execute_lifecycle_intents(
    mut commands: Commands,
    mut intent_events: EventReader<EnemyIntentEvent>,
) {
    for event in intent_events.read() {
        match event.intent {
            EnemyIntent::Detag => {
                if let Ok(mut entity_commands) = commands.get_entity(event.enemy) {
                    entity_commands.remove::<Targetable>();
                }
            }
            EnemyIntent::Despawn => {
                if let Ok(mut entity_commands) = commands.get_entity(event.enemy) {
                    entity_commands.despawn();
                    crate::log(&format!("⚰️ Despawning enemy {:?} (death timeout)", event.enemy));
                }
            }
            _ => {}
        }
    }
}

/// Система: animator параметры раз в тик
pub fn sync_animator_params(mut enemies: Query<(&Enemy, &mut AnimatorParams)>) {
    for (enemy, mut params) in enemies.iter_mut() {
        enemy.controller.write_animator(&mut *params);
    }
}
