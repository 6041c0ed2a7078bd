//! Enemy reaction systems (damage, contacts).

use bevy::prelude::*;

use crate::ai::{Contact, DamageReceived, EnemyContact, EnemyDied, EnemyIntentEvent};
use crate::components::{Enemy, Player, Targetable};
use crate::host::Clock;
use crate::DeterministicRng;

/// System: контакт врага с другим entity
///
/// Capability check вместо tag: атакуем только entity с компонентом Player.
pub fn handle_enemy_contacts(
    mut contact_events: EventReader<EnemyContact>,
    mut enemies: Query<&mut Enemy>,
    players: Query<(), With<Player>>,
    mut rng: ResMut<DeterministicRng>,
    mut intent_events: EventWriter<EnemyIntentEvent>,
) {
    for contact in contact_events.read() {
        let Ok(mut enemy) = enemies.get_mut(contact.enemy) else {
            continue;
        };

        let kind = if players.contains(contact.other) {
            Contact::Player
        } else {
            Contact::Other
        };

        for intent in enemy.controller.on_contact(kind, &mut rng.rng) {
            intent_events.write(EnemyIntentEvent { enemy: contact.enemy, intent });
        }
    }
}

/// System: применение урона к врагам
///
/// Detagged враги (без Targetable) урон не получают.
/// Повторный урон в том же тике (до Detag) гасит guard в контроллере.
pub fn apply_enemy_damage(
    mut damage_events: EventReader<DamageReceived>,
    mut enemies: Query<(&mut Enemy, &Transform), With<Targetable>>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut intent_events: EventWriter<EnemyIntentEvent>,
    mut died_events: EventWriter<EnemyDied>,
) {
    let now = time.now();

    for damage in damage_events.read() {
        let Ok((mut enemy, transform)) = enemies.get_mut(damage.target) else {
            continue;
        };

        let was_alive = enemy.controller.is_alive();
        let intents = enemy.controller.receive_damage(
            now,
            damage.amount,
            damage.origin,
            transform.translation,
            &mut rng.rng,
        );

        if was_alive && !enemy.controller.is_alive() {
            died_events.write(EnemyDied { entity: damage.target, origin: damage.origin });
            crate::log_info(&format!(
                "💀 Enemy {:?} killed ({} damage from {:?})",
                damage.target, damage.amount, damage.origin
            ));
        }

        for intent in intents {
            intent_events.write(EnemyIntentEvent { enemy: damage.target, intent });
        }
    }
}
