//! Компоненты акторов: Enemy, Player, Targetable, AggressTarget

use bevy::prelude::*;
use bevy_rapier3d::prelude::ExternalImpulse;

use super::animation::AnimatorParams;
use crate::ai::AggressionController;

/// Враг с aggression FSM
///
/// Автоматически добавляет Targetable, AnimatorParams, ExternalImpulse через Required Components.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Targetable, AnimatorParams, ExternalImpulse)]
pub struct Enemy {
    pub controller: AggressionController,
}

impl Enemy {
    pub fn new(controller: AggressionController) -> Self {
        Self { controller }
    }
}

/// Маркер: игрок (capability для "атаковать при контакте")
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Маркер: entity можно бить
///
/// Снимается Detag intent'ом при смерти врага.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Targetable;

/// Non-owning ссылка на цель преследования
///
/// Цель может быть despawned независимо: тогда враг стоит на месте.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AggressTarget(pub Option<Entity>);
