//! Spawn helpers (враги + игрок)
//!
//! Spawn draws берутся из общего DeterministicRng → одинаковый seed даёт
//! одинаковых врагов.

use bevy::prelude::*;
use bevy_rapier3d::prelude::LockedAxes;

use crate::ai::AggressionController;
use crate::components::{AggressTarget, Enemy, Player, Targetable};
use crate::config::AggressionConfig;
use crate::DeterministicRng;

/// Spawn врага в `position` с целью `target`
///
/// Время спавна = elapsed Time<Fixed> (таймер агрессии стартует отсюда).
/// Вращение залочено до смерти (ApplyImpulse снимает lock).
pub fn spawn_enemy(world: &mut World, position: Vec3, target: Option<Entity>) -> Entity {
    let now = world
        .get_resource::<Time<Fixed>>()
        .map(|time| time.elapsed_secs())
        .unwrap_or(0.0);
    let config = world
        .get_resource::<AggressionConfig>()
        .cloned()
        .unwrap_or_default();

    let controller = {
        let mut rng = world.get_resource_or_insert_with(|| DeterministicRng::new(0));
        AggressionController::spawn(now, &config, &mut rng.rng)
    };

    let entity = world
        .spawn((
            Enemy::new(controller),
            Transform::from_translation(position),
            AggressTarget(target),
            LockedAxes::ROTATION_LOCKED,
        ))
        .id();

    crate::log(&format!("👾 Spawned enemy {:?} at {:?} (t = {:.2})", entity, position, now));
    entity
}

/// Spawn игрока (цель для врагов, capability для attack cue)
pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((Player, Targetable, Transform::from_translation(position)))
        .id()
}
