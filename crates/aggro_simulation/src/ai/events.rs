//! AI Events: вход от host (урон, коллизии) и выход для host (intents, cues)
//!
//! Host → ECS: DamageReceived, EnemyContact
//! ECS → executors/host: EnemyIntentEvent, CuePlayed, EnemyDied

use bevy::prelude::*;

use super::components::{CueKind, CueVariant, EnemyIntent};

/// Урон по entity (источник в мировой точке `origin`)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageReceived {
    pub target: Entity,
    pub amount: f32,
    pub origin: Vec3,
}

/// Коллизия врага с другим entity (начало контакта)
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyContact {
    pub enemy: Entity,
    pub other: Entity,
}

/// Intent конкретного врага (исполняется executors в том же тике)
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyIntentEvent {
    pub enemy: Entity,
    pub intent: EnemyIntent,
}

/// Cue прошёл через AudioGateway (host запускает клип)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CuePlayed {
    pub enemy: Entity,
    pub cue: CueKind,
    pub variant: CueVariant,
}

/// Враг умер (ALIVE → DEAD)
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDied {
    pub entity: Entity,
    /// Откуда пришёл летальный урон
    pub origin: Vec3,
}
