//! Aggro Simulation Core
//!
//! Headless ECS-симуляция вражеской агрессии на Bevy 0.16.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = FSM, таймеры, random draws, intents (этот crate)
//! - Host = физика, рендер, аудио, animation blending (через host contracts)

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod components;
pub mod config;
pub mod host;
pub mod logger;
pub mod spawn;

// Re-export базовых типов для удобства
pub use ai::{
    AggressionController, AggressionPlugin, AggressionState, Contact, CueKind, CueOutcome, CuePlayed, CueVariant,
    DamageReceived, EnemyContact, EnemyDied, EnemyIntent, EnemyIntentEvent, HealthState,
};
pub use components::*;
pub use config::{AggressionConfig, ConfigError, DamagePolicy, SpawnRange};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use spawn::{spawn_enemy, spawn_player};

/// Частота simulation tick (pursue rate задан в метрах за тик)
pub const TICK_HZ: f64 = 60.0;

/// Главный plugin симуляции
///
/// RNG и fixed timestep вставляются только если host не вставил свои.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .add_plugins(AggressionPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время шагает вручную: один `app.update()` = ровно один FixedUpdate тик.
pub fn create_headless_app(seed: u64) -> App {
    init_logger();

    let fixed = Time::<Fixed>::from_hz(TICK_HZ);
    let timestep = fixed.timestep();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(fixed)
        .insert_resource(TimeUpdateStrategy::ManualDuration(timestep));

    app
}

/// Snapshot компонентов мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
