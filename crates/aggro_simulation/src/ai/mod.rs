//! Enemy AI module
//!
//! AggressionController (pure FSM) + ECS системы вокруг него.
//! Контроллер эмитит intents, executors исполняют их через host contracts.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::*;

use crate::config::AggressionConfig;
use crate::host::SfxBudget;

/// Aggression Plugin
///
/// Регистрирует события и системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. reset_sfx_budget: новый SFX бюджет на тик
/// 2. handle_enemy_contacts: EnemyContact → attack cue
/// 3. apply_enemy_damage: DamageReceived → death/hurt intents
/// 4. tick_enemies: FSM шаг (aggression, pursuit, despawn timer)
/// 5. execute_spatial_intents: Pursue/MoveToward/ApplyImpulse
/// 6. execute_cue_intents: PlayCue → SfxBudget → CuePlayed
/// 7. execute_lifecycle_intents: Detag/Despawn
/// 8. sync_animator_params: AnimatorParams
pub struct AggressionPlugin;

impl Plugin for AggressionPlugin {
    fn build(&self, app: &mut App) {
        // Конфиг host мог вставить заранее; лимит SFX перечитывается каждый тик
        app.init_resource::<AggressionConfig>()
            .init_resource::<SfxBudget>()
            .add_event::<DamageReceived>()
            .add_event::<EnemyContact>()
            .add_event::<EnemyIntentEvent>()
            .add_event::<CuePlayed>()
            .add_event::<EnemyDied>();

        app.add_systems(
            FixedUpdate,
            (
                systems::reset_sfx_budget,
                systems::handle_enemy_contacts,
                systems::apply_enemy_damage,
                systems::tick_enemies,
                systems::execute_spatial_intents,
                systems::execute_cue_intents,
                systems::execute_lifecycle_intents,
                systems::sync_animator_params,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
    }
}
