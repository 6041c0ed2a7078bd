//! Intents: что контроллер просит сделать host'а
//!
//! Контроллер ничего не двигает и не играет сам: он возвращает список intents,
//! а ECS executors (или внешний host) их исполняют.

use bevy::prelude::*;
use rand::Rng;

use crate::config::CueWeights;

/// Какое событие озвучивается
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum CueKind {
    /// NEUTRAL → AGGRESSIVE
    Aggression,
    /// Контакт с игроком
    Attack,
    /// Несмертельный удар (только DamagePolicy::Proportional)
    Hurt,
    Death,
}

/// Индекс клипа внутри набора cue (0..3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct CueVariant(pub u8);

/// Исход cue draw: конкретный вариант или явная "тишина"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum CueOutcome {
    Play(CueVariant),
    Silent,
}

impl CueOutcome {
    pub fn is_silent(&self) -> bool {
        matches!(self, CueOutcome::Silent)
    }
}

/// Weighted outcome set для cue draw
///
/// Исходы: variant 0, 1, 2, silent. Веса из `CueWeights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct CueTable {
    weights: [u32; 4],
}

impl Default for CueTable {
    fn default() -> Self {
        Self::from(CueWeights::default())
    }
}

impl From<CueWeights> for CueTable {
    fn from(weights: CueWeights) -> Self {
        let [a, b, c] = weights.variants;
        Self { weights: [a, b, c, weights.silent] }
    }
}

impl CueTable {
    /// Один draw. Нулевая сумма весов (невалидный конфиг) всегда молчит.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> CueOutcome {
        // u64: сумма четырёх u32 не переполняется
        let total: u64 = self.weights.iter().map(|&weight| u64::from(weight)).sum();
        if total == 0 {
            return CueOutcome::Silent;
        }

        let mut roll = rng.gen_range(0..total);
        for (index, &weight) in self.weights.iter().enumerate() {
            let weight = u64::from(weight);
            if roll < weight {
                return match index {
                    0..=2 => CueOutcome::Play(CueVariant(index as u8)),
                    _ => CueOutcome::Silent,
                };
            }
            roll -= weight;
        }

        CueOutcome::Silent
    }
}

/// Intent от AggressionController
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum EnemyIntent {
    /// Развернуться по направлению к цели (normalized)
    Pursue { facing: Vec3 },

    /// Сдвинуться к `target` не дальше `max_distance` (без overshoot)
    MoveToward { target: Vec3, max_distance: f32 },

    /// Озвучить событие (Silent тоже эмитится, host его пропускает)
    PlayCue { cue: CueKind, outcome: CueOutcome },

    /// Физический импульс: direction * magnitude в точке `at`
    ApplyImpulse { direction: Vec3, magnitude: f32, at: Vec3 },

    /// Враг больше не цель для коллизий/урона
    Detag,

    /// Терминальный intent: host удаляет инстанс
    Despawn,
}

/// Vector3.MoveTowards: шаг к `target` длиной ≤ `max_distance`, без overshoot
pub fn move_towards(current: Vec3, target: Vec3, max_distance: f32) -> Vec3 {
    let to_target = target - current;
    let distance = to_target.length();

    if distance <= max_distance || distance <= f32::EPSILON {
        target
    } else {
        current + to_target / distance * max_distance
    }
}
