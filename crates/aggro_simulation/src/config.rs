//! Конфигурация врагов (spawn ranges, damage policy, cue weights)
//!
//! Defaults совпадают с исходными константами врага:
//! - pursue rate: [0.03, 0.06) м/тик
//! - aggression delay: [1.0, 5.0) сек
//! - death linger: [2.0, 4.0) сек
//!
//! Грузится из JSON (serde_json), перед использованием валидируется.

use std::path::Path;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки загрузки/валидации конфига
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("range `{name}` is invalid: min {min} must be finite, non-negative and below max {max}")]
    InvalidRange { name: &'static str, min: f32, max: f32 },

    #[error("max_health must be finite and positive, got {0}")]
    InvalidHealth(f32),

    #[error("cue weights must not all be zero")]
    EmptyCueWeights,

    #[error("cue weights sum overflows u32")]
    CueWeightsOverflow,

    #[error("facing_yaw_offset_degrees must be finite, got {0}")]
    InvalidYawOffset(f32),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Полуоткрытый диапазон [min, max) для per-instance рандомизации
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: f32,
    pub max: f32,
}

impl SpawnRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform draw из [min, max)
    ///
    /// Диапазон должен быть провалидирован; вырожденный диапазон отдаёт `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min < self.max {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value < self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        let valid = self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min < self.max;
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange { name, min: self.min, max: self.max })
        }
    }
}

/// Как ReceiveDamage уменьшает health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamagePolicy {
    /// Любой удар летален (наблюдаемое поведение исходного врага)
    #[default]
    LethalOnAnyHit,
    /// health -= amount, смерть только при health <= 0
    Proportional,
}

/// Веса исходов cue draw: три варианта клипа + "тишина"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueWeights {
    pub variants: [u32; 3],
    pub silent: u32,
}

impl Default for CueWeights {
    fn default() -> Self {
        // 4-way uniform draw, один исход молчит (25%)
        Self { variants: [1, 1, 1], silent: 1 }
    }
}

impl CueWeights {
    /// Сумма весов; None при переполнении u32
    pub fn total(&self) -> Option<u32> {
        self.variants
            .iter()
            .try_fold(self.silent, |sum, weight| sum.checked_add(*weight))
    }
}

/// Параметры архетипа врага
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggressionConfig {
    /// Стартовое здоровье
    pub max_health: f32,
    /// Дистанция сближения за тик в AGGRESSIVE
    pub pursue_rate: SpawnRange,
    /// Сколько секунд враг остаётся NEUTRAL после спавна
    pub aggression_delay: SpawnRange,
    /// Сколько секунд труп лежит до Despawn
    pub death_linger: SpawnRange,
    pub damage_policy: DamagePolicy,
    pub cue_weights: CueWeights,
    /// Сколько SFX можно запустить за один тик (на всю симуляцию)
    pub sfx_budget_per_tick: u32,
    /// Доворот модели после "face target" (градусы вокруг Y)
    pub facing_yaw_offset_degrees: f32,
}

impl Default for AggressionConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            pursue_rate: SpawnRange::new(0.03, 0.06),
            aggression_delay: SpawnRange::new(1.0, 5.0),
            death_linger: SpawnRange::new(2.0, 4.0),
            damage_policy: DamagePolicy::LethalOnAnyHit,
            cue_weights: CueWeights::default(),
            sfx_budget_per_tick: 8,
            facing_yaw_offset_degrees: 90.0,
        }
    }
}

impl AggressionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_health.is_finite() || self.max_health <= 0.0 {
            return Err(ConfigError::InvalidHealth(self.max_health));
        }

        self.pursue_rate.validate("pursue_rate")?;
        self.aggression_delay.validate("aggression_delay")?;
        self.death_linger.validate("death_linger")?;

        match self.cue_weights.total() {
            None => return Err(ConfigError::CueWeightsOverflow),
            Some(0) => return Err(ConfigError::EmptyCueWeights),
            Some(_) => {}
        }

        if !self.facing_yaw_offset_degrees.is_finite() {
            return Err(ConfigError::InvalidYawOffset(self.facing_yaw_offset_degrees));
        }

        Ok(())
    }

    /// Парсинг + валидация. Отсутствующие поля берутся из Default.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
