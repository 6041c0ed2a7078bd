//! Host contracts: всё, что контроллер/executors берут у движка
//!
//! HYBRID ARCHITECTURE:
//! - Simulation = FSM, таймеры, random draws, intents
//! - Host = физика, рендер, аудио, animation blending
//!
//! Здесь только интерфейсы + headless реализации поверх Bevy/Rapier компонентов.

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;

pub mod audio;
pub mod spatial;

pub use audio::{AudioGateway, SfxBudget};
pub use spatial::{EnemyBody, SpatialHandle};

/// Монотонное время симуляции
pub trait Clock {
    /// Секунды с начала симуляции
    fn now(&self) -> f32;
    /// Длительность текущего тика (секунды)
    fn tick_delta(&self) -> f32;
}

impl<T: Default> Clock for Time<T> {
    fn now(&self) -> f32 {
        self.elapsed_secs()
    }

    fn tick_delta(&self) -> f32 {
        self.delta_secs()
    }
}

/// Ручные часы для тестов и внешних host loop'ов
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f32,
    delta: f32,
}

impl ManualClock {
    pub fn new(now: f32) -> Self {
        Self { now, delta: 0.0 }
    }

    pub fn advance(&mut self, delta: f32) {
        self.delta = delta;
        self.now += delta;
    }

    /// Прыжок в абсолютное время (delta = разница)
    pub fn set(&mut self, now: f32) {
        self.delta = (now - self.now).max(0.0);
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f32 {
        self.now
    }

    fn tick_delta(&self) -> f32 {
        self.delta
    }
}

/// Резолвит non-owning ссылку на цель в позицию
///
/// None → цель уничтожена или без Transform (враг стоит на месте).
pub trait TargetProvider {
    fn target_position(&self, target: Entity) -> Option<Vec3>;
}

impl<F: QueryFilter> TargetProvider for Query<'_, '_, &Transform, F> {
    fn target_position(&self, target: Entity) -> Option<Vec3> {
        self.get(target).ok().map(|transform| transform.translation)
    }
}

/// Float параметры animator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorFloat {
    ForwardSpeed,
    TurnAmount,
}

/// Bool параметры animator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorFlag {
    Damaged,
    Dead,
    Attacking,
}

/// Приёмник animator параметров (blending: на стороне host)
pub trait AnimatorSink {
    fn set_float(&mut self, param: AnimatorFloat, value: f32);
    fn set_flag(&mut self, param: AnimatorFlag, value: bool);
}
