//! AudioGateway + SFX budget
//!
//! Host может отказать в проигрывании (бюджет SFX на тик исчерпан),
//! это нормальный flow, cue просто пропускается.

use bevy::prelude::*;

use crate::ai::{CueKind, CueVariant};

pub trait AudioGateway {
    /// Запустить клип `variant` из набора `cue`. false → host отказал.
    fn try_play_one_of(&mut self, cue: CueKind, variant: CueVariant) -> bool;
}

/// Сколько SFX можно запустить за тик (на всю симуляцию)
///
/// Сбрасывается в начале каждого FixedUpdate тика (`reset_sfx_budget`),
/// лимит при этом перечитывается из `AggressionConfig`.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SfxBudget {
    limit: u32,
    used: u32,
}

impl Default for SfxBudget {
    fn default() -> Self {
        Self::new(8)
    }
}

impl SfxBudget {
    pub fn new(limit: u32) -> Self {
        Self { limit, used: 0 }
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Новый тик: счётчик в ноль, лимит из актуального конфига
    pub fn reset(&mut self, limit: u32) {
        self.limit = limit;
        self.used = 0;
    }
}

impl AudioGateway for SfxBudget {
    fn try_play_one_of(&mut self, _cue: CueKind, _variant: CueVariant) -> bool {
        if self.used >= self.limit {
            return false;
        }
        self.used += 1;
        true
    }
}
