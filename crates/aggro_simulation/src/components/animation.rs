//! AnimatorParams: параметры для animation blending на стороне host

use bevy::prelude::*;

use crate::host::{AnimatorFlag, AnimatorFloat, AnimatorSink};

/// Последние выставленные animator параметры
///
/// Обновляется раз в тик (`sync_animator_params`), host читает и блендит сам.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimatorParams {
    pub forward_speed: f32,
    pub turn_amount: f32,
    pub damaged: bool,
    pub dead: bool,
    pub attacking: bool,
}

impl AnimatorSink for AnimatorParams {
    fn set_float(&mut self, param: AnimatorFloat, value: f32) {
        match param {
            AnimatorFloat::ForwardSpeed => self.forward_speed = value,
            AnimatorFloat::TurnAmount => self.turn_amount = value,
        }
    }

    fn set_flag(&mut self, param: AnimatorFlag, value: bool) {
        match param {
            AnimatorFlag::Damaged => self.damaged = value,
            AnimatorFlag::Dead => self.dead = value,
            AnimatorFlag::Attacking => self.attacking = value,
        }
    }
}
