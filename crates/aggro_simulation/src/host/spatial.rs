//! SpatialHandle: позиция/ориентация врага + физический импульс
//!
//! Headless реализация: Transform двигаем напрямую, импульс копим
//! в rapier `ExternalImpulse` (solver применит его, если подключён).

use bevy::prelude::*;
use bevy_rapier3d::prelude::ExternalImpulse;

use crate::ai::move_towards;

pub trait SpatialHandle {
    fn position(&self) -> Vec3;
    /// Развернуться к точке
    fn face_point(&mut self, point: Vec3);
    /// Сдвинуться к точке не дальше `max_distance`
    fn move_toward(&mut self, point: Vec3, max_distance: f32);
    /// Импульс в мировой точке `at_point`
    fn apply_impulse(&mut self, impulse: Vec3, at_point: Vec3);
}

/// Тело врага на один тик (borrow из query)
pub struct EnemyBody<'a> {
    pub transform: &'a mut Transform,
    pub impulse: &'a mut ExternalImpulse,
    /// Доворот модели вокруг Y после look_at (радианы)
    pub yaw_offset: f32,
}

impl SpatialHandle for EnemyBody<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn face_point(&mut self, point: Vec3) {
        if point.distance_squared(self.transform.translation) <= f32::EPSILON {
            return;
        }
        self.transform.look_at(point, Vec3::Y);
        self.transform.rotate_y(self.yaw_offset);
    }

    fn move_toward(&mut self, point: Vec3, max_distance: f32) {
        self.transform.translation = move_towards(self.transform.translation, point, max_distance);
    }

    fn apply_impulse(&mut self, impulse: Vec3, at_point: Vec3) {
        // AddForceAtPosition: off-center импульс даёт вращение
        let lever = at_point - self.transform.translation;
        self.impulse.impulse += impulse;
        self.impulse.torque_impulse += lever.cross(impulse);
    }
}
