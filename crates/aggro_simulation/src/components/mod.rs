//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: враг, игрок, targetability, цель преследования
//! - animation: animator параметры для host blending

pub mod actor;
pub mod animation;

// Re-exports для удобного импорта
pub use actor::*;
pub use animation::*;
