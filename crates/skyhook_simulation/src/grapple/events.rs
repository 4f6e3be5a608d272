//! События grapple-домена (seam симуляция ↔ движок)
//!
//! Joint, particles и haptics живут в движке: симуляция шлёт команды
//! событиями, адаптер исполняет. Обратного канала нет — joint-состояние,
//! нужное симуляции (лимит каната), дублируется в HookState.

use bevy::prelude::*;

use crate::components::Side;

/// Крюк зацепился за точку
#[derive(Event, Debug, Clone)]
pub struct HookAttached {
    pub side: Side,
    /// World-space точка зацепа
    pub point: Vec3,
    /// Дистанция waist→точка в момент зацепа
    pub distance: f32,
    /// Зацеп через aim-assist маркер
    pub assisted: bool,
}

/// Крюк отпущен (канат уходит в retraction)
#[derive(Event, Debug, Clone)]
pub struct HookReleased {
    pub side: Side,
}

/// Команда joint-сервису движка
#[derive(Event, Debug, Clone)]
pub struct JointCommand {
    pub side: Side,
    pub op: JointOp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JointOp {
    /// Создать distance-limited constraint игрок↔anchor
    Create { anchor: Vec3, limit: f32 },
    /// Обновить лимит дистанции
    SetLimit { limit: f32 },
    /// Разрушить constraint
    Destroy,
}

/// Cue spark-эффекта руки (particle system адаптера)
#[derive(Event, Debug, Clone)]
pub struct SparkCue {
    pub side: Side,
    /// Позиция эффекта (waist anchor)
    pub position: Vec3,
    pub action: SparkAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparkAction {
    LoopStart,
    LoopStop,
}
