//! Компоненты руки: Side, HandPose, HandInput, HookState

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Сторона руки (левая/правая)
///
/// Обе руки проходят через одни и те же системы; side-специфичные знаки
/// (lateral boost bias, waist offset) берутся из методов ниже.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Знак бокового смещения boost-направления (left = +right axis)
    pub fn lateral_sign(&self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    /// Знак смещения waist anchor от центра тела (left = минус)
    pub fn waist_sign(&self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Порядок обработки рук внутри тика (left → right, детерминизм)
    pub fn order(&self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Маркер руки-контроллера
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hand {
    pub side: Side,
}

/// Pose контроллера (world space)
///
/// Заполняется адаптером из XR tracking каждый тик.
/// Для headless тестов — выставляется напрямую.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HandPose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Default for HandPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        }
    }
}

/// Входы руки за текущий тик
///
/// Edge-флаги (`*_pressed` / `*_released`) действуют один тик и сбрасываются
/// в конце цепочки систем. Held-флаги адаптер держит сам.
/// Для headless тестов — mock input через этот компонент.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct HandInput {
    /// Trigger нажат в этом тике (выстрел крюка)
    pub trigger_pressed: bool,
    /// Trigger отпущен в этом тике (release крюка)
    pub trigger_released: bool,
    /// Grip удерживается (подтягивание к grapple point)
    pub pull_held: bool,
    /// Swing удерживается (маятниковое ускорение)
    pub swing_held: bool,
    /// Boost нажат в этом тике (кандидат double-tap)
    pub boost_pressed: bool,
    /// Boost удерживается (непрерывный расход метра)
    pub boost_held: bool,
}

impl HandInput {
    /// Сброс edge-флагов в конце тика (held-флаги не трогаем)
    pub fn clear_edges(&mut self) {
        self.trigger_pressed = false;
        self.trigger_released = false;
        self.boost_pressed = false;
    }
}

/// Точка на поясе, из которой рисуется канат
///
/// Пересчитывается каждый тик из head pose (см. `aim::update_waist_anchors`).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct WaistAnchor {
    pub position: Vec3,
}

/// State machine крюка (per hand)
///
/// Tagged enum вместо независимых булевых флагов: взаимоисключение
/// {Idle, Attached, Retracting} гарантируется структурно.
///
/// Переходы:
/// - Idle/Retracting → Attached: trigger + валидная цель дальше min_grapple_distance
/// - Attached → Retracting: trigger отпущен
/// - Retracting → Idle: автоматически через retraction_time
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum HookState {
    /// Крюк не выпущен
    #[default]
    Idle,

    /// Крюк зацеплен за grapple point
    Attached {
        /// World-space точка зацепа
        grapple_point: Vec3,
        /// Дистанция waist→point в момент зацепа (для tension-подсветки)
        original_distance: f32,
        /// Текущий лимит каната (distance limit внешнего joint)
        rope_limit: f32,
    },

    /// Канат визуально сматывается после release
    Retracting {
        /// Точка, от которой сматываемся
        grapple_point: Vec3,
        /// Накопленное время retraction (секунды)
        timer: f32,
    },
}

impl HookState {
    pub fn is_attached(&self) -> bool {
        matches!(self, HookState::Attached { .. })
    }

    pub fn is_retracting(&self) -> bool {
        matches!(self, HookState::Retracting { .. })
    }

    /// Grapple point, если крюк зацеплен
    pub fn grapple_point(&self) -> Option<Vec3> {
        match self {
            HookState::Attached { grapple_point, .. } => Some(*grapple_point),
            _ => None,
        }
    }
}
