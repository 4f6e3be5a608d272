//! Конфигурация симуляции: все numeric tunables в одном resource
//!
//! Симуляция не лезет в scene graph за параметрами — адаптер собирает
//! `SimulationConfig` и вставляет его при конструировании App. serde derive,
//! чтобы конфиг жил во внешнем файле и менялся без правки кода.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Параметры крюка и каната-joint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrappleConfig {
    /// Максимальная дальность raycast выстрела (метры)
    pub max_grapple_range: f32,
    /// Минимальная дистанция waist→цель для зацепа
    pub min_grapple_distance: f32,
    /// Пол лимита каната при подтягивании (метры)
    pub min_rope_limit: f32,
    /// Velocity-change импульс подтягивания (за тик)
    pub pull_boost_force: f32,
    /// Маятниковое ускорение при swing (m/s²)
    pub swing_force: f32,
    /// Длительность визуального retraction (секунды)
    pub retraction_time: f32,
    /// Длительность release-вспышки искр (секунды)
    pub release_spark_time: f32,
    /// Тег поверхности, за которую зацеп запрещён
    pub ungrappleable_tag: String,
    /// Вертикальное смещение пояса от головы (метры, вниз)
    pub waist_height_offset: f32,
    /// Боковое смещение waist anchor от центра (метры)
    pub waist_side_offset: f32,
}

impl Default for GrappleConfig {
    fn default() -> Self {
        Self {
            max_grapple_range: 100.0,
            min_grapple_distance: 2.0,
            min_rope_limit: 1.0,
            pull_boost_force: 0.3,
            swing_force: 10.0,
            retraction_time: 0.033,
            release_spark_time: 0.5,
            ungrappleable_tag: "NoGrapple".to_string(),
            waist_height_offset: -0.5,
            waist_side_offset: 0.3,
        }
    }
}

/// Параметры boost-дэшей
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostConfig {
    /// Ёмкость метра
    pub max_meter: f32,
    /// Начальное значение метра (зажимается в [0, max_meter])
    pub initial_meter: f32,
    /// Непрерывный импульс held-boost (velocity change за тик)
    pub boost_speed: f32,
    /// Расход метра held-boost (единиц/сек)
    pub drain_rate: f32,
    /// Боковое смещение направления boost (доля right-вектора)
    pub lateral_offset: f32,
    /// Вертикальный bias к grapple point над игроком
    pub upward_boost_factor: f32,
    /// Окно double-tap (секунды)
    pub double_tap_window: f32,
    /// Разовый расход double-tap
    pub double_tap_cost: f32,
    /// Импульс double-tap (velocity change)
    pub double_tap_force: f32,
    /// Angular drag: на земле / в воздухе с крюком / в воздухе без / без boost
    pub angular_drag_grounded: f32,
    pub angular_drag_attached: f32,
    pub angular_drag_airborne: f32,
    pub angular_drag_idle: f32,
    /// Дальность downward ground check (метры)
    pub ground_check_distance: f32,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            max_meter: 200.0,
            initial_meter: 200.0,
            boost_speed: 0.2,
            drain_rate: 5.0,
            lateral_offset: 0.7,
            upward_boost_factor: 0.1,
            double_tap_window: 0.5,
            double_tap_cost: 50.0,
            double_tap_force: 5.0,
            angular_drag_grounded: 5.0,
            angular_drag_attached: 5.0,
            angular_drag_airborne: 20.0,
            angular_drag_idle: 0.05,
            ground_check_distance: 0.1,
        }
    }
}

/// Параметры прицеливания / aim assist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimConfig {
    /// Дальность crosshair raycast (метры)
    pub max_aim_distance: f32,
    /// Порог стабилизации forward (градусы): меньше — переиспользуем прошлый
    pub stabilization_threshold_deg: f32,
    /// Радиус поиска assist-маркеров от контроллера (метры)
    pub assist_search_radius: f32,
    /// Полуугол конуса assist (градусы)
    pub assist_cone_half_angle_deg: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            max_aim_distance: 100.0,
            stabilization_threshold_deg: 0.01,
            assist_search_radius: 15.0,
            assist_cone_half_angle_deg: 10.0,
        }
    }
}

/// Параметры camera tilt feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiltConfig {
    /// Градусы крена на 1 m/s боковой скорости
    pub degrees_per_mps: f32,
    /// Максимальный крен (градусы)
    pub max_angle_deg: f32,
    /// Скорость сглаживания к целевому крену (1/сек)
    pub smoothing: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            degrees_per_mps: 1.2,
            max_angle_deg: 12.0,
            smoothing: 8.0,
        }
    }
}

/// Корневой конфиг симуляции (DI-struct, передаётся при конструировании)
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub grapple: GrappleConfig,
    pub boost: BoostConfig,
    pub aim: AimConfig,
    pub tilt: TiltConfig,
}

/// Состояние settings-меню (тогглы)
///
/// Меню-канвас и виджеты — на стороне адаптера; симуляция хранит состояние
/// и сама уважает crosshair/tilt тогглы. snap_turn и boost_gauge читает
/// только адаптер (turn provider и слайдеры — engine-glue).
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SettingsState {
    pub crosshair_enabled: bool,
    pub boost_gauge_enabled: bool,
    pub snap_turn: bool,
    pub tilt_enabled: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            crosshair_enabled: true,
            boost_gauge_enabled: true,
            snap_turn: true,
            tilt_enabled: true,
        }
    }
}
