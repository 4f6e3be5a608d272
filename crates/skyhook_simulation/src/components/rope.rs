//! Компоненты каната: Rope (tunables + spring state), RopePath (выход для line service)

use bevy::prelude::*;

/// Кривая, взвешивающая волну вдоль каната (аналог AnimationCurve)
///
/// delta ∈ [0,1] → множитель [0,1]. Default — константа 1 (волна по всей длине).
#[derive(Debug, Clone, Default)]
pub enum AffectCurve {
    /// Волна без ослабления
    #[default]
    Constant,
    /// Piecewise-linear по ключам (t, value); ключи отсортированы по t
    Keyframes(Vec<(f32, f32)>),
}

impl AffectCurve {
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            AffectCurve::Constant => 1.0,
            AffectCurve::Keyframes(keys) => {
                if keys.is_empty() {
                    return 1.0;
                }
                let t = t.clamp(0.0, 1.0);
                if t <= keys[0].0 {
                    return keys[0].1;
                }
                for pair in keys.windows(2) {
                    let (t0, v0) = pair[0];
                    let (t1, v1) = pair[1];
                    if t <= t1 {
                        let span = (t1 - t0).max(f32::EPSILON);
                        return v0 + (v1 - v0) * ((t - t0) / span);
                    }
                }
                keys[keys.len() - 1].1
            }
        }
    }
}

/// Канат одной руки: tunables + runtime spring state
///
/// Tunables соответствуют визуальной модели "sag/wave": spring-damper
/// интегрирует один скаляр, которым взвешивается синусоида вдоль каната.
#[derive(Component, Debug, Clone)]
pub struct Rope {
    /// Число сегментов: рисуется quality+1 точек
    pub quality: u32,
    /// Damping коэффициент spring-damper
    pub damper: f32,
    /// Жёсткость spring-damper
    pub strength: f32,
    /// Начальная скорость spring в момент зацепа (волна "выстрела")
    pub velocity: f32,
    /// Число полуволн синусоиды вдоль каната
    pub wave_count: f32,
    /// Амплитуда волны (метры)
    pub wave_height: f32,
    /// Скорость догоняния true grapple point (1/сек)
    pub follow_rate: f32,
    /// Весовая кривая волны вдоль каната
    pub affect_curve: AffectCurve,

    // --- runtime state, сбрасывается при detach ---
    /// Текущее значение spring ∈ [-1,1]
    pub spring_value: f32,
    /// Текущая скорость spring
    pub spring_velocity: f32,
    /// Рисуемая grapple-позиция (лерпится к настоящей, чтобы не было snap)
    pub drawn_grapple: Vec3,
}

impl Default for Rope {
    fn default() -> Self {
        Self {
            quality: 20,
            damper: 0.7,
            strength: 10.0,
            velocity: 5.0,
            wave_count: 2.0,
            wave_height: 0.1,
            follow_rate: 12.0,
            affect_curve: AffectCurve::default(),
            spring_value: 0.0,
            spring_velocity: 0.0,
            drawn_grapple: Vec3::ZERO,
        }
    }
}

impl Rope {
    /// Сброс runtime state (detach / idle)
    pub fn reset(&mut self, anchor: Vec3) {
        self.spring_value = 0.0;
        self.spring_velocity = 0.0;
        self.drawn_grapple = anchor;
    }
}

/// Упорядоченные точки каната + tension-подсветка
///
/// Выход симуляции для line service адаптера: пустой `points` — канат не
/// рисуется; `heat` ∈ [0,1] — интерполяция базового цвета к "горячему"
/// (white → red при подтягивании).
#[derive(Component, Debug, Clone, Default)]
pub struct RopePath {
    pub points: Vec<Vec3>,
    pub heat: f32,
}

impl RopePath {
    pub fn clear(&mut self) {
        self.points.clear();
        self.heat = 0.0;
    }

    pub fn is_visible(&self) -> bool {
        !self.points.is_empty()
    }
}
