//! Компоненты прицеливания: AssistMarker, AimSolution, Crosshair

use bevy::prelude::*;

/// Маркер aim assist на surface entity
///
/// Entity с этим компонентом + Transform участвует в cone-выборе цели.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AssistMarker;

/// Решение прицеливания руки за текущий тик
///
/// Вычисляется до обработки trigger (ordering-гарантия тика): выстрел
/// потребляет решение этого же тика, не прошлого.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AimSolution {
    /// Луч ни во что не попал (или рука attached — решение не считается)
    #[default]
    Hidden,

    /// Цель есть, но ближе min_grapple_distance (красный crosshair, зацеп запрещён)
    TooClose { point: Vec3, distance: f32 },

    /// Валидная цель (зелёный crosshair)
    Valid {
        point: Vec3,
        /// Дистанция от waist anchor (по ней же валидировался зацеп)
        distance: f32,
        /// Попали в aim-assist маркер, а не в сырой raycast hit
        assisted: bool,
    },
}

impl AimSolution {
    /// Точка зацепа, если выстрел разрешён
    pub fn attach_point(&self) -> Option<(Vec3, f32)> {
        match self {
            AimSolution::Valid { point, distance, .. } => Some((*point, *distance)),
            _ => None,
        }
    }
}

/// Crosshair руки: решение тика + стабилизированный forward
///
/// `visible` — только про рендер (settings toggle, attached-рука):
/// решение для зацепа считается независимо от видимости.
#[derive(Component, Debug, Clone, Default)]
pub struct Crosshair {
    pub solution: AimSolution,
    /// Рисовать ли crosshair адаптеру
    pub visible: bool,
    /// Последний forward (шумоподавление мелкого дрожания контроллера)
    pub last_forward: Vec3,
    /// Тег поверхности последнего hit (проверка ungrappleable при зацепе)
    pub surface_tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_point_only_when_valid() {
        assert!(AimSolution::Hidden.attach_point().is_none());
        assert!(AimSolution::TooClose {
            point: Vec3::ONE,
            distance: 1.0
        }
        .attach_point()
        .is_none());

        let valid = AimSolution::Valid {
            point: Vec3::new(0.0, 5.0, 0.0),
            distance: 5.0,
            assisted: false,
        };
        assert_eq!(valid.attach_point(), Some((Vec3::new(0.0, 5.0, 0.0), 5.0)));
    }
}
