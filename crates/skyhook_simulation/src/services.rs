//! Внешние коллабораторы симуляции
//!
//! Симуляция не знает движка: raycast по сцене инжектится как trait object
//! resource. Joint, line renderer и particles идут через события/компоненты
//! (см. grapple::events, components::rope) — синхронный ответ нужен только
//! raycast'у, потому он единственный оформлен сервисом.

use bevy::prelude::*;

/// Результат raycast по сцене
#[derive(Debug, Clone, PartialEq)]
pub struct RaycastHit {
    pub point: Vec3,
    /// Тег поверхности ("NoGrapple" запрещает зацеп)
    pub surface_tag: Option<String>,
}

/// Raycast-коллаборатор: движок отвечает на лучи симуляции
pub trait SceneRaycast: Send + Sync {
    /// Ближайшее пересечение луча со сценой в пределах max_distance
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit>;
}

/// Resource-обёртка над raycast-коллаборатором
///
/// Отсутствующий caster — это "missing collaborator": зависящие системы
/// no-op'ят свой тик и пишут диагностику, симуляция не падает.
#[derive(Resource, Default)]
pub struct SceneQuery {
    caster: Option<Box<dyn SceneRaycast>>,
}

impl SceneQuery {
    pub fn new(caster: Box<dyn SceneRaycast>) -> Self {
        Self {
            caster: Some(caster),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.caster.is_some()
    }

    pub fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        let caster = self.caster.as_ref()?;
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }
        caster.cast(origin, direction, max_distance)
    }
}

/// Плоская поверхность сцены (point + normal, бесконечная)
#[derive(Debug, Clone)]
pub struct PlaneSurface {
    pub point: Vec3,
    pub normal: Vec3,
    pub tag: Option<String>,
}

/// Простейшая статичная сцена из плоскостей
///
/// Хватает headless-прогонам и интеграционным тестам: пол + стены.
/// Настоящая сцена живёт в движке, адаптер подставляет свой caster.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    pub planes: Vec<PlaneSurface>,
}

impl StaticWorld {
    /// Пол на высоте y и стена впереди на z (типовая тестовая сцена)
    pub fn floor_and_wall(floor_y: f32, wall_z: f32) -> Self {
        Self {
            planes: vec![
                PlaneSurface {
                    point: Vec3::new(0.0, floor_y, 0.0),
                    normal: Vec3::Y,
                    tag: None,
                },
                PlaneSurface {
                    point: Vec3::new(0.0, 0.0, wall_z),
                    normal: Vec3::Z,
                    tag: None,
                },
            ],
        }
    }
}

impl SceneRaycast for StaticWorld {
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        let mut best: Option<(f32, &PlaneSurface)> = None;

        for plane in &self.planes {
            let denom = direction.dot(plane.normal);
            if denom.abs() < 1e-6 {
                continue; // луч параллелен плоскости
            }
            let t = (plane.point - origin).dot(plane.normal) / denom;
            if t <= 1e-4 || t > max_distance {
                continue;
            }
            if best.map_or(true, |(best_t, _)| t < best_t) {
                best = Some((t, plane));
            }
        }

        best.map(|(t, plane)| RaycastHit {
            point: origin + direction * t,
            surface_tag: plane.tag.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_scene_query_noop() {
        let query = SceneQuery::default();
        assert!(!query.is_connected());
        assert!(query.cast(Vec3::ZERO, Vec3::NEG_Z, 100.0).is_none());
    }

    #[test]
    fn test_static_world_hits_wall() {
        let world = StaticWorld::floor_and_wall(0.0, -10.0);
        let query = SceneQuery::new(Box::new(world));

        let hit = query
            .cast(Vec3::new(0.0, 1.5, 0.0), Vec3::NEG_Z, 100.0)
            .expect("wall in range");
        assert!((hit.point.z - (-10.0)).abs() < 1e-4);
        assert!((hit.point.y - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_static_world_nearest_plane_wins() {
        let world = StaticWorld {
            planes: vec![
                PlaneSurface {
                    point: Vec3::new(0.0, 0.0, -20.0),
                    normal: Vec3::Z,
                    tag: Some("far".to_string()),
                },
                PlaneSurface {
                    point: Vec3::new(0.0, 0.0, -5.0),
                    normal: Vec3::Z,
                    tag: Some("near".to_string()),
                },
            ],
        };
        let hit = world
            .cast(Vec3::ZERO, Vec3::NEG_Z, 100.0)
            .expect("planes ahead");
        assert_eq!(hit.surface_tag.as_deref(), Some("near"));
    }

    #[test]
    fn test_static_world_respects_max_distance() {
        let world = StaticWorld::floor_and_wall(0.0, -50.0);
        assert!(world.cast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 10.0).is_none());
    }

    #[test]
    fn test_ground_check_style_ray() {
        let world = StaticWorld::floor_and_wall(0.0, -10.0);
        // Игрок на земле: луч вниз 0.1м попадает
        assert!(world
            .cast(Vec3::new(0.0, 0.05, 0.0), Vec3::NEG_Y, 0.1)
            .is_some());
        // В воздухе: не попадает
        assert!(world
            .cast(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, 0.1)
            .is_none());
    }
}
