//! Прицеливание: waist anchors, crosshair, aim assist
//!
//! Crosshair-решение считается ДО обработки триггера в том же тике —
//! выстрел потребляет решение текущего тика (ordering-гарантия цепочки).

use bevy::prelude::*;

use crate::components::{
    AimSolution, AssistMarker, Crosshair, Hand, HandPose, HeadRig, HookState, Player, WaistAnchor,
};
use crate::config::{SettingsState, SimulationConfig};
use crate::services::SceneQuery;

/// Система: позиционирование waist anchors от head pose
///
/// Пояс = голова + вертикальный offset, руки разнесены по yaw-right.
/// Канаты рисуются от пояса, не от контроллеров.
pub fn update_waist_anchors(
    players: Query<&HeadRig, With<Player>>,
    mut hands: Query<(&Hand, &mut WaistAnchor)>,
    config: Res<SimulationConfig>,
) {
    let Ok(head) = players.single() else {
        crate::logger::log_warning("update_waist_anchors skipped: no player rig");
        return;
    };

    let yaw = head.yaw_forward();
    // Взгляд строго вниз/вверх: yaw вырожден, оставляем якоря на месте
    let right = if yaw == Vec3::ZERO {
        Vec3::X
    } else {
        yaw.cross(Vec3::Y).normalize()
    };

    let base = head.position + Vec3::Y * config.grapple.waist_height_offset;

    for (hand, mut waist) in hands.iter_mut() {
        waist.position = base + right * (hand.side.waist_sign() * config.grapple.waist_side_offset);
    }
}

/// Выбор aim-assist цели: ближайший маркер внутри конуса
///
/// Кандидаты за search_radius или вне полуугла конуса отбрасываются.
/// Тай-брейк равных дистанций — наименьший Entity::index (детерминизм).
pub fn select_assist_target(
    origin: Vec3,
    forward: Vec3,
    search_radius: f32,
    cone_half_angle_deg: f32,
    candidates: impl IntoIterator<Item = (Entity, Vec3)>,
) -> Option<(Entity, Vec3)> {
    let forward = forward.normalize_or_zero();
    if forward == Vec3::ZERO {
        return None;
    }

    let mut best: Option<(f32, u32, Entity, Vec3)> = None;

    for (entity, position) in candidates {
        let to_target = position - origin;
        let distance = to_target.length();
        if distance > search_radius || distance < 1e-4 {
            continue;
        }
        let bearing = forward.angle_between(to_target).to_degrees();
        if bearing > cone_half_angle_deg {
            continue;
        }

        let index = entity.index();
        let better = match best {
            None => true,
            Some((best_distance, best_index, _, _)) => {
                distance < best_distance || (distance == best_distance && index < best_index)
            }
        };
        if better {
            best = Some((distance, index, entity, position));
        }
    }

    best.map(|(_, _, entity, position)| (entity, position))
}

/// Система: crosshair-решение руки за тик
///
/// Стабилизация forward: дрожание ниже порога переиспользует прошлое
/// направление. Aim assist перекрывает сырой raycast hit. Валидность —
/// по дистанции от waist anchor (ею же валидируется зацеп).
pub fn update_crosshairs(
    mut hands: Query<(&HandPose, &WaistAnchor, &HookState, &mut Crosshair), With<Hand>>,
    markers: Query<(Entity, &Transform), With<AssistMarker>>,
    scene: Res<SceneQuery>,
    config: Res<SimulationConfig>,
    settings: Res<SettingsState>,
) {
    for (pose, waist, state, mut crosshair) in hands.iter_mut() {
        if state.is_attached() {
            crosshair.solution = AimSolution::Hidden;
            crosshair.visible = false;
            crosshair.surface_tag = None;
            continue;
        }

        if !scene.is_connected() {
            crate::logger::log_warning("update_crosshairs skipped: scene raycaster missing");
            crosshair.solution = AimSolution::Hidden;
            crosshair.visible = false;
            continue;
        }

        // Стабилизация мелкого дрожания контроллера
        let current = pose.forward.normalize_or_zero();
        let forward = if crosshair.last_forward == Vec3::ZERO || current == Vec3::ZERO {
            crosshair.last_forward = current;
            current
        } else {
            let change = crosshair.last_forward.angle_between(current).to_degrees();
            if change > config.aim.stabilization_threshold_deg {
                crosshair.last_forward = current;
                current
            } else {
                crosshair.last_forward
            }
        };

        let raw_hit = scene.cast(pose.position, forward, config.aim.max_aim_distance);

        let assist = select_assist_target(
            pose.position,
            forward,
            config.aim.assist_search_radius,
            config.aim.assist_cone_half_angle_deg,
            markers.iter().map(|(e, t)| (e, t.translation)),
        );

        let (point, surface_tag, assisted) = match (assist, raw_hit) {
            (Some((_, point)), _) => (Some(point), None, true),
            (None, Some(hit)) => (Some(hit.point), hit.surface_tag, false),
            (None, None) => (None, None, false),
        };

        crosshair.surface_tag = surface_tag;
        crosshair.solution = match point {
            None => AimSolution::Hidden,
            Some(point) => {
                let distance = waist.position.distance(point);
                if distance >= config.grapple.min_grapple_distance {
                    AimSolution::Valid {
                        point,
                        distance,
                        assisted,
                    }
                } else {
                    AimSolution::TooClose { point, distance }
                }
            }
        };

        crosshair.visible =
            settings.crosshair_enabled && crosshair.solution != AimSolution::Hidden;
    }
}
