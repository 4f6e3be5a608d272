//! Чистая геометрия крюка: направления сил, tension

use bevy::prelude::*;

/// Направление маятникового ускорения: перпендикуляр к линии на anchor
/// в горизонтальной плоскости. Zero при вырожденной геометрии
/// (grapple point точно над/под игроком).
pub fn swing_direction(grapple_point: Vec3, player_position: Vec3, up: Vec3) -> Vec3 {
    (grapple_point - player_position).cross(up).normalize_or_zero()
}

/// Направление подтягивания: на grapple point
pub fn pull_direction(grapple_point: Vec3, player_position: Vec3) -> Vec3 {
    (grapple_point - player_position).normalize_or_zero()
}

/// Прогресс подтягивания ∈ [0,1] для tension-подсветки каната
///
/// 1 — канат на исходной длине, 0 — смотан до пола лимита.
/// Знаменатель зажат от нуля: original_distance == min_limit не даёт NaN.
pub fn reel_tension(current_distance: f32, min_limit: f32, original_distance: f32) -> f32 {
    let span = (original_distance - min_limit).max(f32::EPSILON);
    ((current_distance - min_limit) / span).clamp(0.0, 1.0)
}
