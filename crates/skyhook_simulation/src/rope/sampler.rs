//! Сэмплер точек каната
//!
//! Attached: прямая anchor→grapple + синусоидальная волна вдоль up-вектора,
//! взвешенная spring-значением и affect-кривой.
//! Retracting: голая прямая anchor→затухающая grapple-позиция, без волны.

use bevy::prelude::*;

use crate::components::AffectCurve;

/// Up-вектор каната: Y look-rotation'а вдоль направления каната
/// (Gram-Schmidt мирового up против direction).
pub fn rope_up(direction: Vec3) -> Vec3 {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return Vec3::Y;
    }
    let up = Vec3::Y - dir * dir.dot(Vec3::Y);
    if up.length_squared() > 1e-8 {
        up.normalize()
    } else {
        // Канат вертикален: up вырождается, берём мировой Z
        Vec3::Z
    }
}

/// Точки attached-каната: quality+1 штук, первая — anchor
pub fn sample_attached(
    anchor: Vec3,
    drawn_grapple: Vec3,
    spring_value: f32,
    quality: u32,
    wave_count: f32,
    wave_height: f32,
    curve: &AffectCurve,
) -> Vec<Vec3> {
    let quality = quality.max(1);
    let up = rope_up(drawn_grapple - anchor);

    (0..=quality)
        .map(|i| {
            let delta = i as f32 / quality as f32;
            let offset = up
                * wave_height
                * (delta * wave_count * std::f32::consts::PI).sin()
                * spring_value
                * curve.evaluate(delta);
            anchor.lerp(drawn_grapple, delta) + offset
        })
        .collect()
}

/// Точки retracting-каната: прямая без волны, тот же счётчик точек
pub fn sample_retracting(anchor: Vec3, grapple: Vec3, quality: u32) -> Vec<Vec3> {
    let quality = quality.max(1);
    (0..=quality)
        .map(|i| anchor.lerp(grapple, i as f32 / quality as f32))
        .collect()
}
