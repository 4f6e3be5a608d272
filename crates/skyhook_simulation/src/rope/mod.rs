//! Канат: spring-волна, сэмплинг точек, retraction
//!
//! Выход — RopePath (упорядоченные точки для line service адаптера).
//! Retraction-таймер живёт здесь же: смотка — чисто визуальная фаза,
//! по её истечении канат сам переводит крюк Retracting → Idle.

use bevy::prelude::*;

use crate::components::{Hand, HookState, Rope, RopePath, WaistAnchor};
use crate::config::SimulationConfig;

pub mod sampler;
pub mod spring;

/// Система: построение точек каната за тик
///
/// - Attached: spring-шаг → синусоидальная волна вдоль каната; рисуемая
///   grapple-позиция догоняет настоящую с follow_rate (без snap'а).
/// - Retracting: тикаем таймер, лерпим точки к anchor; по истечении
///   retraction_time — Idle и пустой путь.
/// - Idle: сброс spring state, пустой путь.
pub fn draw_ropes(
    mut hands: Query<(&mut HookState, &mut Rope, &mut RopePath, &WaistAnchor), With<Hand>>,
    config: Res<SimulationConfig>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();

    for (mut state, mut rope, mut path, waist) in hands.iter_mut() {
        let rope = &mut *rope;
        let anchor = waist.position;

        match *state {
            HookState::Retracting {
                grapple_point,
                timer,
            } => {
                let timer = timer + dt;
                let t = timer / config.grapple.retraction_time.max(f32::EPSILON);

                if t >= 1.0 {
                    *state = HookState::Idle;
                    rope.reset(anchor);
                    path.clear();
                    continue;
                }

                *state = HookState::Retracting {
                    grapple_point,
                    timer,
                };
                rope.drawn_grapple = grapple_point.lerp(anchor, t);
                path.points = sampler::sample_retracting(anchor, rope.drawn_grapple, rope.quality);
                path.heat = 0.0;
            }

            HookState::Attached { grapple_point, .. } => {
                if path.points.is_empty() {
                    // Момент зацепа: импульс волны + старт рисования
                    rope.spring_velocity = rope.velocity;
                    rope.drawn_grapple = anchor;
                }

                spring::integrate(
                    &mut rope.spring_value,
                    &mut rope.spring_velocity,
                    0.0,
                    rope.strength,
                    rope.damper,
                    dt,
                );

                rope.drawn_grapple = rope
                    .drawn_grapple
                    .lerp(grapple_point, (dt * rope.follow_rate).min(1.0));

                path.points = sampler::sample_attached(
                    anchor,
                    rope.drawn_grapple,
                    rope.spring_value,
                    rope.quality,
                    rope.wave_count,
                    rope.wave_height,
                    &rope.affect_curve,
                );
            }

            HookState::Idle => {
                rope.reset(anchor);
                path.clear();
            }
        }
    }
}
