//! Силы attached-крюка: подтягивание, маятник, tension-подсветка, искры

use bevy::prelude::*;

use crate::components::{
    Hand, HandInput, HookState, PhysicsBody, Player, RopePath, SparkState, WaistAnchor,
};
use crate::config::SimulationConfig;
use crate::grapple::events::{SparkAction, SparkCue};
use crate::grapple::math;

/// Система: pull/swing силы attached-крюков
///
/// Pull — velocity-change импульс к grapple point за тик; реальное
/// подтягивание складывается из импульса и лимита каната, который следует
/// за дистанцией только вниз (см. physics::sync_rope_limits).
/// Swing — постоянное ускорение перпендикулярно линии на anchor.
pub fn apply_pull_and_swing(
    mut hands: Query<(&HookState, &HandInput, &mut RopePath), With<Hand>>,
    mut players: Query<(&Transform, &mut PhysicsBody), With<Player>>,
    config: Res<SimulationConfig>,
    time: Res<Time<Fixed>>,
) {
    let Ok((transform, mut body)) = players.single_mut() else {
        crate::logger::log_warning("apply_pull_and_swing skipped: no player rig");
        return;
    };
    let dt = time.delta_secs();
    let player_position = transform.translation;

    for (state, input, mut path) in hands.iter_mut() {
        let HookState::Attached {
            grapple_point,
            original_distance,
            ..
        } = *state
        else {
            path.heat = 0.0;
            continue;
        };

        if input.pull_held {
            let pull = math::pull_direction(grapple_point, player_position);
            body.velocity += pull * config.grapple.pull_boost_force;

            let current = player_position.distance(grapple_point);
            path.heat =
                math::reel_tension(current, config.grapple.min_rope_limit, original_distance);
        } else {
            path.heat = 0.0;
        }

        if input.swing_held {
            let swing = math::swing_direction(grapple_point, player_position, Vec3::Y);
            body.velocity += swing * config.grapple.swing_force * dt;
        }
    }
}

/// Система: spark-cue события для particle-эффектов адаптера
///
/// Loop горит пока рука подтягивается или идёт release-вспышка;
/// события шлются только на фронтах (Play на играющем эффекте — шум).
pub fn drive_spark_cues(
    mut hands: Query<(&Hand, &HookState, &HandInput, &WaistAnchor, &mut SparkState)>,
    time: Res<Time<Fixed>>,
    mut cues: EventWriter<SparkCue>,
) {
    let dt = time.delta_secs();

    for (hand, state, input, waist, mut sparks) in hands.iter_mut() {
        if let Some(timer) = sparks.stop_timer {
            let remaining = timer - dt;
            sparks.stop_timer = (remaining > 0.0).then_some(remaining);
        }

        let pull_active = state.is_attached() && input.pull_held;
        let desired = pull_active || sparks.stop_timer.is_some();

        if desired && !sparks.looping {
            sparks.looping = true;
            cues.write(SparkCue {
                side: hand.side,
                position: waist.position,
                action: SparkAction::LoopStart,
            });
        } else if !desired && sparks.looping {
            sparks.looping = false;
            cues.write(SparkCue {
                side: hand.side,
                position: waist.position,
                action: SparkAction::LoopStop,
            });
        }
    }
}
