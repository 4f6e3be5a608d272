//! Hook state machine: выстрел и release
//!
//! Переходы Idle/Retracting → Attached и Attached → Retracting.
//! Retracting → Idle тикает rope-модуль (retraction — чисто визуальная
//! фаза, таймер живёт у каната).

use bevy::prelude::*;

use crate::components::{Crosshair, Hand, HandInput, HookState, SparkState};
use crate::config::SimulationConfig;
use crate::grapple::events::{HookAttached, HookReleased, JointCommand, JointOp};

/// Система: trigger нажат → попытка зацепа
///
/// Потребляет AimSolution, посчитанный этим же тиком (crosshair-система
/// стоит раньше в цепочке). Зацеп отклоняется если:
/// - решение Hidden/TooClose (нет цели или ближе min_grapple_distance)
/// - поверхность помечена ungrappleable-тегом
pub fn fire_hooks(
    mut hands: Query<(&Hand, &mut HookState, &Crosshair, &HandInput)>,
    config: Res<SimulationConfig>,
    mut attached_events: EventWriter<HookAttached>,
    mut joint_commands: EventWriter<JointCommand>,
) {
    for (hand, mut state, crosshair, input) in hands.iter_mut() {
        if !input.trigger_pressed || state.is_attached() {
            continue;
        }

        let Some((point, distance)) = crosshair.solution.attach_point() else {
            continue;
        };

        if crosshair.surface_tag.as_deref() == Some(config.grapple.ungrappleable_tag.as_str()) {
            crate::logger::log(&format!(
                "Hook {:?}: surface tagged {:?}, attach refused",
                hand.side, config.grapple.ungrappleable_tag
            ));
            continue;
        }

        let assisted = matches!(
            crosshair.solution,
            crate::components::AimSolution::Valid { assisted: true, .. }
        );

        *state = HookState::Attached {
            grapple_point: point,
            original_distance: distance,
            rope_limit: distance,
        };

        joint_commands.write(JointCommand {
            side: hand.side,
            op: JointOp::Create {
                anchor: point,
                limit: distance,
            },
        });
        attached_events.write(HookAttached {
            side: hand.side,
            point,
            distance,
            assisted,
        });

        crate::logger::log(&format!(
            "🪝 Hook {:?} attached at {:?} (distance {:.2}m{})",
            hand.side,
            point,
            distance,
            if assisted { ", assisted" } else { "" }
        ));
    }
}

/// Система: trigger отпущен → release + начало retraction
pub fn release_hooks(
    mut hands: Query<(&Hand, &mut HookState, &mut SparkState, &HandInput)>,
    config: Res<SimulationConfig>,
    mut released_events: EventWriter<HookReleased>,
    mut joint_commands: EventWriter<JointCommand>,
) {
    for (hand, mut state, mut sparks, input) in hands.iter_mut() {
        if !input.trigger_released {
            continue;
        }
        let HookState::Attached { grapple_point, .. } = *state else {
            continue;
        };

        *state = HookState::Retracting {
            grapple_point,
            timer: 0.0,
        };

        joint_commands.write(JointCommand {
            side: hand.side,
            op: JointOp::Destroy,
        });
        released_events.write(HookReleased { side: hand.side });

        // Release-вспышка: loop искр на release_spark_time секунд
        sparks.stop_timer = Some(config.grapple.release_spark_time);

        crate::logger::log(&format!("Hook {:?} released, rope retracting", hand.side));
    }
}
