//! Boost-дэши: double-tap импульс, held-drain, angular drag
//!
//! Обе руки тратят собственный метр, импульсы складываются в одно тело.
//! Руки обрабатываются в порядке Left → Right (детерминизм + паритет с
//! оригинальной раскладкой, где правая рука выигрывает последнее слово
//! по angular drag).

use bevy::prelude::*;

use crate::components::{
    AngularDragCommand, BoostMeter, GroundContact, Hand, HandInput, HeadRig, HookState,
    PhysicsBody, Player, Side, TapTracker,
};
use crate::config::{BoostConfig, SimulationConfig};

/// Направление boost-а: взгляд + боковой bias руки
///
/// На земле направление прижимается к горизонту; в воздухе с крюком выше
/// игрока добавляется вертикальный bias к grapple point.
pub fn boost_direction(
    head: &HeadRig,
    side: Side,
    grounded: bool,
    grapple_height_above: Option<f32>,
    config: &BoostConfig,
) -> Vec3 {
    let mut direction = head.forward + head.right() * (side.lateral_sign() * config.lateral_offset);

    if grounded {
        direction.y = 0.0;
    } else if let Some(dy) = grapple_height_above {
        direction += Vec3::Y * (dy * config.upward_boost_factor);
    }

    direction.normalize_or_zero()
}

/// Система: boost-входы обеих рук за тик
///
/// Double-tap: второй тап в окне double_tap_window при метре ≥ cost →
/// разовый импульс double_tap_force, списание ровно один раз (потребивший
/// тап не открывает новое окно). Held: непрерывный импульс boost_speed и
/// drain_rate единиц/сек, метр не уходит ниже нуля.
pub fn apply_boost(
    mut hands: Query<(
        &Hand,
        &HandInput,
        &HookState,
        &mut BoostMeter,
        &mut TapTracker,
    )>,
    mut players: Query<
        (
            &Transform,
            &HeadRig,
            &GroundContact,
            &mut PhysicsBody,
            &mut AngularDragCommand,
        ),
        With<Player>,
    >,
    config: Res<SimulationConfig>,
    time: Res<Time<Fixed>>,
) {
    let Ok((transform, head, contact, mut body, mut drag)) = players.single_mut() else {
        crate::logger::log_warning("apply_boost skipped: no player rig");
        return;
    };

    let dt = time.delta_secs();
    let now = time.elapsed_secs();
    let boost = &config.boost;
    let player_y = transform.translation.y;

    let mut hands: Vec<_> = hands.iter_mut().collect();
    hands.sort_by_key(|(hand, ..)| hand.side.order());

    let mut any_boosting = false;

    for (hand, input, state, mut meter, mut tracker) in hands {
        let grapple_above = state
            .grapple_point()
            .filter(|point| point.y > player_y)
            .map(|point| point.y - player_y);

        // --- Double-tap dash ---
        if input.boost_pressed {
            let fired = tracker.register_press(
                now,
                boost.double_tap_window,
                meter.can_afford(boost.double_tap_cost),
            );
            if fired {
                meter.consume(boost.double_tap_cost);
                let direction =
                    boost_direction(head, hand.side, contact.grounded, grapple_above, boost);
                body.velocity += direction * boost.double_tap_force;

                crate::logger::log(&format!(
                    "⚡ Double-tap boost {:?} (метр: {:.0}/{:.0})",
                    hand.side, meter.current, meter.max
                ));
            }
        }

        // --- Held boost ---
        if input.boost_held && !meter.is_empty() {
            let direction =
                boost_direction(head, hand.side, contact.grounded, grapple_above, boost);
            body.velocity += direction * boost.boost_speed;
            meter.drain(boost.drain_rate * dt);

            drag.drag = if contact.grounded {
                boost.angular_drag_grounded
            } else if state.is_attached() {
                boost.angular_drag_attached
            } else {
                boost.angular_drag_airborne
            };
            any_boosting = true;
        }
    }

    if !any_boosting {
        drag.drag = boost.angular_drag_idle;
    }
}
