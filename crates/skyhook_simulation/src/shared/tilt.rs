//! Camera tilt feedback: крен камеры от боковой скорости
//!
//! Симуляция считает угол, адаптер применяет его к camera rig.
//! Тоггл tilt_enabled в настройках плавно возвращает крен к нулю.

use bevy::prelude::*;

use crate::components::{HeadRig, PhysicsBody, Player};
use crate::config::{SettingsState, SimulationConfig};

/// Текущий крен камеры (градусы, + = крен в сторону head-right)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct CameraTilt {
    pub angle_deg: f32,
}

/// Система: сглаженный крен к боковой скорости
pub fn update_camera_tilt(
    mut players: Query<(&HeadRig, &PhysicsBody, &mut CameraTilt), With<Player>>,
    config: Res<SimulationConfig>,
    settings: Res<SettingsState>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();

    for (head, body, mut tilt) in players.iter_mut() {
        let target = if settings.tilt_enabled {
            let lateral = body.velocity.dot(head.right());
            (lateral * config.tilt.degrees_per_mps)
                .clamp(-config.tilt.max_angle_deg, config.tilt.max_angle_deg)
        } else {
            0.0
        };

        let blend = (config.tilt.smoothing * dt).min(1.0);
        tilt.angle_deg += (target - tilt.angle_deg) * blend;
    }
}
