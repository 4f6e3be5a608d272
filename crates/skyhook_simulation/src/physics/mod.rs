//! Headless-физика игрока
//!
//! Настоящий rigidbody/joint — собственность движка; здесь минимальная
//! модель для headless-прогонов: custom velocity integration + проекция
//! на limit-сферу каната. Адаптер с настоящей физикой эти системы
//! дублирует на своей стороне, симуляция остаётся источником команд
//! (JointCommand, AngularDragCommand).

use bevy::prelude::*;

use crate::components::{GroundContact, Hand, HookState, PhysicsBody, Player};
use crate::config::SimulationConfig;
use crate::grapple::events::{JointCommand, JointOp};
use crate::services::SceneQuery;

/// Система: downward raycast ground check
///
/// Raycaster отсутствует → контакт не трогаем (no-op тика).
pub fn update_ground_contact(
    mut players: Query<(&Transform, &mut GroundContact), With<Player>>,
    scene: Res<SceneQuery>,
    config: Res<SimulationConfig>,
) {
    let Ok((transform, mut contact)) = players.single_mut() else {
        return;
    };
    if !scene.is_connected() {
        return;
    }

    contact.grounded = scene
        .cast(
            transform.translation,
            Vec3::NEG_Y,
            config.boost.ground_check_distance,
        )
        .is_some();
}

/// Система: гравитация (пока не на земле)
pub fn apply_gravity(
    mut players: Query<(&mut PhysicsBody, &GroundContact), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();
    for (mut body, contact) in players.iter_mut() {
        if !contact.grounded {
            let g = body.gravity;
            body.velocity.y += g * dt;
        }
    }
}

/// Система: интеграция velocity → Transform (headless)
///
/// На земле нисходящая составляющая гасится — плоскость пола в headless
/// не решает контакт за нас.
pub fn integrate_velocity(
    mut players: Query<(&mut Transform, &mut PhysicsBody, &GroundContact), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();
    for (mut transform, mut body, contact) in players.iter_mut() {
        if contact.grounded && body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
        }
        transform.translation += body.velocity * dt;
    }
}

/// Система: headless-модель distance-limited joint
///
/// Игрок за limit-сферой → проецируем на сферу и гасим уходящую
/// радиальную составляющую скорости (маятник, не резинка).
pub fn enforce_rope_constraints(
    hands: Query<&HookState, With<Hand>>,
    mut players: Query<(&mut Transform, &mut PhysicsBody), With<Player>>,
) {
    let Ok((mut transform, mut body)) = players.single_mut() else {
        return;
    };

    for state in hands.iter() {
        let HookState::Attached {
            grapple_point,
            rope_limit,
            ..
        } = *state
        else {
            continue;
        };

        let offset = transform.translation - grapple_point;
        let distance = offset.length();
        if distance <= rope_limit || distance < 1e-6 {
            continue;
        }

        let radial = offset / distance;
        transform.translation = grapple_point + radial * rope_limit;

        let outward = body.velocity.dot(radial);
        if outward > 0.0 {
            body.velocity -= radial * outward;
        }
    }
}

/// Система: лимит каната следует за текущей дистанцией
///
/// После constraint-прохода дистанция ≤ лимита, поэтому лимит attached-
/// каната монотонно не растёт (ratchet: смотка остаётся). Пол —
/// min_rope_limit. Изменение транслируется joint-сервису движка.
pub fn sync_rope_limits(
    mut hands: Query<(&Hand, &mut HookState)>,
    players: Query<&Transform, With<Player>>,
    config: Res<SimulationConfig>,
    mut joint_commands: EventWriter<JointCommand>,
) {
    let Ok(transform) = players.single() else {
        return;
    };

    for (hand, mut state) in hands.iter_mut() {
        let HookState::Attached {
            grapple_point,
            original_distance,
            rope_limit,
        } = *state
        else {
            continue;
        };

        let distance = transform.translation.distance(grapple_point);
        let new_limit = distance.max(config.grapple.min_rope_limit);

        if (new_limit - rope_limit).abs() > f32::EPSILON {
            *state = HookState::Attached {
                grapple_point,
                original_distance,
                rope_limit: new_limit,
            };
            joint_commands.write(JointCommand {
                side: hand.side,
                op: JointOp::SetLimit { limit: new_limit },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Side;
    use crate::services::StaticWorld;
    use approx::assert_relative_eq;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<SimulationConfig>();
        app.insert_resource(Time::<Fixed>::from_hz(60.0));
        app.insert_resource(SceneQuery::new(Box::new(StaticWorld::floor_and_wall(
            0.0, -50.0,
        ))));
        app.add_event::<JointCommand>();
        app.add_systems(
            Update,
            (
                update_ground_contact,
                apply_gravity,
                integrate_velocity,
                enforce_rope_constraints,
                sync_rope_limits,
            )
                .chain(),
        );
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(std::time::Duration::from_micros(16_667));
        app
    }

    fn spawn_player(app: &mut App, position: Vec3) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                Transform::from_translation(position),
                PhysicsBody::default(),
                GroundContact::default(),
            ))
            .id()
    }

    #[test]
    fn test_gravity_applies_in_air() {
        let mut app = test_app();
        let player = spawn_player(&mut app, Vec3::new(0.0, 10.0, 0.0));
        app.update();

        let body = app.world().get::<PhysicsBody>(player).unwrap();
        // -9.81 / 60 ≈ -0.1635
        assert!(body.velocity.y < -0.15);
        assert!(body.velocity.y > -0.17);
    }

    #[test]
    fn test_grounded_blocks_gravity_and_sink() {
        let mut app = test_app();
        let player = spawn_player(&mut app, Vec3::new(0.0, 0.05, 0.0));
        for _ in 0..10 {
            app.update();
        }

        let contact = app.world().get::<GroundContact>(player).unwrap();
        assert!(contact.grounded);
        let body = app.world().get::<PhysicsBody>(player).unwrap();
        assert_eq!(body.velocity.y, 0.0);
        // Сквозь пол не просели
        let transform = app.world().get::<Transform>(player).unwrap();
        assert!(transform.translation.y > 0.0);
    }

    #[test]
    fn test_constraint_projects_onto_limit_sphere() {
        let mut app = test_app();
        let player = spawn_player(&mut app, Vec3::new(0.0, 10.0, 0.0));
        app.world_mut().spawn((
            Hand { side: Side::Left },
            HookState::Attached {
                grapple_point: Vec3::new(0.0, 20.0, 0.0),
                original_distance: 10.0,
                rope_limit: 5.0, // лимит короче текущей дистанции
            },
        ));
        app.update();

        let transform = app.world().get::<Transform>(player).unwrap();
        let distance = transform.translation.distance(Vec3::new(0.0, 20.0, 0.0));
        assert_relative_eq!(distance, 5.0, epsilon = 1e-3);
    }

    #[test]
    fn test_constraint_kills_outward_velocity_only() {
        let mut app = test_app();
        let player = spawn_player(&mut app, Vec3::new(0.0, 14.0, 0.0));
        app.world_mut().get_mut::<PhysicsBody>(player).unwrap().velocity =
            Vec3::new(3.0, -5.0, 0.0); // вниз = от anchor (anchor сверху)
        app.world_mut().spawn((
            Hand { side: Side::Left },
            HookState::Attached {
                grapple_point: Vec3::new(0.0, 20.0, 0.0),
                original_distance: 6.0,
                rope_limit: 6.0,
            },
        ));
        app.update();

        let body = app.world().get::<PhysicsBody>(player).unwrap();
        // Тангенциальная составляющая (x) выжила, радиальная погашена
        assert!(body.velocity.x > 2.9, "x-скорость погашена: {:?}", body.velocity);
        assert!(body.velocity.y > -1.0);
    }

    #[test]
    fn test_rope_limit_never_rises_while_attached() {
        let mut app = test_app();
        let player = spawn_player(&mut app, Vec3::new(0.0, 10.0, 0.0));
        let hand = app
            .world_mut()
            .spawn((
                Hand { side: Side::Left },
                HookState::Attached {
                    grapple_point: Vec3::new(0.0, 20.0, 0.0),
                    original_distance: 10.0,
                    rope_limit: 10.0,
                },
            ))
            .id();

        let mut last_limit = 10.0;
        for _ in 0..120 {
            app.update();
            let HookState::Attached { rope_limit, .. } =
                *app.world().get::<HookState>(hand).unwrap()
            else {
                panic!("крюк отцепился");
            };
            assert!(
                rope_limit <= last_limit + 1e-4,
                "лимит вырос: {} → {}",
                last_limit,
                rope_limit
            );
            assert!(rope_limit >= 1.0 - 1e-6); // пол лимита
            last_limit = rope_limit;
        }
        let _ = player;
    }
}
