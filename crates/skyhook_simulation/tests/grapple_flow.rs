//! Интеграционный тест grapple-локомоции
//!
//! Headless App + StaticWorld сцена: полный цикл
//! прицеливание → зацеп → подтягивание → release → retraction → idle.

use bevy::prelude::*;
use skyhook_simulation::*;

/// Helper: App с симуляцией и сценой "пол + стена впереди"
fn create_app(wall_z: f32) -> (App, PlayerRig) {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin);
    app.insert_resource(SceneQuery::new(Box::new(StaticWorld::floor_and_wall(
        0.0, wall_z,
    ))));

    let config = app.world().resource::<SimulationConfig>().clone();
    let rig = spawn_player_rig(app.world_mut(), Vec3::new(0.0, 1.0, 0.0), &config);

    // Левый контроллер целится в стену
    let mut pose = app.world_mut().get_mut::<HandPose>(rig.left_hand).unwrap();
    pose.position = Vec3::new(-0.3, 1.4, 0.0);
    pose.forward = Vec3::NEG_Z;

    // Прогрев: первый update инициализирует Time (delta = 0, FixedUpdate не тикает)
    app.update();

    (app, rig)
}

fn set_input(app: &mut App, hand: Entity, input: HandInput) {
    *app.world_mut().get_mut::<HandInput>(hand).unwrap() = input;
}

fn hook_state(app: &App, hand: Entity) -> HookState {
    *app.world().get::<HookState>(hand).unwrap()
}

#[test]
fn test_full_grapple_cycle() {
    let (mut app, rig) = create_app(-15.0);

    // Тик 1: trigger → зацеп (crosshair решается тем же тиком)
    set_input(
        &mut app,
        rig.left_hand,
        HandInput {
            trigger_pressed: true,
            ..Default::default()
        },
    );
    app.update();

    let state = hook_state(&app, rig.left_hand);
    assert!(state.is_attached(), "ожидали Attached, получили {:?}", state);
    let grapple = state.grapple_point().unwrap();
    assert!((grapple.z - (-15.0)).abs() < 1e-3);

    // Канат нарисован: quality+1 точек
    let rope_points = app.world().get::<RopePath>(rig.left_hand).unwrap().points.len();
    assert_eq!(rope_points, 21);

    // Повисели 60 тиков — крюк держит
    set_input(&mut app, rig.left_hand, HandInput::default());
    for _ in 0..60 {
        app.update();
    }
    assert!(hook_state(&app, rig.left_hand).is_attached());

    // Release → Retracting
    set_input(
        &mut app,
        rig.left_hand,
        HandInput {
            trigger_released: true,
            ..Default::default()
        },
    );
    app.update();
    assert!(hook_state(&app, rig.left_hand).is_retracting());

    // retraction_time = 0.033s = 2 тика при 60Hz → Idle, канат пуст
    set_input(&mut app, rig.left_hand, HandInput::default());
    app.update();
    app.update();
    assert_eq!(hook_state(&app, rig.left_hand), HookState::Idle);
    assert!(app
        .world()
        .get::<RopePath>(rig.left_hand)
        .unwrap()
        .points
        .is_empty());
}

#[test]
fn test_attach_refused_below_min_distance() {
    // Стена в полуметре — ближе min_grapple_distance (2m)
    let (mut app, rig) = create_app(-0.5);

    set_input(
        &mut app,
        rig.left_hand,
        HandInput {
            trigger_pressed: true,
            ..Default::default()
        },
    );
    app.update();

    assert_eq!(hook_state(&app, rig.left_hand), HookState::Idle);
}

#[test]
fn test_pull_reels_player_in() {
    let (mut app, rig) = create_app(-15.0);

    set_input(
        &mut app,
        rig.left_hand,
        HandInput {
            trigger_pressed: true,
            ..Default::default()
        },
    );
    app.update();
    let grapple = hook_state(&app, rig.left_hand).grapple_point().unwrap();
    let start_distance = app
        .world()
        .get::<Transform>(rig.player)
        .unwrap()
        .translation
        .distance(grapple);

    // Подтягиваемся 120 тиков
    set_input(
        &mut app,
        rig.left_hand,
        HandInput {
            pull_held: true,
            ..Default::default()
        },
    );
    let mut last_limit = f32::INFINITY;
    for _ in 0..120 {
        app.update();

        let HookState::Attached { rope_limit, .. } = hook_state(&app, rig.left_hand) else {
            panic!("крюк отцепился во время pull");
        };
        // Лимит каната монотонно не растёт и не падает ниже пола
        assert!(rope_limit <= last_limit + 1e-4);
        assert!(rope_limit >= 1.0 - 1e-6);
        last_limit = rope_limit;

        // Tension-подсветка в [0,1]
        let heat = app.world().get::<RopePath>(rig.left_hand).unwrap().heat;
        assert!((0.0..=1.0).contains(&heat));
    }

    let end_distance = app
        .world()
        .get::<Transform>(rig.player)
        .unwrap()
        .translation
        .distance(grapple);
    assert!(
        end_distance < start_distance - 1.0,
        "pull не подтянул: {} → {}",
        start_distance,
        end_distance
    );
}

#[test]
fn test_double_tap_boost_consumes_once() {
    let (mut app, rig) = create_app(-15.0);

    let meter_before = app
        .world()
        .get::<BoostMeter>(rig.right_hand)
        .unwrap()
        .current;

    // Тап 1
    set_input(
        &mut app,
        rig.right_hand,
        HandInput {
            boost_pressed: true,
            ..Default::default()
        },
    );
    app.update();
    // Тап 2 следующим тиком (внутри окна 0.5s)
    set_input(
        &mut app,
        rig.right_hand,
        HandInput {
            boost_pressed: true,
            ..Default::default()
        },
    );
    app.update();

    let meter_after = app
        .world()
        .get::<BoostMeter>(rig.right_hand)
        .unwrap()
        .current;
    assert!((meter_before - meter_after - 50.0).abs() < 1e-3);

    // Дэш разогнал тело
    let speed = app
        .world()
        .get::<PhysicsBody>(rig.player)
        .unwrap()
        .velocity
        .length();
    assert!(speed > 3.0, "дэш не сработал, |v| = {}", speed);
}

#[test]
fn test_held_boost_never_negative_meter() {
    let (mut app, rig) = create_app(-15.0);

    app.world_mut()
        .get_mut::<BoostMeter>(rig.left_hand)
        .unwrap()
        .current = 0.2;

    set_input(
        &mut app,
        rig.left_hand,
        HandInput {
            boost_held: true,
            ..Default::default()
        },
    );
    for _ in 0..60 {
        app.update();
        let meter = app.world().get::<BoostMeter>(rig.left_hand).unwrap().current;
        assert!(meter >= 0.0, "метр ушёл в минус: {}", meter);
        // held-флаг держим (edge-очистка его не трогает)
        assert!(app.world().get::<HandInput>(rig.left_hand).unwrap().boost_held);
    }
    assert_eq!(
        app.world().get::<BoostMeter>(rig.left_hand).unwrap().current,
        0.0
    );
}

#[test]
fn test_hands_are_independent() {
    let (mut app, rig) = create_app(-15.0);

    // Правый контроллер целится в ту же стену
    let mut pose = app.world_mut().get_mut::<HandPose>(rig.right_hand).unwrap();
    pose.position = Vec3::new(0.3, 1.4, 0.0);
    pose.forward = Vec3::NEG_Z;

    // Зацепились левой
    set_input(
        &mut app,
        rig.left_hand,
        HandInput {
            trigger_pressed: true,
            ..Default::default()
        },
    );
    app.update();

    assert!(hook_state(&app, rig.left_hand).is_attached());
    assert_eq!(hook_state(&app, rig.right_hand), HookState::Idle);

    // Правая цепляется независимо
    set_input(&mut app, rig.left_hand, HandInput::default());
    set_input(
        &mut app,
        rig.right_hand,
        HandInput {
            trigger_pressed: true,
            ..Default::default()
        },
    );
    app.update();

    assert!(hook_state(&app, rig.left_hand).is_attached());
    assert!(hook_state(&app, rig.right_hand).is_attached());
}
