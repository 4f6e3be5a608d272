//! Headless-прогон SKYHOOK
//!
//! Запускает симуляцию без рендера: зацеп за стену, подтягивание,
//! release, boost. Смоук-тест детерминизма и sanity-вывод в консоль.

use bevy::prelude::*;
use skyhook_simulation::{
    create_headless_app, spawn_player_rig, HandInput, HandPose, HeadRig, HookState, PhysicsBody,
    RopePath, SceneQuery, SimulationConfig, SimulationPlugin, StaticWorld,
};

fn main() {
    let seed = 42;
    println!("Starting SKYHOOK headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    app.insert_resource(SceneQuery::new(Box::new(StaticWorld::floor_and_wall(
        0.0, -30.0,
    ))));

    let config = app.world().resource::<SimulationConfig>().clone();
    let rig = spawn_player_rig(app.world_mut(), Vec3::new(0.0, 1.0, 0.0), &config);

    // Контроллер целится в стену
    app.world_mut()
        .entity_mut(rig.left_hand)
        .insert(HandPose {
            position: Vec3::new(-0.3, 1.4, 0.0),
            forward: Vec3::NEG_Z,
        });

    for tick in 0..600 {
        // Сценарий: выстрел на 30-м тике, pull до 300-го, release
        let mut input = HandInput::default();
        if tick == 30 {
            input.trigger_pressed = true;
        }
        if (30..300).contains(&tick) {
            input.pull_held = true;
        }
        if tick == 300 {
            input.trigger_released = true;
        }
        if (350..450).contains(&tick) {
            input.boost_held = true;
        }
        *app.world_mut().get_mut::<HandInput>(rig.left_hand).unwrap() = input;

        app.update();

        // Head pose следует за телом (в игре это делает HMD tracking)
        let position = app
            .world()
            .get::<Transform>(rig.player)
            .unwrap()
            .translation;
        app.world_mut().get_mut::<HeadRig>(rig.player).unwrap().position =
            position + Vec3::Y * 1.6;

        if tick % 100 == 0 {
            let state = app.world().get::<HookState>(rig.left_hand).unwrap();
            let body = app.world().get::<PhysicsBody>(rig.player).unwrap();
            let rope_points = app
                .world()
                .get::<RopePath>(rig.left_hand)
                .unwrap()
                .points
                .len();
            println!(
                "Tick {}: pos ({:.2}, {:.2}, {:.2}), |v| {:.2} m/s, hook {:?}, rope points {}",
                tick,
                position.x,
                position.y,
                position.z,
                body.velocity.length(),
                state,
                rope_points
            );
        }
    }

    println!("Simulation complete!");
}
