//! SKYHOOK Simulation Core
//!
//! ECS-симуляция grappling-hook локомоции на Bevy 0.16 (headless).
//!
//! HYBRID ARCHITECTURE:
//! - ECS = правила локомоции (hook state machine, канат, boost, tilt)
//! - Движок = тактический слой (rendering, настоящий joint, XR input, UI)
//!
//! Seam к движку: raycast инжектится как SceneQuery resource; joint и
//! particles управляются событиями (JointCommand, SparkCue); rope/crosshair
//! рисуются адаптером по RopePath/Crosshair компонентам.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod aim;
pub mod boost;
pub mod components;
pub mod config;
pub mod grapple;
pub mod logger;
pub mod physics;
pub mod rope;
pub mod services;
pub mod shared;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::{
    AimConfig, BoostConfig, GrappleConfig, SettingsState, SimulationConfig, TiltConfig,
};
pub use grapple::{HookAttached, HookReleased, JointCommand, JointOp, SparkAction, SparkCue};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_level, set_sink};
pub use services::{PlaneSurface, RaycastHit, SceneQuery, SceneRaycast, StaticWorld};
pub use shared::CameraTilt;

/// Главный plugin симуляции
///
/// Все системы — один chain в FixedUpdate (60Hz). Порядок фаз обязателен:
/// crosshair считается ДО триггера (выстрел потребляет решение своего
/// тика), constraint решается до синка лимита (лимит attached-каната
/// монотонно не растёт).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            // Конфиг и настройки (адаптер может вставить свои до build)
            .init_resource::<SimulationConfig>()
            .init_resource::<SettingsState>()
            .init_resource::<SceneQuery>();

        // События seam'а симуляция ↔ движок
        app.add_event::<HookAttached>()
            .add_event::<HookReleased>()
            .add_event::<JointCommand>()
            .add_event::<SparkCue>();

        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: rig (waist anchors от head pose, ground check)
                aim::update_waist_anchors,
                physics::update_ground_contact,
                // Фаза 2: прицеливание — строго до обработки триггера
                aim::update_crosshairs,
                // Фаза 3: hook state machine
                grapple::fire_hooks,
                grapple::release_hooks,
                // Фаза 4: силы
                grapple::apply_pull_and_swing,
                boost::apply_boost,
                physics::apply_gravity,
                // Фаза 5: интеграция + headless joint
                physics::integrate_velocity,
                physics::enforce_rope_constraints,
                physics::sync_rope_limits,
                // Фаза 6: визуальный выход + camera feedback
                rope::draw_ropes,
                shared::update_camera_tilt,
                grapple::drive_spark_cues,
                // Фаза 7: очистка edge-входов тика
                clear_input_edges,
            )
                .chain(), // Последовательное выполнение
        );
    }
}

/// Система: сброс edge-флагов входов в конце тика
///
/// Held-флаги остаются за адаптером; pressed/released действуют один тик.
pub fn clear_input_edges(mut inputs: Query<&mut HandInput>) {
    for mut input in inputs.iter_mut() {
        input.clear_edges();
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Virtual time двигается вручную ровно на период тика за update —
/// FixedUpdate срабатывает раз в update независимо от wall clock
/// (иначе determinism-тесты зависят от скорости машины).
pub fn create_headless_app(seed: u64) -> App {
    use std::time::Duration;

    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            Duration::from_micros(16_667),
        ))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Entities player rig'а (тело + две руки)
#[derive(Debug, Clone, Copy)]
pub struct PlayerRig {
    pub player: Entity,
    pub left_hand: Entity,
    pub right_hand: Entity,
}

/// Spawn helper: полный player rig
///
/// Тело: Transform + PhysicsBody + HeadRig + ground/tilt/drag state.
/// Руки: hook state machine + канат + boost + прицеливание.
pub fn spawn_player_rig(world: &mut World, position: Vec3, config: &SimulationConfig) -> PlayerRig {
    let player = world
        .spawn((
            Player,
            Transform::from_translation(position),
            PhysicsBody::default(),
            HeadRig {
                position: position + Vec3::Y * 1.6,
                forward: Vec3::NEG_Z,
            },
            GroundContact::default(),
            AngularDragCommand::default(),
            CameraTilt::default(),
        ))
        .id();

    let mut spawn_hand = |world: &mut World, side: Side| {
        world
            .spawn((
                Hand { side },
                HandPose::default(),
                HandInput::default(),
                WaistAnchor::default(),
                HookState::default(),
                Crosshair::default(),
                Rope::default(),
                RopePath::default(),
                BoostMeter::with_initial(config.boost.max_meter, config.boost.initial_meter),
                TapTracker::default(),
                SparkState::default(),
            ))
            .id()
    };

    let left_hand = spawn_hand(world, Side::Left);
    let right_hand = spawn_hand(world, Side::Right);

    PlayerRig {
        player,
        left_hand,
        right_hand,
    }
}

/// Snapshot мира для сравнения детерминизма
///
/// Debug-формат компонентов, сортировка по Entity ID.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }
    snapshot
}
