//! Pursuer Simulation Core
//!
//! Server-authoritative охотник на Bevy 0.16 ECS (headless).
//!
//! HYBRID ARCHITECTURE:
//! - ECS = authority (perception, roam/chase решения, state machine)
//! - Engine = collaborators (navigation execution, trigger volumes, анимация)
//! - Observers получают только PursuerState через ReplicationChannel

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod collision_layers;
pub mod components;
pub mod config;
pub mod drivers;
pub mod logger;
pub mod navigation;
pub mod perception;
pub mod replication;

// Re-export базовых типов для удобства
pub use ai::{
    ActorCaught, BehaviorTasks, ContactEvent, PerceivedTarget, Pursuer, PursuerPlugin, PursuerState,
    PursuerStateChanged, PursuerSystems, PursuerTeleported, PursuerVanished, SmokeEffectTriggered,
};
pub use collision_layers::CollisionLayer;
pub use components::*;
pub use config::{ConfigError, PursuerConfig};
pub use drivers::DriversPlugin;
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use navigation::{FlatNavArea, Navigation, WalkableSurface};
pub use replication::{ObserverMirror, ReplicationChannel, StateObserver, StateSync};

/// Частота fixed timestep симуляции
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции (fixed clock + RNG + AI охотника)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

        // Seed из create_headless_app не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_plugins(PursuerPlugin);
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

/// Длительность одного fixed шага
pub fn fixed_timestep() -> Duration {
    Duration::from_secs_f64(1.0 / SIMULATION_HZ)
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Каждый `app.update()` продвигает время ровно на один fixed шаг,
/// поэтому прогоны с одинаковым seed воспроизводимы.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(fixed_timestep()));

    app
}

/// Bundle охотника: позиция, направление взгляда, конфиг, базовая скорость
pub fn pursuer_bundle(position: Vec3, facing: Vec3, config: PursuerConfig) -> impl Bundle {
    let speed = MovementSpeed {
        speed: config.walk_speed,
    };
    (
        Pursuer,
        Transform::from_translation(position).looking_to(facing, Vec3::Y),
        config,
        speed,
        CollisionLayer(collision_layers::COLLISION_LAYER_PURSUERS),
    )
}

/// Bundle игрока (добыча): позиция, facing, умеет реагировать на поимку
pub fn player_bundle(position: Vec3, facing: Vec3) -> impl Bundle {
    (
        Player,
        Transform::from_translation(position).looking_to(facing, Vec3::Y),
        CollisionLayer(collision_layers::COLLISION_LAYER_PLAYERS),
        CatchReaction::default(),
    )
}

/// Bundle препятствия (блокирует line-of-sight)
pub fn occluder_bundle(center: Vec3, half_extents: Vec3) -> impl Bundle {
    (
        Occluder::new(half_extents),
        Transform::from_translation(center),
        CollisionLayer(collision_layers::COLLISION_LAYER_ENVIRONMENT),
    )
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
