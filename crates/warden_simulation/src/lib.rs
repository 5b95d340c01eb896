//! Warden Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: поведение NPC-охранника.
//!
//! Агент патрулирует маршрут, замечает игрока (дистанция + vision cone +
//! line-of-sight), преследует его и атакует в ближнем бою.
//!
//! HOST BOUNDARY:
//! - ECS = решения (FSM, detection)
//! - Host = исполнение (pathfinding, анимация) через NavAgent / Animator
//!   (headless версия host'а — модуль `host`)

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod components;
pub mod host;
pub mod logger;

// Re-export базовых компонентов для удобства
pub use ai::{AIConfig, AIPlugin, AIState, AIStateChanged, BehaviorSet, ConfigError, PatrolRoute};
pub use components::*;
pub use host::{HeadlessHostPlugin, Wander};
pub use logger::*;

/// Шаг симуляции (50Hz)
pub const SIMULATION_TICK: Duration = Duration::from_millis(20);

/// Главный plugin симуляции (AI без host'а)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            // Детерминистичный RNG (seed по умолчанию)
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_duration(SIMULATION_TICK))
            .add_plugins(AIPlugin);
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
/// Время идёт ровно на SIMULATION_TICK за `app.update()`, поэтому
/// каждый update (кроме самого первого, с нулевой delta) = один FixedUpdate тик.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(SIMULATION_TICK))
        .add_plugins((SimulationPlugin, HeadlessHostPlugin));

    app
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

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
