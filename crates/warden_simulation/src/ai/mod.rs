//! AI decision-making module
//!
//! FSM агента-охранника: Patrol → Follow → Attack (+ Idle без маршрута).
//! - detection: vision cone + line-of-sight
//! - controller: сама FSM (без ECS, тестируется на mock коллабораторах)
//! - systems: ECS обвязка (инициализация, тик)

use bevy::prelude::*;

pub mod components;
pub mod controller;
pub mod detection;
pub mod events;
pub mod systems;


// Re-export основных типов
pub use components::*;
pub use controller::{BehaviorController, StateTransition};
pub use detection::{Detector, LineOfSight, Perception, SensedTarget};
pub use events::AIStateChanged;

/// Порядок внутри FixedUpdate: сначала AI решает, потом host исполняет
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BehaviorSet {
    /// Инициализация агентов + FSM тик
    Decide,
    /// Навигация / анимация host'а (читают intent, пишут status)
    Host,
}

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. initialize_agents — резолв цели, первая точка патруля
/// 2. ai_behavior_tick — FSM тик
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<AIState>()
            .register_type::<AIConfig>()
            .register_type::<PatrolRoute>()
            .register_type::<BehaviorMemory>()
            .register_type::<TargetRef>()
            .register_type::<crate::components::NavAgent>()
            .register_type::<crate::components::Animator>()
            .register_type::<crate::components::Player>()
            .add_event::<AIStateChanged>()
            .configure_sets(FixedUpdate, (BehaviorSet::Decide, BehaviorSet::Host).chain())
            .add_systems(
                FixedUpdate,
                (systems::initialize_agents, systems::ai_behavior_tick)
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(BehaviorSet::Decide),
            );
    }
}
