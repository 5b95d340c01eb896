//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: теги акторов (Player)
//! - movement: контракт навигатора (Navigator, NavAgent)
//! - animation: контракт animation driver'а (AnimationDriver, Animator, cues/clips)
//! - ai: state machine и её данные (AIState, AIConfig, PatrolRoute, BehaviorMemory, TargetRef)

pub mod actor;
pub mod ai;
pub mod animation;
pub mod movement;

pub use actor::*;
pub use ai::*;
pub use animation::*;
pub use movement::*;
