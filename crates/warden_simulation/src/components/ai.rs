//! AI компоненты: state machine, config, patrol route, target

// Компоненты живут в crate::ai (рядом с системами), здесь re-export для единообразия
pub use crate::ai::{AIConfig, AIState, BehaviorMemory, PatrolRoute, TargetRef};
