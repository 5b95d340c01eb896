//! AI Events — наблюдаемые результаты FSM
//!
//! Host (анимации, UI, звук) подписывается через EventReader.

use bevy::prelude::*;

use crate::ai::AIState;

/// FSM агента сменила состояние
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AIStateChanged {
    pub entity: Entity,
    pub from: AIState,
    pub to: AIState,
}
