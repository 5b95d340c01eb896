//! Target reference component.

use bevy::prelude::*;

/// Weak reference на цель (игрока)
///
/// Резолвится один раз при инициализации агента (поиск по тегу `Player`).
/// Никогда не переназначается: если entity деспавнится, lookup просто
/// перестаёт находить Transform и цель считается отсутствующей.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct TargetRef(pub Option<Entity>);

impl TargetRef {
    pub fn entity(&self) -> Option<Entity> {
        self.0
    }
}
