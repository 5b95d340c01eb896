//! Actor компоненты

use bevy::prelude::*;

/// Тег игрока — цель, которую ищут AI агенты
///
/// Target resolution: агент ищет entity с этим тегом один раз при инициализации.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Player;
