//! Headless host — замена движка для тестов и headless binary
//!
//! В игре NavAgent / Animator синхронизирует bridge движка
//! (NavMesh агент, AnimationTree). Здесь — минимальная детерминированная версия:
//! - navigation: движение по прямой, блуждание игрока
//! - animation: clips по таймеру

use bevy::prelude::*;

use crate::ai::BehaviorSet;
use crate::DeterministicRng;

pub mod animation;
pub mod navigation;

pub use animation::{advance_animator, ClipDurations};
pub use navigation::Wander;

/// Host Plugin
///
/// Системы в FixedUpdate после AI (BehaviorSet::Host):
/// 1. wander_players — новые точки для блуждающего игрока
/// 2. drive_nav_agents — движение по прямой
/// 3. play_animator_clips — cues → clips
pub struct HeadlessHostPlugin;

impl Plugin for HeadlessHostPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(0));
        }

        app.init_resource::<ClipDurations>()
            .register_type::<Wander>()
            .add_systems(
                FixedUpdate,
                (
                    navigation::wander_players,
                    navigation::drive_nav_agents,
                    animation::play_animator_clips,
                )
                    .chain()
                    .in_set(BehaviorSet::Host),
            );
    }
}
