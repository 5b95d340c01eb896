//! FSM AI components (state machine, config, patrol route, memory).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{Animator, NavAgent};
use super::TargetRef;

/// AI FSM состояния
///
/// Ровно одно состояние активно (enum), переходы — только через
/// `BehaviorController::transition_to`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[require(AIConfig, PatrolRoute, BehaviorMemory, TargetRef, NavAgent, Animator, Transform)]
pub enum AIState {
    /// Idle — нет валидного маршрута: стоим на месте, но на игрока реагируем
    Idle,

    /// Patrol — обход waypoints с паузой "Look" на каждой точке
    #[default]
    Patrol,

    /// Follow — бежим к игроку пока видим его
    Follow,

    /// Attack — стоим, поворачиваемся к игроку, бьём по cooldown
    Attack,
}

impl AIState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AIState::Idle => "Idle",
            AIState::Patrol => "Patrol",
            AIState::Follow => "Follow",
            AIState::Attack => "Attack",
        }
    }
}

/// Ошибки конфигурации (логируются один раз при инициализации агента)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("no patrol waypoints assigned")]
    NoWaypoints,

    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("attack_cooldown must be a finite non-negative number, got {0}")]
    InvalidCooldown(f32),

    #[error("field_of_view must be within (0, 360] degrees, got {0}")]
    InvalidFieldOfView(f32),
}

/// Параметры AI (задаются при спавне, дальше не меняются)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AIConfig {
    /// Дистанция перехода в Attack (метры)
    pub attack_range: f32,
    /// Пауза между ударами (секунды)
    pub attack_cooldown: f32,
    /// Скорость патруля (м/с)
    pub walk_speed: f32,
    /// Скорость преследования (м/с)
    pub run_speed: f32,
    /// Скорость поворота к цели в Attack (доля разрыва в секунду)
    pub rotation_speed: f32,
    /// Радиус обнаружения (метры)
    pub detection_range: f32,
    /// Полный угол vision cone (градусы)
    pub field_of_view: f32,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            attack_range: 2.0,
            attack_cooldown: 1.5,
            walk_speed: 2.0,
            run_speed: 5.0,
            rotation_speed: 5.0,
            detection_range: 10.0,
            field_of_view: 90.0,
        }
    }
}

impl AIConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("attack_range", self.attack_range),
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("rotation_speed", self.rotation_speed),
            ("detection_range", self.detection_range),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if !(self.attack_cooldown.is_finite() && self.attack_cooldown >= 0.0) {
            return Err(ConfigError::InvalidCooldown(self.attack_cooldown));
        }

        if !(self.field_of_view > 0.0 && self.field_of_view <= 360.0) {
            return Err(ConfigError::InvalidFieldOfView(self.field_of_view));
        }

        Ok(())
    }

    /// cos(fov / 2) — порог dot product для vision cone
    pub fn fov_cos_threshold(&self) -> f32 {
        (self.field_of_view * 0.5).to_radians().cos()
    }
}

/// Маршрут патруля
///
/// Waypoints — позиции (агент не владеет entity точек).
/// Инвариант: `next_index < waypoints.len()` для непустого маршрута.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    waypoints: Vec<Vec3>,
    next_index: usize,
}

impl PatrolRoute {
    pub fn new(waypoints: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            waypoints: waypoints.into_iter().collect(),
            next_index: 0,
        }
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Индекс точки, которая будет выдана следующим `advance()`
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Выдать следующую точку и сдвинуть индекс (с wrap)
    pub fn advance(&mut self) -> Option<Vec3> {
        let point = *self.waypoints.get(self.next_index)?;
        self.next_index = (self.next_index + 1) % self.waypoints.len();
        Some(point)
    }
}

/// Рабочая память FSM
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BehaviorMemory {
    /// Накопленное время в Attack с последнего удара (секунды)
    pub attack_timer: f32,
    /// Patrol: дошли до waypoint и ждём окончания "Look"
    pub is_waiting: bool,
    /// One-shot cue уже выдан в текущей фазе (не спамим trigger каждый тик)
    pub cue_issued: bool,
}
