//! Movement компоненты: контракт навигатора и его ECS-представление
//!
//! Архитектура:
//! - AI пишет intent (destination, stopped, speed)
//! - Host (NavMesh агент движка или headless host) читает intent,
//!   считает путь и заполняет velocity / remaining_distance / path status

use bevy::prelude::*;

/// Контракт навигатора (pathfinding делегирован host'у)
///
/// Controller только параметризует и опрашивает навигатор, путь сам не считает.
pub trait Navigator {
    fn set_destination(&mut self, destination: Vec3);
    /// Остановить / продолжить движение. Остановка сбрасывает velocity.
    fn set_stopped(&mut self, stopped: bool);
    fn set_speed(&mut self, speed: f32);
    fn velocity(&self) -> Vec3;
    fn has_path(&self) -> bool;
    fn path_pending(&self) -> bool;
    fn remaining_distance(&self) -> f32;
}

/// Состояние навигационного агента (аналог NavMeshAgent)
///
/// Поля intent пишет AI, поля status пишет host.
/// Новая destination помечает путь как pending до следующего host тика.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    // --- intent (AI → host) ---
    pub destination: Option<Vec3>,
    pub is_stopped: bool,
    /// Максимальная скорость (м/с)
    pub speed: f32,
    /// Скорость поворота по направлению движения (градусы/с)
    pub angular_speed: f32,

    // --- status (host → AI) ---
    pub velocity: Vec3,
    pub has_path: bool,
    pub path_pending: bool,
    pub remaining_distance: f32,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            destination: None,
            is_stopped: true,
            speed: 2.0,
            angular_speed: 120.0,
            velocity: Vec3::ZERO,
            has_path: false,
            path_pending: false,
            remaining_distance: 0.0,
        }
    }
}

impl Navigator for NavAgent {
    fn set_destination(&mut self, destination: Vec3) {
        // FollowEntity обновляет destination каждый тик: не перезапускаем
        // path resolution если точка не изменилась
        if self.destination == Some(destination) && self.has_path {
            return;
        }
        self.destination = Some(destination);
        self.path_pending = true;
    }

    fn set_stopped(&mut self, stopped: bool) {
        self.is_stopped = stopped;
        if stopped {
            self.velocity = Vec3::ZERO;
        }
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn has_path(&self) -> bool {
        self.has_path
    }

    fn path_pending(&self) -> bool {
        self.path_pending
    }

    fn remaining_distance(&self) -> f32 {
        self.remaining_distance
    }
}
