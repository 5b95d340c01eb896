//! Headless навигация: прямая линия вместо NavMesh
//!
//! Путь "находится" за один host тик, агент едет по прямой к destination
//! со скоростью `speed` и поворачивается по направлению движения
//! не быстрее `angular_speed`.

use bevy::prelude::*;

use crate::ai::controller::{facing_rotation, ARRIVAL_DISTANCE};
use crate::components::{NavAgent, Navigator};
use crate::DeterministicRng;

/// Игрок в headless режиме: случайные точки вокруг центра
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(NavAgent)]
pub struct Wander {
    pub center: Vec3,
    /// Полуразмер квадрата блуждания (метры)
    pub radius: f32,
    pub speed: f32,
}

impl Default for Wander {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 8.0,
            speed: 1.5,
        }
    }
}

/// Система: выдать новую случайную точку тем, кто дошёл
pub fn wander_players(
    mut walkers: Query<(&Wander, &mut NavAgent)>,
    mut rng: ResMut<DeterministicRng>,
) {
    use rand::Rng;

    for (wander, mut nav) in walkers.iter_mut() {
        let arrived = nav.has_path() && !nav.path_pending() && nav.remaining_distance() < ARRIVAL_DISTANCE;
        if nav.destination.is_some() && !arrived {
            continue;
        }

        let offset = Vec3::new(
            rng.rng.gen_range(-wander.radius..=wander.radius),
            0.0,
            rng.rng.gen_range(-wander.radius..=wander.radius),
        );
        nav.set_speed(wander.speed);
        nav.set_stopped(false);
        nav.set_destination(wander.center + offset);
    }
}

/// Система: движение NavAgent'ов к destination
pub fn drive_nav_agents(
    mut agents: Query<(&mut Transform, &mut NavAgent)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut nav) in agents.iter_mut() {
        let Some(destination) = nav.destination else {
            nav.velocity = Vec3::ZERO;
            continue;
        };

        if nav.path_pending {
            nav.path_pending = false;
            nav.has_path = true;
        }

        let to_destination = destination - transform.translation;
        let distance = to_destination.length();

        if nav.is_stopped || distance <= f32::EPSILON || delta <= 0.0 {
            nav.velocity = Vec3::ZERO;
            nav.remaining_distance = distance;
            continue;
        }

        let direction = to_destination / distance;
        let step = (nav.speed * delta).min(distance);

        transform.translation += direction * step;
        nav.velocity = direction * (step / delta);
        nav.remaining_distance = distance - step;

        if let Some(rotation) = facing_rotation(direction) {
            let max_angle = nav.angular_speed.to_radians() * delta;
            transform.rotation = turn_towards(transform.rotation, rotation, max_angle);
        }
    }
}

/// Поворот не больше чем на `max_angle` радиан за вызов
pub fn turn_towards(current: Quat, target: Quat, max_angle: f32) -> Quat {
    let angle = current.angle_between(target);
    if angle <= max_angle || angle <= f32::EPSILON {
        return target;
    }
    current.slerp(target, (max_angle / angle).max(0.0))
}
