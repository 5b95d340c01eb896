//! Detector — "вижу ли я цель?" и "где цель?"
//!
//! Проверки по возрастанию стоимости:
//! 1. цель резолвлена
//! 2. distance <= detection_range
//! 3. vision cone (dot product против cos(fov / 2))
//! 4. line-of-sight raycast с высоты головы до цели
//!
//! Каждый вызов `can_see_target()` считает всё заново (без кэша).

use bevy::prelude::*;
use bevy_rapier3d::prelude::{QueryFilter, RapierContext};

/// Высота точки обзора над позицией агента (метры)
pub const EYE_HEIGHT: f32 = 1.0;

/// То, что FSM знает о цели
pub trait Perception {
    fn can_see_target(&self) -> bool;
    /// Позиция цели (None — цели нет или она деспавнена)
    fn target_position(&self) -> Option<Vec3>;
}

/// Ray query к геометрии сцены
///
/// Возвращает entity первого пересечения в пределах `max_distance`.
pub trait LineOfSight {
    fn first_hit(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<Entity>;
}

/// Сцена без геометрии (headless без физики)
pub struct Unobstructed;

impl LineOfSight for Unobstructed {
    fn first_hit(&self, _origin: Vec3, _direction: Dir3, _max_distance: f32) -> Option<Entity> {
        None
    }
}

/// Line-of-sight через Rapier query pipeline
///
/// Коллайдер самого наблюдателя исключён: луч стартует внутри его капсулы.
pub struct RapierLineOfSight<'a, 'w> {
    pub context: &'a RapierContext<'w>,
    pub observer: Entity,
}

impl LineOfSight for RapierLineOfSight<'_, '_> {
    fn first_hit(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<Entity> {
        let filter = QueryFilter::default().exclude_collider(self.observer);
        self.context
            .cast_ray(origin, direction.as_vec3(), max_distance, true, filter)
            .map(|(entity, _toi)| entity)
    }
}

/// Цель, какой её видит detector в этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensedTarget {
    pub entity: Entity,
    pub position: Vec3,
}

/// Detector одного агента на один тик
///
/// Поза агента — снимок на начало тика.
pub struct Detector<'a> {
    position: Vec3,
    forward: Vec3,
    detection_range: f32,
    fov_cos_threshold: f32,
    target: Option<SensedTarget>,
    line_of_sight: &'a dyn LineOfSight,
}

impl<'a> Detector<'a> {
    pub fn new(
        agent: &Transform,
        config: &crate::ai::AIConfig,
        target: Option<SensedTarget>,
        line_of_sight: &'a dyn LineOfSight,
    ) -> Self {
        Self {
            position: agent.translation,
            forward: agent.forward().as_vec3(),
            detection_range: config.detection_range,
            fov_cos_threshold: config.fov_cos_threshold(),
            target,
            line_of_sight,
        }
    }

    /// Weak handle на цель
    pub fn target(&self) -> Option<Entity> {
        self.target.map(|target| target.entity)
    }
}

impl Perception for Detector<'_> {
    fn can_see_target(&self) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let displacement = target.position - self.position;
        let distance = displacement.length();
        if distance > self.detection_range {
            return false;
        }

        // NOTE: 3D направление против горизонтального порога — вертикальный
        // наклон тоже "съедает" угол. Оставлено как есть.
        // distance == 0: направление не определено → dot = 0
        let dot = self.forward.normalize_or_zero().dot(displacement.normalize_or_zero());
        if dot < self.fov_cos_threshold {
            return false;
        }

        // Луч ровно до цели: геометрия за целью не должна её закрывать
        let ray_origin = self.position + Vec3::Y * EYE_HEIGHT;
        let to_target = target.position - ray_origin;
        let ray_distance = to_target.length();
        let Ok(direction) = Dir3::new(to_target) else {
            // Цель в точке глаз — закрыть нечем
            return true;
        };

        match self.line_of_sight.first_hit(ray_origin, direction, ray_distance) {
            Some(hit) => hit == target.entity,
            None => true,
        }
    }

    fn target_position(&self) -> Option<Vec3> {
        self.target.map(|target| target.position)
    }
}
