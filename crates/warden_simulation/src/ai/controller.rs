//! BehaviorController — FSM Patrol → Follow → Attack
//!
//! Не знает про ECS: работает с данными агента и двумя коллабораторами
//! (Navigator, AnimationDriver) через трейты. ECS система собирает
//! controller на каждый тик (см. `ai::systems::ai_behavior_tick`).
//!
//! Clean triggers: любой переход проходит через `transition_to`, который
//! сбрасывает все pending cues и флаги фазы.

use bevy::prelude::*;

use crate::ai::detection::Perception;
use crate::ai::{AIConfig, AIState, BehaviorMemory, ConfigError, PatrolRoute};
use crate::components::{AnimationClip, AnimationCue, AnimationDriver, Navigator};

/// Дистанция "дошли до waypoint" (метры)
pub const ARRIVAL_DISTANCE: f32 = 0.5;

/// Progress "look" clip'а, после которого идём к следующей точке
pub const LOOK_COMPLETE_PROGRESS: f32 = 0.95;

/// Переход FSM за тик
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: AIState,
    pub to: AIState,
}

pub struct BehaviorController<'a, N: Navigator, A: AnimationDriver> {
    pub state: &'a mut AIState,
    pub route: &'a mut PatrolRoute,
    pub memory: &'a mut BehaviorMemory,
    pub config: &'a AIConfig,
    pub navigator: &'a mut N,
    pub animator: &'a mut A,
    transition: Option<StateTransition>,
}

impl<'a, N: Navigator, A: AnimationDriver> BehaviorController<'a, N, A> {
    pub fn new(
        state: &'a mut AIState,
        route: &'a mut PatrolRoute,
        memory: &'a mut BehaviorMemory,
        config: &'a AIConfig,
        navigator: &'a mut N,
        animator: &'a mut A,
    ) -> Self {
        Self {
            state,
            route,
            memory,
            config,
            navigator,
            animator,
            transition: None,
        }
    }

    /// Старт агента: Patrol к первой точке или Idle при ошибке конфигурации
    pub fn start(mut self) -> Result<(), ConfigError> {
        *self.memory = BehaviorMemory::default();
        self.clear_cues();

        let validation = self
            .config
            .validate()
            .and_then(|_| if self.route.is_empty() { Err(ConfigError::NoWaypoints) } else { Ok(()) });

        match validation {
            Ok(()) => {
                *self.state = AIState::Patrol;
                self.go_to_next_patrol_point();
                Ok(())
            }
            Err(error) => {
                *self.state = AIState::Idle;
                self.hold_position();
                Err(error)
            }
        }
    }

    /// Один тик FSM. Возвращает переход, если он случился.
    pub fn tick(
        mut self,
        transform: &mut Transform,
        perception: &impl Perception,
        delta: f32,
    ) -> Option<StateTransition> {
        match *self.state {
            AIState::Idle => self.idle(perception),
            AIState::Patrol => self.patrol(perception),
            AIState::Follow => self.follow(transform.translation, perception),
            AIState::Attack => self.attack(transform, perception, delta),
        }
        self.transition
    }

    // ============ IDLE ============

    fn idle(&mut self, perception: &impl Perception) {
        if perception.can_see_target() {
            self.transition_to(AIState::Follow);
            return;
        }
        self.hold_position();
    }

    // ============ PATROL ============

    fn patrol(&mut self, perception: &impl Perception) {
        if perception.can_see_target() {
            self.transition_to(AIState::Follow);
            return;
        }

        if self.memory.is_waiting {
            self.look_around();
        } else {
            self.walk_route();
        }
    }

    fn look_around(&mut self) {
        self.navigator.set_stopped(true);
        self.animator.set_locomotion_speed(0.0);

        if !self.memory.cue_issued {
            self.animator.fire_cue(AnimationCue::Look);
            self.memory.cue_issued = true;
        }

        if self.animator.is_clip_active(AnimationClip::Look)
            && self.animator.normalized_time() >= LOOK_COMPLETE_PROGRESS
        {
            self.clear_cues();
            self.memory.is_waiting = false;
            self.go_to_next_patrol_point();
        }
    }

    fn walk_route(&mut self) {
        self.navigator.set_stopped(false);
        self.navigator.set_speed(self.config.walk_speed);
        self.animator.set_locomotion_speed(self.navigator.velocity().length());

        if self.navigator.has_path()
            && !self.navigator.path_pending()
            && self.navigator.remaining_distance() < ARRIVAL_DISTANCE
        {
            self.memory.is_waiting = true;
            self.memory.cue_issued = false;
        }
    }

    // ============ FOLLOW ============

    fn follow(&mut self, position: Vec3, perception: &impl Perception) {
        self.navigator.set_stopped(false);
        self.navigator.set_speed(self.config.run_speed);
        self.clear_cues();
        self.animator.set_locomotion_speed(self.navigator.velocity().length());

        let Some(target) = perception.target_position() else {
            self.return_to_patrol();
            return;
        };

        self.navigator.set_destination(target);

        if position.distance(target) <= self.config.attack_range {
            self.transition_to(AIState::Attack);
        } else if !perception.can_see_target() {
            self.return_to_patrol();
        }
    }

    // ============ ATTACK ============

    fn attack(&mut self, transform: &mut Transform, perception: &impl Perception, delta: f32) {
        self.navigator.set_stopped(true);
        self.animator.set_locomotion_speed(0.0);

        let Some(target) = perception.target_position() else {
            self.return_to_patrol();
            return;
        };

        face_target(transform, target, delta, self.config.rotation_speed);

        self.memory.attack_timer += delta;
        // Не перезапускаем удар пока "punch" ещё играет, даже если cooldown снова истёк
        if self.memory.attack_timer >= self.config.attack_cooldown
            && !self.animator.is_clip_active(AnimationClip::Punch)
        {
            self.animator.fire_cue(AnimationCue::Punch);
            self.memory.attack_timer = 0.0;
        }

        if transform.translation.distance(target) > self.config.attack_range {
            self.transition_to(AIState::Follow);
        }
    }

    // ============ ПЕРЕХОДЫ ============

    /// Patrol только для агента, который смог бы стартовать патруль
    fn return_to_patrol(&mut self) {
        let can_patrol = !self.route.is_empty() && self.config.validate().is_ok();
        let next = if can_patrol { AIState::Patrol } else { AIState::Idle };
        self.transition_to(next);
    }

    fn transition_to(&mut self, next: AIState) {
        let from = *self.state;

        self.clear_cues();
        self.memory.is_waiting = false;
        if from == AIState::Attack || next == AIState::Attack {
            self.memory.attack_timer = 0.0;
        }

        *self.state = next;
        match next {
            AIState::Idle => self.hold_position(),
            AIState::Patrol => self.go_to_next_patrol_point(),
            AIState::Follow => {
                self.navigator.set_stopped(false);
                self.navigator.set_speed(self.config.run_speed);
            }
            AIState::Attack => {
                self.navigator.set_stopped(true);
                self.animator.set_locomotion_speed(0.0);
            }
        }

        self.transition = Some(StateTransition { from, to: next });
    }

    // ============ УТИЛИТЫ ============

    /// Сброс всех one-shot cues (чтобы не было "фантомных" триггеров)
    fn clear_cues(&mut self) {
        for cue in AnimationCue::ALL {
            self.animator.clear_cue(cue);
        }
        self.memory.cue_issued = false;
    }

    fn go_to_next_patrol_point(&mut self) {
        let Some(point) = self.route.advance() else {
            return;
        };
        self.navigator.set_stopped(false);
        self.navigator.set_destination(point);
    }

    fn hold_position(&mut self) {
        self.navigator.set_stopped(true);
        self.animator.set_locomotion_speed(0.0);
    }
}

/// Ориентация, смотрящая вдоль горизонтального направления (forward = -Z)
pub fn facing_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat == Vec3::ZERO {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

/// Плавный поворот к цели в горизонтальной плоскости
///
/// Доля разрыва за тик = delta * rotation_speed (clamp в 0..1), не snap.
pub fn face_target(transform: &mut Transform, target: Vec3, delta: f32, rotation_speed: f32) {
    // Цель строго сверху/снизу → не поворачиваемся
    let Some(look_rotation) = facing_rotation(target - transform.translation) else {
        return;
    };
    let t = (delta * rotation_speed).clamp(0.0, 1.0);
    transform.rotation = transform.rotation.slerp(look_rotation, t);
}
