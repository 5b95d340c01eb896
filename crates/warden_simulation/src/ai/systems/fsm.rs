//! FSM AI systems (initialization, per-tick behavior).

use bevy::prelude::*;
use bevy_rapier3d::prelude::ReadRapierContext;

use crate::ai::controller::{BehaviorController, StateTransition};
use crate::ai::detection::{Detector, LineOfSight, RapierLineOfSight, SensedTarget, Unobstructed};
use crate::ai::{AIConfig, AIState, AIStateChanged, BehaviorMemory, PatrolRoute, TargetRef};
use crate::components::{Animator, NavAgent, Player};

/// Система: инициализация новых агентов
///
/// Один раз на агента (Added<AIState>):
/// - резолвим цель по тегу Player (отсутствие — валидный результат, навсегда)
/// - валидируем конфиг и маршрут, выдаём первую точку патруля
/// - ошибка конфигурации логируется один раз, агент остаётся в Idle
pub fn initialize_agents(
    mut agents: Query<
        (
            Entity,
            &mut AIState,
            &mut PatrolRoute,
            &mut BehaviorMemory,
            &AIConfig,
            &mut TargetRef,
            &mut NavAgent,
            &mut Animator,
        ),
        Added<AIState>,
    >,
    players: Query<Entity, With<Player>>,
) {
    for (entity, mut state, mut route, mut memory, config, mut target, mut nav, mut animator) in agents.iter_mut() {
        let mut found = players.iter();
        target.0 = found.next();

        match target.0 {
            Some(player) => {
                if found.next().is_some() {
                    crate::log_warning(&format!(
                        "AI: {:?} found several Player entities, tracking {:?}",
                        entity, player
                    ));
                }
            }
            None => {
                crate::log_info(&format!("AI: {:?} no Player found, target will never be visible", entity));
            }
        }

        let controller = BehaviorController::new(
            &mut *state,
            &mut *route,
            &mut *memory,
            config,
            &mut *nav,
            &mut *animator,
        );

        match controller.start() {
            Ok(()) => crate::log(&format!(
                "AI: {:?} spawned → Patrol ({} waypoints)",
                entity,
                route.len()
            )),
            Err(error) => crate::log_error(&format!(
                "AI: {:?} configuration error: {} → Idle",
                entity, error
            )),
        }
    }
}

/// Система: один тик FSM для всех агентов
///
/// Для каждого агента собирает Detector (поза на начало тика, цель,
/// line-of-sight) и прогоняет BehaviorController.
/// Без Rapier контекста occlusion не проверяется (геометрии нет).
pub fn ai_behavior_tick(
    mut agents: Query<(
        Entity,
        &mut AIState,
        &mut PatrolRoute,
        &mut BehaviorMemory,
        &AIConfig,
        &TargetRef,
        &mut Transform,
        &mut NavAgent,
        &mut Animator,
    )>,
    targets: Query<&Transform, Without<AIState>>,
    physics: ReadRapierContext,
    mut state_changes: EventWriter<AIStateChanged>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let rapier_context = physics.single().ok();

    for (entity, mut state, mut route, mut memory, config, target, mut transform, mut nav, mut animator) in
        agents.iter_mut()
    {
        // Weak reference: деспавненная цель = цели нет
        let sensed = target.entity().and_then(|target_entity| {
            targets.get(target_entity).ok().map(|target_transform| SensedTarget {
                entity: target_entity,
                position: target_transform.translation,
            })
        });

        let rapier_los;
        let line_of_sight: &dyn LineOfSight = match rapier_context.as_ref() {
            Some(context) => {
                rapier_los = RapierLineOfSight { context, observer: entity };
                &rapier_los
            }
            None => &Unobstructed,
        };
        let detector = Detector::new(&transform, config, sensed, line_of_sight);

        let controller = BehaviorController::new(
            &mut *state,
            &mut *route,
            &mut *memory,
            config,
            &mut *nav,
            &mut *animator,
        );

        if let Some(StateTransition { from, to }) = controller.tick(&mut *transform, &detector, delta) {
            crate::log(&format!("AI: {:?} {} → {}", entity, from.as_str(), to.as_str()));
            state_changes.write(AIStateChanged { entity, from, to });
        }
    }
}
