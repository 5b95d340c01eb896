//! Behavior integration test
//!
//! Охранник в headless App (AI + headless host), тик = 20ms.
//!
//! Проверяем:
//! - цикл патруля по маршруту
//! - Idle без маршрута / с битым конфигом
//! - Patrol → Follow → Attack и удар с cooldown
//! - цель за спиной не замечается
//! - деспавн цели → возврат в Patrol

use bevy::prelude::*;
use warden_simulation::*;

/// Helper: App с одним шагом прогрева (первый update идёт с нулевой delta)
fn create_behavior_app() -> App {
    let mut app = create_headless_app(42);
    app.update();
    app
}

/// Helper: spawn охранника в начале координат (смотрит в -Z)
fn spawn_guard(app: &mut App, config: AIConfig, waypoints: Vec<Vec3>) -> Entity {
    app.world_mut()
        .spawn((
            AIState::default(),
            config,
            PatrolRoute::new(waypoints),
            Transform::IDENTITY,
        ))
        .id()
}

fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((Player, Transform::from_translation(position)))
        .id()
}

/// Один тик + переходы FSM за этот тик
fn step(app: &mut App) -> Vec<AIStateChanged> {
    app.update();
    app.world_mut()
        .resource_mut::<Events<AIStateChanged>>()
        .drain()
        .collect()
}

fn state_of(app: &App, entity: Entity) -> AIState {
    *app.world().get::<AIState>(entity).expect("guard has AIState")
}

fn nav_of(app: &App, entity: Entity) -> NavAgent {
    app.world().get::<NavAgent>(entity).expect("guard has NavAgent").clone()
}

#[test]
fn test_patrol_cycles_waypoints_in_order() {
    let mut app = create_behavior_app();
    let p0 = Vec3::new(0.0, 0.0, -4.0);
    let p1 = Vec3::new(4.0, 0.0, -4.0);
    let guard = spawn_guard(&mut app, AIConfig::default(), vec![p0, p1]);

    let mut destinations: Vec<Vec3> = Vec::new();
    for _ in 0..1500 {
        let transitions = step(&mut app);
        assert!(transitions.is_empty(), "Без игрока переходов быть не должно: {:?}", transitions);
        assert_eq!(state_of(&app, guard), AIState::Patrol);

        if let Some(destination) = nav_of(&app, guard).destination {
            if destinations.last() != Some(&destination) {
                destinations.push(destination);
            }
        }
    }

    assert!(destinations.len() >= 4, "Маршрут не пройден: {:?}", destinations);
    assert_eq!(&destinations[..4], &[p0, p1, p0, p1]);
}

#[test]
fn test_look_around_at_waypoint() {
    let mut app = create_behavior_app();
    let p0 = Vec3::new(0.0, 0.0, -1.0);
    let guard = spawn_guard(&mut app, AIConfig::default(), vec![p0, Vec3::new(0.0, 0.0, -8.0)]);

    let mut looked = false;
    for _ in 0..100 {
        step(&mut app);
        let animator = app.world().get::<Animator>(guard).expect("guard has Animator");
        if animator.is_clip_active(AnimationClip::Look) {
            looked = true;
            // Пока смотрим по сторонам, агент стоит
            assert!(nav_of(&app, guard).is_stopped);
            break;
        }
    }

    assert!(looked, "Look clip не запустился у waypoint");
}

#[test]
fn test_no_waypoints_stays_idle() {
    let mut app = create_behavior_app();
    let guard = spawn_guard(&mut app, AIConfig::default(), Vec::new());

    for _ in 0..50 {
        step(&mut app);
    }

    assert_eq!(state_of(&app, guard), AIState::Idle);
    let nav = nav_of(&app, guard);
    assert_eq!(nav.destination, None);
    assert!(nav.is_stopped);
    assert_eq!(app.world().get::<Transform>(guard).map(|t| t.translation), Some(Vec3::ZERO));
}

#[test]
fn test_invalid_config_stays_idle() {
    let mut app = create_behavior_app();
    let config = AIConfig {
        attack_cooldown: -1.0,
        ..default()
    };
    let guard = spawn_guard(&mut app, config, vec![Vec3::new(0.0, 0.0, -4.0)]);

    for _ in 0..20 {
        step(&mut app);
    }

    assert_eq!(state_of(&app, guard), AIState::Idle);
    assert_eq!(nav_of(&app, guard).destination, None);
}

#[test]
fn test_close_player_is_followed_then_attacked() {
    let mut app = create_behavior_app();
    spawn_player(&mut app, Vec3::new(0.0, 0.0, -1.0));
    let guard = spawn_guard(&mut app, AIConfig::default(), vec![Vec3::new(0.0, 0.0, 5.0)]);

    let mut transitions = Vec::new();
    for _ in 0..10 {
        transitions.extend(step(&mut app));
    }

    assert_eq!(state_of(&app, guard), AIState::Attack);
    assert!(nav_of(&app, guard).is_stopped);
    let path: Vec<_> = transitions.iter().map(|change| (change.from, change.to)).collect();
    assert_eq!(
        path,
        vec![(AIState::Patrol, AIState::Follow), (AIState::Follow, AIState::Attack)]
    );
    assert!(transitions.iter().all(|change| change.entity == guard));

    // Cooldown 1.5s = 75 тиков → удар
    let mut punched = false;
    for _ in 0..150 {
        step(&mut app);
        let animator = app.world().get::<Animator>(guard).expect("guard has Animator");
        if animator.is_clip_active(AnimationClip::Punch) {
            punched = true;
            break;
        }
    }

    assert!(punched, "Punch так и не сыграл");
    assert_eq!(state_of(&app, guard), AIState::Attack);
}

#[test]
fn test_player_behind_is_not_noticed() {
    let mut app = create_behavior_app();
    spawn_player(&mut app, Vec3::new(0.0, 0.0, 3.0));
    let guard = spawn_guard(
        &mut app,
        AIConfig::default(),
        vec![Vec3::new(0.0, 0.0, -6.0), Vec3::new(0.0, 0.0, -12.0)],
    );

    for _ in 0..300 {
        let transitions = step(&mut app);
        assert!(transitions.is_empty(), "Игрок за спиной замечен: {:?}", transitions);
    }

    assert_eq!(state_of(&app, guard), AIState::Patrol);
}

#[test]
fn test_despawned_player_returns_to_patrol() {
    let mut app = create_behavior_app();
    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, -5.0));
    let waypoint = Vec3::new(0.0, 0.0, 4.0);
    let guard = spawn_guard(&mut app, AIConfig::default(), vec![waypoint]);

    for _ in 0..10 {
        step(&mut app);
        if state_of(&app, guard) != AIState::Patrol {
            break;
        }
    }
    assert_ne!(state_of(&app, guard), AIState::Patrol, "Игрок не замечен");

    app.world_mut().despawn(player);

    let transitions = step(&mut app);
    assert_eq!(state_of(&app, guard), AIState::Patrol);
    assert_eq!(transitions.last().map(|change| change.to), Some(AIState::Patrol));
    assert_eq!(nav_of(&app, guard).destination, Some(waypoint));

    // Цель не перерезолвится
    for _ in 0..200 {
        let transitions = step(&mut app);
        assert!(transitions.is_empty());
    }
    assert_eq!(state_of(&app, guard), AIState::Patrol);
}

#[test]
fn test_attack_ends_when_player_runs_out_of_range() {
    let mut app = create_behavior_app();
    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, -1.5));
    let guard = spawn_guard(&mut app, AIConfig::default(), vec![Vec3::new(0.0, 0.0, 5.0)]);

    for _ in 0..10 {
        step(&mut app);
    }
    assert_eq!(state_of(&app, guard), AIState::Attack);

    // Игрок отходит на 6m (в радиусе detection, за attack range)
    let guard_position = app.world().get::<Transform>(guard).map(|t| t.translation).unwrap_or_default();
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(player) {
        transform.translation = guard_position + Vec3::new(0.0, 0.0, -6.0);
    }

    let transitions = step(&mut app);
    assert_eq!(
        transitions.iter().map(|change| (change.from, change.to)).collect::<Vec<_>>(),
        vec![(AIState::Attack, AIState::Follow)]
    );
    assert!(!nav_of(&app, guard).is_stopped);
}

#[test]
fn test_follow_does_not_flap_when_first_waypoint_is_behind() {
    let mut app = create_behavior_app();
    spawn_player(&mut app, Vec3::new(0.0, 0.0, -5.0));
    // Первая точка за спиной: host поначалу тянет агента от игрока
    let guard = spawn_guard(&mut app, AIConfig::default(), vec![Vec3::new(0.0, 0.0, 5.0)]);

    let mut transitions = Vec::new();
    for _ in 0..60 {
        transitions.extend(step(&mut app));
        if state_of(&app, guard) == AIState::Attack {
            break;
        }
    }

    assert_eq!(
        transitions.iter().map(|change| (change.from, change.to)).collect::<Vec<_>>(),
        vec![(AIState::Patrol, AIState::Follow), (AIState::Follow, AIState::Attack)]
    );
}
