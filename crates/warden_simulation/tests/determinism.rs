//! Тесты детерминизма
//!
//! Проверяем что симуляция с одинаковым seed даёт идентичные результаты

use bevy::prelude::*;
use warden_simulation::*;

const TICK_COUNT: usize = 1500;

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let snapshot1 = run_simulation(SEED, TICK_COUNT);
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    // Запускаем 3 раза — все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seeds_move_player_differently() {
    let mut first = build_scenario(1);
    let mut second = build_scenario(2);

    for _ in 0..200 {
        first.update();
        second.update();
    }

    // Маршрут охранника одинаковый, точки блуждания игрока — нет
    assert_ne!(
        world_snapshot::<NavAgent>(first.world_mut()),
        world_snapshot::<NavAgent>(second.world_mut())
    );
}

/// Охранник + блуждающий игрок
fn build_scenario(seed: u64) -> App {
    let mut app = create_headless_app(seed);

    app.world_mut().spawn((
        Player,
        Wander {
            center: Vec3::ZERO,
            radius: 8.0,
            speed: 1.5,
        },
        Transform::from_xyz(6.0, 0.0, 6.0),
    ));
    app.world_mut().spawn((
        AIState::default(),
        AIConfig::default(),
        PatrolRoute::new([
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(5.0, 0.0, -5.0),
            Vec3::new(5.0, 0.0, 5.0),
        ]),
        Transform::from_xyz(-5.0, 0.0, 0.0),
    ));

    app
}

/// Запускает симуляцию и возвращает snapshot мира
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = build_scenario(seed);

    for _ in 0..tick_count {
        app.update();
    }

    let mut snapshot = world_snapshot::<Transform>(app.world_mut());
    snapshot.extend(world_snapshot::<AIState>(app.world_mut()));
    snapshot.extend(world_snapshot::<BehaviorMemory>(app.world_mut()));
    snapshot
}
