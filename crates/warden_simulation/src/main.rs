//! Headless симуляция Warden
//!
//! Охранник патрулирует квадрат, игрок блуждает по арене.
//! Выводит переходы FSM и сводку по состояниям.

use bevy::prelude::*;
use std::collections::HashMap;
use warden_simulation::{
    create_headless_app, log_info, AIConfig, AIState, AIStateChanged, PatrolRoute, Player, Wander,
};

const TICK_COUNT: usize = 3000;

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting Warden headless simulation (seed: {})", seed));

    app.world_mut().spawn((
        Player,
        Wander {
            center: Vec3::ZERO,
            radius: 10.0,
            speed: 1.5,
        },
        Transform::from_xyz(8.0, 0.0, 8.0),
    ));

    let guard = app
        .world_mut()
        .spawn((
            AIState::default(),
            AIConfig::default(),
            PatrolRoute::new([
                Vec3::new(-6.0, 0.0, -6.0),
                Vec3::new(6.0, 0.0, -6.0),
                Vec3::new(6.0, 0.0, 6.0),
                Vec3::new(-6.0, 0.0, 6.0),
            ]),
            Transform::from_xyz(-6.0, 0.0, 0.0),
        ))
        .id();

    // Сколько тиков агент провёл в каждом состоянии
    let mut ticks_in_state: HashMap<AIState, usize> = HashMap::new();
    let mut transitions = 0;

    for tick in 0..TICK_COUNT {
        app.update();

        transitions += app
            .world_mut()
            .resource_mut::<Events<AIStateChanged>>()
            .drain()
            .count();

        let Some(state) = app.world().get::<AIState>(guard).copied() else {
            break;
        };
        *ticks_in_state.entry(state).or_default() += 1;

        if tick % 500 == 0 {
            let position = app
                .world()
                .get::<Transform>(guard)
                .map(|transform| transform.translation)
                .unwrap_or_default();
            log_info(&format!("Tick {}: guard {} at {:?}", tick, state.as_str(), position));
        }
    }

    let mut summary: Vec<_> = ticks_in_state.into_iter().collect();
    summary.sort_by_key(|(state, _)| state.as_str());
    for (state, ticks) in summary {
        log_info(&format!("  {}: {} ticks", state.as_str(), ticks));
    }
    log_info(&format!("Simulation complete! {} transitions", transitions));
}
