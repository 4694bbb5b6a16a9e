//! Тесты детерминизма
//!
//! Один seed → один и тот же roam/chase/teleport путь охотника

use bevy::prelude::*;
use pursuer_simulation::*;

const TICK_COUNT: usize = 900;

/// Запускает полную сцену и возвращает snapshot мира
fn run_simulation(seed: u64) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, DriversPlugin))
        .insert_resource(Navigation::new(FlatNavArea::square(60.0)));

    let config = PursuerConfig {
        teleport_chance: 0.5,
        ..Default::default()
    };
    app.world_mut()
        .spawn(pursuer_bundle(Vec3::ZERO, Vec3::NEG_Z, config));
    // Игрок сзади: сначала roam к нему, погоня когда попадёт в FOV
    app.world_mut()
        .spawn(player_bundle(Vec3::new(4.0, 0.0, 35.0), Vec3::Z));
    app.world_mut()
        .spawn(player_bundle(Vec3::new(-25.0, 0.0, -5.0), Vec3::NEG_X));
    app.world_mut()
        .spawn(occluder_bundle(Vec3::new(0.0, 1.5, 15.0), Vec3::new(2.0, 2.0, 0.5)));

    for _ in 0..TICK_COUNT {
        app.update();
    }

    let mut snapshot = world_snapshot::<Transform>(app.world_mut());
    snapshot.extend(world_snapshot::<PursuerState>(app.world_mut()));
    snapshot.extend(world_snapshot::<MovementCommand>(app.world_mut()));
    snapshot
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let snapshot1 = run_simulation(SEED);
    let snapshot2 = run_simulation(SEED);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_replication_sequence_is_reproducible() {
    fn published(seed: u64) -> Vec<PursuerState> {
        use std::sync::{Arc, Mutex};

        let mut app = create_headless_app(seed);
        app.add_plugins((SimulationPlugin, DriversPlugin))
            .insert_resource(Navigation::new(FlatNavArea::square(60.0)));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut channel = ReplicationChannel::default();
        channel.add_observer(ObserverMirror::new(move |_, _, state| {
            sink.lock().expect("sink").push(state);
        }));
        app.insert_resource(channel);

        app.world_mut()
            .spawn(pursuer_bundle(Vec3::ZERO, Vec3::NEG_Z, PursuerConfig::default()));
        app.world_mut()
            .spawn(player_bundle(Vec3::new(0.0, 0.0, 28.0), Vec3::Z));

        for _ in 0..TICK_COUNT {
            app.update();
        }

        let states = seen.lock().expect("seen").clone();
        states
    }

    let first = published(7);
    assert!(!first.is_empty());
    assert_eq!(first, published(7));
}
