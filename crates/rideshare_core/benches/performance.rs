//! Performance benchmarks for rideshare_core using Criterion.rs.

use std::num::NonZeroU32;

use bevy_ecs::prelude::Entity;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rideshare_core::geo::Location;
use rideshare_core::matching::{DriverCandidate, MatchingAlgorithm, NearestDriver};
use rideshare_core::runner::run_simulation;
use rideshare_core::scenario::{build_world, Request, ScenarioEvent, SimulationConfig};

/// Spreads requests over a 50x50 grid with a fixed stride pattern so every
/// run sees the same cascade.
fn scenario(drivers: usize, riders: usize) -> Vec<ScenarioEvent> {
    let cell = |i: usize, stride: usize| {
        Location::new(((i * stride) % 50) as i64, ((i * stride / 50) % 50) as i64)
    };
    let mut events = Vec::with_capacity(drivers + riders);
    for i in 0..drivers {
        events.push(ScenarioEvent {
            timestamp: (i % 10) as u64,
            request: Request::Driver {
                id: format!("driver-{i}"),
                location: cell(i, 7),
                speed: NonZeroU32::new(1 + (i % 3) as u32).expect("speed"),
            },
        });
    }
    for i in 0..riders {
        events.push(ScenarioEvent {
            timestamp: (i * 2) as u64,
            request: Request::Rider {
                id: format!("rider-{i}"),
                origin: cell(i, 13),
                destination: cell(i, 29),
                patience: 10 + (i % 20) as u64,
            },
        });
    }
    events
}

fn bench_simulation_run(c: &mut Criterion) {
    let scenarios = vec![("small", 20, 200), ("medium", 100, 1000), ("large", 400, 5000)];

    let mut group = c.benchmark_group("simulation_run");
    for (name, drivers, riders) in scenarios {
        let events = scenario(drivers, riders);
        group.bench_with_input(BenchmarkId::from_parameter(name), &events, |b, events| {
            b.iter(|| {
                let mut world = build_world(events, &SimulationConfig::default());
                black_box(run_simulation(&mut world));
            });
        });
    }
    group.finish();
}

fn bench_nearest_driver(c: &mut Criterion) {
    let speed = NonZeroU32::new(1).expect("speed");
    let candidates: Vec<_> = (0..1000u32)
        .map(|i| DriverCandidate {
            entity: Entity::from_raw(i),
            location: Location::new((i % 37) as i64, (i % 53) as i64),
            speed,
        })
        .collect();
    let pickup = Location::new(20, 20);

    c.bench_function("nearest_driver_1000_candidates", |b| {
        b.iter(|| black_box(NearestDriver.find_match(pickup, &candidates)));
    });
}

criterion_group!(benches, bench_simulation_run, bench_nearest_driver);
criterion_main!(benches);
