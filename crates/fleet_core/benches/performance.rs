//! Performance benchmarks for fleet_core using Criterion.rs.

use bevy_ecs::prelude::World;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fleet_core::fuzzy::FuzzyController;
use fleet_core::runner::run_scenario;
use fleet_core::scenario::{ArrivalMode, ScenarioParams};

fn bench_simulation_run(c: &mut Criterion) {
    let scenarios = vec![("small", 3), ("medium", 50), ("large", 500)];

    let mut group = c.benchmark_group("simulation_run");
    for (name, fleet_size) in scenarios {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &fleet_size,
            |b, &fleet_size| {
                b.iter(|| {
                    let mut world = World::new();
                    let params = ScenarioParams::default()
                        .with_seed(42)
                        .with_fleet_size(fleet_size)
                        .with_initial_soc(0.30)
                        .with_arrival_mode(ArrivalMode::Poisson { mean_minutes: 1.0 });
                    black_box(run_scenario(&mut world, params).expect("valid scenario"));
                });
            },
        );
    }
    group.finish();
}

fn bench_fuzzy_inference(c: &mut Criterion) {
    let controller = FuzzyController::default();

    let mut group = c.benchmark_group("fuzzy_inference");
    group.bench_function("single_inference", |b| {
        b.iter(|| {
            black_box(controller.infer(black_box(0.35), black_box(42.0)));
        });
    });
    group.bench_function("soc_sweep_1000", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..1000 {
                acc += controller.infer(i as f64 / 1000.0, 50.0);
            }
            black_box(acc)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_simulation_run, bench_fuzzy_inference);
criterion_main!(benches);
