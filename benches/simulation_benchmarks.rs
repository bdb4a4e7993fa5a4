//! Solver benchmarks with 95% confidence intervals.
//!
//! Run with: cargo criterion

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use episim::prelude::*;

fn closed_population() -> PopulationState {
    let rates = RateModel::Closed {
        transmission: 4.0,
        recovery: 1.0,
        immunity_loss: 0.5,
    };
    PopulationState::new(300.0, 100.0, 0.0, rates).unwrap()
}

fn open_population() -> PopulationState {
    let rates = RateModel::Open {
        recovery: 1.0,
        immunity_loss: 0.5,
        death: 0.6,
        disease_death: 1.0,
        birth: 1.0,
    };
    PopulationState::new(300.0, 100.0, 0.0, rates).unwrap()
}

/// RK4 integration cost as a function of step count.
fn bench_rk4_integration(c: &mut Criterion) {
    let mut group = c.benchmark_group("RK4");
    group.sample_size(100);
    group.confidence_level(0.95);

    for steps in [365, 3650, 36_500].iter() {
        group.bench_with_input(BenchmarkId::new("closed", steps), steps, |b, &steps| {
            b.iter(|| {
                let mut population = closed_population();
                Rk4Integrator::new()
                    .integrate(&mut population, 0.1, steps)
                    .unwrap();
                black_box(population.last())
            });
        });
        group.bench_with_input(BenchmarkId::new("open", steps), steps, |b, &steps| {
            b.iter(|| {
                let mut population = open_population();
                Rk4Integrator::new()
                    .integrate(&mut population, 0.1, steps)
                    .unwrap();
                black_box(population.last())
            });
        });
    }

    group.finish();
}

/// Monte Carlo cost as a function of sample count, statistics included.
fn bench_monte_carlo_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("MonteCarlo");
    group.sample_size(30);
    group.confidence_level(0.95);

    let population = closed_population();
    let simulator = MonteCarloSimulator::new(&population).unwrap();

    for samples in [10, 50, 100].iter() {
        group.bench_with_input(BenchmarkId::new("solve", samples), samples, |b, &n| {
            b.iter(|| {
                let mut rng = SimRng::new(42);
                let ensemble = simulator.solve(&population, n, 15.0, &mut rng).unwrap();
                black_box(ensemble.statistics.avg_std_dev())
            });
        });
    }

    group.finish();
}

/// Ensemble statistics cost alone, decoupled from path generation.
fn bench_ensemble_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("Statistics");
    group.sample_size(100);
    group.confidence_level(0.95);

    let population = closed_population();
    let simulator = MonteCarloSimulator::new(&population).unwrap();
    let mut rng = SimRng::new(42);
    let ensemble = simulator.solve(&population, 50, 15.0, &mut rng).unwrap();

    group.bench_function("from_trajectories_50", |b| {
        b.iter(|| black_box(EnsembleStatistics::from_trajectories(&ensemble.trajectories).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rk4_integration,
    bench_monte_carlo_solve,
    bench_ensemble_statistics
);
criterion_main!(benches);
