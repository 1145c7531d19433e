//! Criterion benchmarks for the operator-split reaction step.

use clot_bench::{platelet_only_profile, reference_profile, stress_profile};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_step_10k(c: &mut Criterion) {
    let mut sys = reference_profile(42);

    // Warm up: the first step publishes release state
    sys.step(1e-3);

    c.bench_function("step_10k", |b| {
        b.iter(|| {
            let metrics = sys.step(1e-3);
            black_box(metrics.clamped_cells);
        });
    });
}

fn bench_step_10k_platelet_only(c: &mut Criterion) {
    let mut sys = platelet_only_profile(42);
    sys.step(1e-3);

    c.bench_function("step_10k_platelet_only", |b| {
        b.iter(|| {
            let metrics = sys.step(1e-3);
            black_box(metrics.clamped_cells);
        });
    });
}

fn bench_step_100k(c: &mut Criterion) {
    let mut sys = stress_profile(42);
    sys.step(1e-3);

    c.bench_function("step_100k", |b| {
        b.iter(|| {
            let metrics = sys.step(1e-3);
            black_box(metrics.clamped_cells);
        });
    });
}

fn bench_100_steps_10k(c: &mut Criterion) {
    c.bench_function("100_steps_10k", |b| {
        b.iter(|| {
            let mut sys = reference_profile(42);
            for _ in 0..100 {
                black_box(sys.step(1e-3).total_us);
            }
        });
    });
}

criterion_group!(
    benches,
    bench_step_10k,
    bench_step_10k_platelet_only,
    bench_step_100k,
    bench_100_steps_10k
);
criterion_main!(benches);
