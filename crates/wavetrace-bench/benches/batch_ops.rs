//! Criterion benchmarks for the batch driver.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use wavetrace_bench::{reference_scenario, stress_scenario};
use wavetrace_engine::{BatchDriver, Parallelism};

/// Benchmark: 64 rays, sequential against the rayon pool.
fn bench_reference_batch(c: &mut Criterion) {
    let s = reference_scenario(42);
    let mut group = c.benchmark_group("reference_batch_64");

    for (name, parallelism) in [
        ("sequential", Parallelism::Sequential),
        ("auto", Parallelism::Auto),
    ] {
        let driver = BatchDriver::new(s.system()).with_parallelism(parallelism);
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| black_box(driver.run_many(&s.rays, s.duration, s.step_size)));
        });
    }
    group.finish();
}

/// Benchmark: 1024 rays on the stress grid with the rayon pool.
fn bench_stress_batch(c: &mut Criterion) {
    let s = stress_scenario(42);
    let driver = BatchDriver::new(s.system());

    let mut group = c.benchmark_group("stress_batch");
    group.sample_size(10);
    group.bench_function("auto_1024", |b| {
        b.iter(|| black_box(driver.run_many(&s.rays, s.duration, s.step_size)));
    });
    group.finish();
}

criterion_group!(benches, bench_reference_batch, bench_stress_batch);
criterion_main!(benches);
