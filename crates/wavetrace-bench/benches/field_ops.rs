//! Criterion micro-benchmarks for field sampling.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use wavetrace_bench::reference_scenario;
use wavetrace_field::{Bathymetry, Current};

/// Deterministic sample points spread over the 2 km reference square.
fn sample_points(n: u64) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let x = (i.wrapping_mul(6364136223846793007) % 2000) as f64 + 0.25;
            let y = (i.wrapping_mul(1442695040888963407) % 2000) as f64 + 0.75;
            (x.min(2000.0), y.min(2000.0))
        })
        .collect()
}

/// Benchmark: Bilinear depth plus gradient at 1000 points.
fn bench_depth_and_gradient(c: &mut Criterion) {
    let s = reference_scenario(42);
    let points = sample_points(1000);

    c.bench_function("depth_and_gradient_1k", |b| {
        b.iter(|| {
            for &(x, y) in &points {
                black_box(s.bathymetry.depth_and_gradient(x, y).ok());
            }
        });
    });
}

/// Benchmark: Current velocity plus gradient at 1000 points.
fn bench_current_and_gradient(c: &mut Criterion) {
    let s = reference_scenario(42);
    let points = sample_points(1000);
    let Some(current) = s.current.as_ref() else {
        return;
    };

    c.bench_function("current_and_gradient_1k", |b| {
        b.iter(|| {
            for &(x, y) in &points {
                black_box(current.current_and_gradient(x, y).ok());
            }
        });
    });
}

criterion_group!(benches, bench_depth_and_gradient, bench_current_and_gradient);
criterion_main!(benches);
