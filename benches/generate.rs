//! Benchmarks for galaxy generation and CPU-side upload preparation.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use galaxy::galaxy::generate_with_colors;
use galaxy::{generate_with, GalaxyParams};

fn params(count: u32) -> GalaxyParams {
    GalaxyParams {
        count,
        ..Default::default()
    }
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for count in [1_000u32, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("count", count), &count, |b, &count| {
            let params = params(count);
            let mut rng = SmallRng::seed_from_u64(42);
            b.iter(|| black_box(generate_with(&params, &mut rng)))
        });
    }

    group.finish();
}

fn bench_randomness_power(c: &mut Criterion) {
    let mut group = c.benchmark_group("randomness_power");
    let base = params(100_000);
    let (inside, outside) = base.colors().unwrap();

    for power in [1.0f32, 3.0, 10.0] {
        group.bench_with_input(BenchmarkId::new("power", power), &power, |b, &power| {
            let params = GalaxyParams {
                randomness_power: power,
                ..base.clone()
            };
            let mut rng = SmallRng::seed_from_u64(7);
            b.iter(|| black_box(generate_with_colors(&params, inside, outside, &mut rng)))
        });
    }

    group.finish();
}

fn bench_vertices(c: &mut Criterion) {
    let cloud = generate_with(&params(100_000), &mut SmallRng::seed_from_u64(1)).unwrap();
    c.bench_function("interleave_100k", |b| b.iter(|| black_box(cloud.vertices())));
}

criterion_group!(benches, bench_generate, bench_randomness_power, bench_vertices);
criterion_main!(benches);
