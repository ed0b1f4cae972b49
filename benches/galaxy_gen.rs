//! Benchmarks for field generation and per-frame wave bookkeeping.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stardrift::galaxy::{GalaxyField, GalaxyParams};
use stardrift::waves::WaveTracker;
use stardrift::Vec2;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("galaxy_generate");

    for count in [10_000u32, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let params = GalaxyParams {
                count,
                ..GalaxyParams::default()
            };
            b.iter(|| black_box(GalaxyField::generate_seeded(&params, 42).unwrap()));
        });
    }

    group.finish();
}

fn bench_wave_export(c: &mut Criterion) {
    let mut tracker = WaveTracker::new();
    for i in 0..5 {
        tracker.add(Vec2::new(i as f32 * 10.0, 0.0), i as f32 * 0.2);
    }

    c.bench_function("wave_slots", |b| {
        b.iter(|| black_box(tracker.slots(1.5)));
    });
}

criterion_group!(benches, bench_generate, bench_wave_export);
criterion_main!(benches);
