//! Locator scaling benchmarks
//!
//! Run with: cargo bench --bench locator_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use epicenter_locator::{
    partition_stations, weighted_combination, EpicenterLocator, EstimateResult, GeoBounds, Point,
    Station, StationGenerator,
};

fn region() -> GeoBounds {
    GeoBounds::new(32.0, 42.0, -125.0, -114.0)
}

fn stations(count: usize, seed: u64) -> Vec<Station> {
    StationGenerator::seeded(seed).generate(count, Point::new(35.0, -120.0), &region())
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    let locator = EpicenterLocator::default();
    let bounds = region();

    for &count in &[25_usize, 100, 500, 2000] {
        let data = stations(count, 42);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &data, |b, data| {
            b.iter(|| locator.locate(black_box(data), black_box(&bounds)))
        });
    }

    group.finish();
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    let bounds = region();

    for &count in &[100_usize, 2000] {
        let data = stations(count, 7);
        let views: Vec<&Station> = data.iter().collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &views, |b, views| {
            b.iter(|| partition_stations(black_box(views), black_box(&bounds)))
        });
    }

    group.finish();
}

fn bench_combination(c: &mut Criterion) {
    let results: Vec<EstimateResult> = (0..4)
        .map(|i| EstimateResult::new(Point::new(35.0 + i as f64, -120.0), 0.25 * (i + 1) as f64, i as f64))
        .collect();

    c.bench_function("weighted_combination_4", |b| {
        b.iter(|| weighted_combination(black_box(&results)))
    });
}

criterion_group!(benches, bench_locate, bench_partition, bench_combination);
criterion_main!(benches);
