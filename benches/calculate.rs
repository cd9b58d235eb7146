use bizcase::prelude::*;
use bizcase::sensitivity::linspace;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// Build a portfolio of n business cases with slight variation
fn build_portfolio(n: usize) -> Vec<BusinessCaseData> {
    (0..n)
        .map(|i| {
            let scale = 1.0 + (i as f64 % 7.0) * 0.05; // slight variation
            BusinessCaseData::expected()
                .with_clinic_count(880.0 * scale)
                .with_conversion_improvements(5.0 * scale, 4.0 * scale)
        })
        .collect()
}

fn bench_single_case(c: &mut Criterion) {
    let data = BusinessCaseData::expected();

    c.bench_function("calculate_single_case", |b| {
        b.iter(|| {
            let result = calculate_benefits(black_box(&data));
            black_box(result);
        });
    });
}

fn bench_long_projection(c: &mut Criterion) {
    let data = BusinessCaseData::expected()
        .with_projection(30, 4.0)
        .with_expansion(25.0, 45_000.0, 30);

    c.bench_function("calculate_thirty_year_projection", |b| {
        b.iter(|| {
            let result = calculate_benefits(black_box(&data));
            black_box(result);
        });
    });
}

fn bench_portfolio(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_portfolio");

    for size in [10, 100, 1000] {
        let cases = build_portfolio(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let results = black_box(cases.as_slice()).benefits();
                black_box(results);
            });
        });
    }

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let data = BusinessCaseData::expected();
    let values = linspace(0.0, 20.0, 101);

    c.bench_function("sweep_show_rate_101_points", |b| {
        b.iter(|| {
            let points = sweep(black_box(&data), Lever::ShowRateImprovement, black_box(&values));
            black_box(points);
        });
    });
}

criterion_group!(
    benches,
    bench_single_case,
    bench_long_projection,
    bench_portfolio,
    bench_sweep,
);
criterion_main!(benches);
