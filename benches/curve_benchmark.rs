#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for curve clipping and drawing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plotcraft::plottables::optimize_curve;
use plotcraft::prelude::*;

fn spiral(size: usize, spread: f64) -> Vec<Point> {
    (0..size)
        .map(|i| {
            let t = i as f64 * 0.01;
            Point::new(t.cos() * t * spread + 400.0, t.sin() * t * spread + 300.0)
        })
        .collect()
}

fn optimizer_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize_curve");
    let rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    for size in [1_000, 10_000, 100_000] {
        // most of the spiral lies far outside the view
        let points = spiral(size, 5.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| optimize_curve(black_box(&points), black_box(&rect)));
        });
    }

    group.finish();
}

fn curve_draw_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve_draw");
    let rect = Rect::new(0.0, 0.0, 800.0, 600.0);
    let config = PlotConfig::default();

    for size in [1_000, 10_000, 100_000] {
        let key_axis = Axis::shared(AxisType::Bottom, rect, Range::new(0.0, 10.0));
        let value_axis = Axis::shared(AxisType::Left, rect, Range::new(-1.5, 1.5));
        let mut curve = Curve::new(&key_axis, &value_axis);
        let keys: Vec<f64> = (0..size).map(|i| i as f64 * 100.0 / size as f64).collect();
        let values: Vec<f64> = keys.iter().map(|k| k.sin()).collect();
        curve.set_data_keys_values(&keys, &values);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut surface = RecordingSurface::new();
                curve.draw(&mut surface, black_box(&config));
                surface
            });
        });
    }

    group.finish();
}

criterion_group!(benches, optimizer_benchmark, curve_draw_benchmark);
criterion_main!(benches);
