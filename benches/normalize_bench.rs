use criterion::{Criterion, criterion_group, criterion_main};
use heightbuf::IntensityGrid;
use heightbuf::normalize::{compute_range, compute_range_par, normalize, normalize_par};
use heightbuf::output::write_text;
use std::hint::black_box;

/// 2048x2048 16-bit gradient with some high-frequency detail
fn synthetic_grid() -> IntensityGrid {
    let (width, height) = (2048usize, 2048usize);
    let data = (0..width)
        .flat_map(|x| (0..height).map(move |y| ((x * 31 + y * 17) % 65_536) as u16))
        .collect();
    IntensityGrid::new(width, height, data).unwrap()
}

// ============================================================================
// RANGE SCAN
// ============================================================================

fn bench_compute_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_range");
    let grid = synthetic_grid();

    group.bench_function("sequential", |b| {
        b.iter(|| compute_range(black_box(&grid)).unwrap());
    });
    group.bench_function("parallel", |b| {
        b.iter(|| compute_range_par(black_box(&grid)).unwrap());
    });

    group.finish();
}

// ============================================================================
// RESCALE
// ============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let grid = synthetic_grid();
    let range = compute_range(&grid).unwrap();

    group.bench_function("sequential", |b| {
        b.iter(|| normalize(black_box(&grid), black_box(range)).unwrap());
    });
    group.bench_function("parallel", |b| {
        b.iter(|| normalize_par(black_box(&grid), black_box(range)).unwrap());
    });

    group.finish();
}

// ============================================================================
// SERIALIZATION
// ============================================================================

fn bench_write_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let grid = synthetic_grid();
    let range = compute_range(&grid).unwrap();
    let values = normalize(&grid, range).unwrap();

    group.bench_function("text_4m_values", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(values.len() * 20);
            write_text(&mut out, black_box(&values)).unwrap();
            black_box(out);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_compute_range, bench_normalize, bench_write_text);

criterion_main!(benches);
