//! Criterion benchmarks for the per-event pointer and keysym math.
//!
//! Every raw pointer event runs the full relative-position → auto-scroll →
//! scale pipeline, and every inserted character runs a keysym conversion, so
//! both sit on the input hot path.
//!
//! Run with:
//! ```bash
//! cargo bench --package viewer-core --bench pointer_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use viewer_core::{
    auto_scroll_delta, scale_to_remote, view_relative_position, Keysym, Point, PointerState,
    ScaleFactor, ViewportMetrics,
};

const VIEWPORT: ViewportMetrics = ViewportMetrics {
    width: 1280.0,
    height: 720.0,
    scroll_x: 64.0,
    scroll_y: 32.0,
};

/// Positions inside, past each edge, and past two edges at once.
const BENCH_POSITIONS: &[(f64, f64)] = &[
    (640.0, 360.0),
    (1400.0, 360.0),
    (-20.0, 360.0),
    (640.0, 900.0),
    (640.0, -8.0),
    (1500.0, 800.0),
];

fn bench_pointer_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer_pipeline");
    let scale = ScaleFactor::new(0.75).expect("0.75 is a valid scale");

    group.bench_function("single_event", |b| {
        b.iter(|| {
            let raw = PointerState::at(black_box(700.0), black_box(400.0));
            let rel = view_relative_position(raw.position(), Point::new(8.0, 8.0), &VIEWPORT);
            let delta = auto_scroll_delta(rel, &VIEWPORT);
            (delta, scale_to_remote(raw, scale))
        })
    });

    group.bench_function("batch_6_positions", |b| {
        b.iter(|| {
            BENCH_POSITIONS
                .iter()
                .map(|&(x, y)| {
                    let raw = PointerState::at(black_box(x), black_box(y));
                    let rel =
                        view_relative_position(raw.position(), Point::new(0.0, 0.0), &VIEWPORT);
                    (auto_scroll_delta(rel, &VIEWPORT), scale_to_remote(raw, scale))
                })
                .count()
        })
    });

    group.finish();
}

fn bench_keysym_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("keysym");
    let text = "Hello, wörld! €100 😀";

    group.bench_function("from_char_mixed_text", |b| {
        b.iter(|| black_box(text).chars().map(Keysym::from_char).count())
    });

    group.bench_function("is_typable", |b| {
        b.iter(|| Keysym(black_box(0xFF0D)).is_typable())
    });

    group.finish();
}

criterion_group!(benches, bench_pointer_pipeline, bench_keysym_conversion);
criterion_main!(benches);
