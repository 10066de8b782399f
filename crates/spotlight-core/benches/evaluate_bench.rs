//! Benchmark: per-frame cost of ProgressMapper and SpotlightDriver.
//!
//! Run with: `cargo bench -p spotlight-core --bench evaluate_bench`
//!
//! Measures a single `evaluate` call across header sizes and a full
//! driver frame (scrub + evaluate + diff), the work done on every
//! animation tick.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use spotlight_core::{
    DeviceClass, LayoutMetrics, Page, ProgressMapper, ScrollRegion, SpotlightDriver, preset,
};

fn desktop_mapper(words: usize) -> ProgressMapper {
    let metrics = LayoutMetrics::new(2400.0, 900.0).expect("valid metrics");
    let table = preset(Page::Index, DeviceClass::Desktop, metrics)
        .expect("valid preset")
        .table;
    ProgressMapper::new(table)
        .expect("valid table")
        .with_word_count(words)
}

// ===========================================================================
// evaluate
// ===========================================================================

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for words in [0usize, 8, 64] {
        let mapper = desktop_mapper(words);
        group.bench_with_input(BenchmarkId::from_parameter(words), &mapper, |b, m| {
            let mut p = 0.0f64;
            b.iter(|| {
                p = (p + 0.0137) % 1.0;
                black_box(m.evaluate(black_box(p)))
            });
        });
    }
    group.finish();
}

// ===========================================================================
// driver frame
// ===========================================================================

fn bench_driver_frame(c: &mut Criterion) {
    let region = ScrollRegion::new(0.0, 3600.0).expect("valid region");
    let mut driver = SpotlightDriver::new(desktop_mapper(8), region, 0.2);
    let mut y = 0.0f64;
    c.bench_function("driver_frame", |b| {
        b.iter(|| {
            y = (y + 37.0) % 3600.0;
            driver.on_scroll(black_box(y));
            black_box(driver.frame(1.0 / 60.0))
        });
    });
}

criterion_group!(benches, bench_evaluate, bench_driver_frame);
criterion_main!(benches);
