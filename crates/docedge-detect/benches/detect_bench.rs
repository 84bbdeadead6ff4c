// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the docedge-detect crate. Measures a full
// detection, and each strategy's mask generation, on a synthetic photo.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use docedge_detect::scan::strategies::BoundaryMasks;
use docedge_detect::{DocumentDetector, StrategyKind, WorkingImage};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A 1200x900 photo: dark table, light sheet slightly off-centre.
fn synthetic_photo() -> DynamicImage {
    let rgb = RgbImage::from_fn(1200, 900, |x, y| {
        if (220..980).contains(&x) && (150..760).contains(&y) {
            Rgb([236, 232, 222])
        } else {
            Rgb([48, 58, 74])
        }
    });
    DynamicImage::ImageRgb8(rgb)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Full pipeline: working image, all six strategies, selection.
fn bench_detect(c: &mut Criterion) {
    let photo = synthetic_photo();
    let detector = DocumentDetector::default();

    c.bench_function("detect (1200x900)", |b| {
        b.iter(|| black_box(detector.detect(black_box(&photo))));
    });
}

/// Mask generation alone, per strategy, on the prepared working image.
fn bench_strategies(c: &mut Criterion) {
    let Ok(working) = WorkingImage::prepare(&synthetic_photo(), 600) else {
        return;
    };

    let mut group = c.benchmark_group("masks");
    for strategy in StrategyKind::ALL {
        group.bench_function(strategy.name(), |b| {
            b.iter(|| black_box(strategy.masks(black_box(&working))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_detect, bench_strategies);
criterion_main!(benches);
