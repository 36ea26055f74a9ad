//! Wavelet detector throughput on synthetic EOG
//!
//! Run with: cargo bench -p ocular-detect --bench detection_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ocular_core::EogSignals;
use ocular_detect::{ConvolutionMethod, WaveletParameters, WaveletTransformDetector};
use rand::prelude::*;

/// Noisy gaze steps every 700 samples plus a blink every 4000
fn synthetic_eog(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut level = 0.0;
    let mut horizontal = Vec::with_capacity(size);
    let mut vertical = Vec::with_capacity(size);

    for i in 0..size {
        if i % 700 == 0 {
            level = rng.gen_range(-2.0..2.0);
        }
        let blink = if i % 4000 >= 2000 && i % 4000 < 2120 { -1.5 } else { 0.0 };
        horizontal.push(level + rng.gen_range(-0.01..0.01));
        vertical.push(blink + rng.gen_range(-0.01..0.01));
    }
    (vertical, horizontal)
}

fn bench_wavelet_detector(c: &mut Criterion) {
    let mut group = c.benchmark_group("WaveletDetector");
    let sizes = [10_000, 60_000, 300_000];

    for &size in &sizes {
        let (vertical, horizontal) = synthetic_eog(size, 42);
        let signals = EogSignals::new(&vertical, &horizontal).unwrap();

        for method in [ConvolutionMethod::Direct, ConvolutionMethod::Fft] {
            let detector = WaveletTransformDetector::new(WaveletParameters::default())
                .unwrap()
                .with_method(method);

            group.bench_with_input(
                BenchmarkId::new(format!("{method:?}"), size),
                &signals,
                |b, signals| b.iter(|| detector.detect_events(black_box(*signals))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_wavelet_detector);
criterion_main!(benches);
