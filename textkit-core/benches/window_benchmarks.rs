//! Benchmarks for window building and term extraction
//!
//! Run with: cargo bench --bench window_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use textkit_core::application::extraction::windows_by_pattern;
use textkit_core::{merge_spans, Span, VocabRegex, WindowBuilder};

/// Generate test text of specified size
fn generate_text(size: usize) -> String {
    let base = "The patient reported chest pain and was seen by the doctor on Monday. ";
    let mut text = base.repeat(size / base.len() + 1);
    text.truncate(size);
    text
}

fn bench_windows(c: &mut Criterion) {
    let mut group = c.benchmark_group("windows");

    for size in [1024, 10_240, 102_400] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(size as u64));

        for (window, step) in [(100, 50), (500, 250)] {
            let builder = WindowBuilder::with_size(window, step).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("size_{window}_step_{step}"), size),
                &text,
                |b, text| b.iter(|| builder.windows(&[black_box(text.as_str())])),
            );
        }
    }

    group.finish();
}

fn bench_term_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("term_extraction");
    let vocab = VocabRegex::compile(&["chest pain", "doctor", "patient", "monday"], true).unwrap();

    for size in [1024, 10_240, 102_400] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| windows_by_pattern(&[black_box(text.as_str())], &vocab, 50))
        });
    }

    group.finish();
}

fn bench_merge_spans(c: &mut Criterion) {
    let spans: Vec<Span> = (0..10_000)
        .map(|i| Span::new((i * 7919) % 100_000, (i * 7919) % 100_000 + 12))
        .collect();

    c.bench_function("merge_spans_10k", |b| b.iter(|| merge_spans(black_box(&spans))));
}

criterion_group!(benches, bench_windows, bench_term_extraction, bench_merge_spans);
criterion_main!(benches);
