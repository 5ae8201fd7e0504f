//! Frame codec benchmark suite.
//!
//! Benchmarks frame building/serialization and parsing at different body
//! sizes.
//!
//! Run with: cargo bench --bench frame_codec
//! Results saved to: target/criterion/

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use gift_stomp::protocol::codec;

// ============================================================================
// Benchmark Parameters
// ============================================================================

const BODY_SIZES: &[usize] = &[0, 64, 1024, 16 * 1024];

const DESTINATION: &str = "/topic/gift/events/hvbkkuDrJDZFP23ZSaguk8rbQBF3";

fn body_of(size: usize) -> String {
    "x".repeat(size)
}

// ============================================================================
// Benchmark: Build + Serialize
// ============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    group.bench_function("connect", |b| {
        b.iter(|| codec::connect(black_box("1.1,1.0"), black_box("10000,10000")).to_wire());
    });

    group.bench_function("subscribe", |b| {
        b.iter(|| codec::subscribe(black_box("sub-0"), black_box(DESTINATION)).to_wire());
    });

    for &size in BODY_SIZES {
        let body = body_of(size);
        group.bench_with_input(BenchmarkId::new("send", size), &body, |b, body| {
            b.iter(|| codec::send(black_box(DESTINATION), black_box(body)).to_wire());
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Parse
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let connected = "CONNECTED\nversion:1.1\nheart-beat:0,0\n\n\0".to_string();
    group.bench_function("connected", |b| {
        b.iter(|| codec::parse(black_box(&connected)).unwrap());
    });

    for &size in BODY_SIZES {
        let wire = codec::send(DESTINATION, &body_of(size)).to_wire();
        group.bench_with_input(BenchmarkId::new("message", size), &wire, |b, wire| {
            b.iter(|| codec::parse(black_box(wire)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_parse);
criterion_main!(benches);
