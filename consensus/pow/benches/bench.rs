//! Proof-of-work benchmarks: state setup (matrix generation), the full
//! per-nonce pipeline and its stages.
//!
//! Run with: cargo bench -p consensus_pow --bench bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use consensus_core::{constants::BLOCK_VERSION, header::Header, BlueWorkType, Hash};
use consensus_pow::{diffusion::diffuse, matrix::Matrix, State};

fn bench_header() -> Header {
    Header::new_finalized(
        BLOCK_VERSION,
        vec![vec![Hash::from_u64_word(1)]],
        Hash::from_u64_word(2),
        Hash::zeroed(),
        Hash::zeroed(),
        1_700_000_000_000,
        0x207fffff,
        0,
        1,
        BlueWorkType::one(),
        1,
        Hash::zeroed(),
    )
}

fn bench_state(c: &mut Criterion) {
    let header = bench_header();
    c.bench_function("State::new", |b| b.iter(|| State::new(black_box(&header))));
}

fn bench_calculate_pow(c: &mut Criterion) {
    let state = State::new(&bench_header());
    let mut group = c.benchmark_group("calculate_pow");
    group.throughput(Throughput::Elements(1));
    for nonce in [0u64, 0xdead_beef] {
        group.bench_with_input(BenchmarkId::from_parameter(nonce), &nonce, |b, &nonce| b.iter(|| state.calculate_pow(black_box(nonce))));
    }
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let seed = Hash::from_bytes([42; 32]);
    let matrix = Matrix::generate(seed);
    c.bench_function("Matrix::generate", |b| b.iter(|| Matrix::generate(black_box(seed))));
    c.bench_function("Matrix::heavy_hash", |b| b.iter(|| matrix.heavy_hash(black_box(seed))));
    c.bench_function("diffuse", |b| b.iter(|| diffuse(black_box(seed), black_box(7))));
}

criterion_group!(benches, bench_state, bench_calculate_pow, bench_stages);
criterion_main!(benches);
