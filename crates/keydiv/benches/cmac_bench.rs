//! Benchmarks for CMAC and key diversification
//!
//! Run with:
//!   cargo bench -p infrakit-keydiv

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use keydiv::{diversify, Cmac};

fn bench_cmac(c: &mut Criterion) {
    let mut group = c.benchmark_group("cmac");

    for key_len in [16usize, 32] {
        let key = vec![0x2bu8; key_len];
        for input_size in [16usize, 256, 4096] {
            let input = vec![0xABu8; input_size];
            group.throughput(Throughput::Bytes(input_size as u64));
            group.bench_function(format!("aes{}_{input_size}B", key_len * 8), |b| {
                b.iter(|| Cmac::mac(black_box(&key), black_box(&input)).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_diversify(c: &mut Criterion) {
    let mut group = c.benchmark_group("an10922");
    let data = [0x30, 0x42, 0xf5, b'f', b'o', b'o'];

    for key_len in [16usize, 24, 32] {
        let master = vec![0u8; key_len];
        group.bench_function(format!("diversify_{key_len}"), |b| {
            b.iter(|| diversify(black_box(&master), black_box(&data)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cmac, bench_diversify);
criterion_main!(benches);
