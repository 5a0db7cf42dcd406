use canonical::{normalize_identity, NormalizeConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_normalize(c: &mut Criterion) {
    let config = NormalizeConfig::default();
    let mut group = c.benchmark_group("normalize_identity");

    let inputs = [
        ("email", "John.Doe+newsletter@Example.COM"),
        ("name", "  José   María Núñez-Saldaña "),
    ];
    for (name, input) in inputs {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| normalize_identity(black_box(input), black_box(&config)).expect("normalize"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
