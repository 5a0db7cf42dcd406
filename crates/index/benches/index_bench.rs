use criterion::{black_box, criterion_group, criterion_main, Criterion};
use index::{LshConfig, LshIndex};
use perceptual::{signature_of, PerceptualConfig};

fn bench_index(c: &mut Criterion) {
    let cfg = PerceptualConfig::default();
    let ids: Vec<String> = (0..2_000).map(|i| format!("user{i}@example.com")).collect();
    let sigs: Vec<_> = ids
        .iter()
        .map(|id| signature_of(id, &cfg).expect("signature"))
        .collect();

    c.bench_function("lsh_add_2000", |b| {
        b.iter(|| {
            let mut index = LshIndex::new(LshConfig::default()).expect("index");
            for (id, sig) in ids.iter().zip(&sigs) {
                index.add(id, sig).expect("add");
            }
            black_box(index.len())
        })
    });

    let mut index = LshIndex::new(LshConfig::default()).expect("index");
    for (id, sig) in ids.iter().zip(&sigs) {
        index.add(id, sig).expect("add");
    }
    let needle = signature_of("user1000@example.org", &cfg).expect("signature");
    c.bench_function("lsh_query", |b| {
        b.iter(|| black_box(index.query(black_box(&needle)).expect("query").len()))
    });
}

criterion_group!(benches, bench_index);
criterion_main!(benches);
