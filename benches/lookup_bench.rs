//! Lookup and build benchmarks

use aligncheck::aligndef::{AlignmentIndex, IndexedAlignment, Span};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_lines(records: u32) -> Vec<String> {
    (0..records)
        .map(|i| {
            let entry = IndexedAlignment {
                left: Span::new(i * 3, i * 3 + i % 3),
                right: Some(Span::single(i)),
            };
            entry.to_string()
        })
        .collect()
}

fn benchmark_lookup(c: &mut Criterion) {
    let lines = synthetic_lines(1_000_000);
    let index = AlignmentIndex::build(&lines).expect("synthetic aligndef is valid");
    let last = index.last_position().unwrap_or(0);

    c.bench_function("lookup_n=1e6", |b| {
        let mut position = 0u32;
        b.iter(|| {
            position = (position + 7919) % (last + 1);
            black_box(index.lookup(black_box(position)));
        });
    });

    c.bench_function("build_n=1e5", |b| {
        let lines = synthetic_lines(100_000);
        b.iter(|| black_box(AlignmentIndex::build(&lines).expect("valid")));
    });
}

criterion_group!(benches, benchmark_lookup);
criterion_main!(benches);
