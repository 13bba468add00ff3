//! Benchmarks for ranking the vocabulary

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wordvec::{Vector, VectorStore};

fn create_random_store(n: usize, dim: usize) -> VectorStore {
    (0..n)
        .map(|i| {
            let data: Vec<f64> = (0..dim).map(|_| rand::random::<f64>() - 0.5).collect();
            Vector::new(format!("w{}", i), data)
        })
        .collect()
}

fn benchmark_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");

    for size in [1000, 10000, 50000].iter() {
        let store = create_random_store(*size, 200);
        let query = Vector::new("query", vec![0.1; 200]).normalized();

        group.bench_with_input(BenchmarkId::new("cosine_similars", size), size, |b, _| {
            b.iter(|| store.cosine_similars(black_box(&query)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("neighbourhood", size), size, |b, _| {
            b.iter(|| store.neighbourhood(black_box(&query)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_ranking);
criterion_main!(benches);
