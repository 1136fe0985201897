use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rknn::{accuracy, predict, Metric, Sample};

/// Deterministic synthetic gesture data: `n` samples, `dim` features, `classes` labels
fn synthetic(n: usize, dim: usize, classes: usize) -> Vec<Sample> {
    (0..n)
        .map(|i| {
            let label = i % classes;
            let features = (0..dim)
                .map(|j| label as f64 * 3.0 + ((i * 31 + j * 17) % 97) as f64 / 97.0)
                .collect();
            Sample::new(features, label)
        })
        .collect()
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");
    for &n in &[100, 1_000, 5_000] {
        let training = synthetic(n, 24, 8);
        let query = synthetic(1, 24, 8).remove(0).features;

        for metric in Metric::ALL {
            group.bench_with_input(BenchmarkId::new(metric.to_string(), n), &n, |b, _| {
                b.iter(|| predict(black_box(&training), black_box(&query), 10, &metric))
            });
        }
    }
    group.finish();
}

fn bench_accuracy(c: &mut Criterion) {
    let training = synthetic(2_000, 24, 8);
    let testing = synthetic(200, 24, 8);

    c.bench_function("accuracy_2000x200_k10", |b| {
        b.iter(|| accuracy(black_box(&training), black_box(&testing), 10, &Metric::Euclidean))
    });
}

criterion_group!(benches, bench_predict, bench_accuracy);
criterion_main!(benches);
