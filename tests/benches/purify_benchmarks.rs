//! # Purification Benchmarks
//!
//! | Group | What is measured |
//! |-------|------------------|
//! | `purify-engine` | Full purification of random tensors by shape, through the boundary |
//! | `purify-lines` | Line enumeration alone |
//! | `purify-boundary` | Validation overhead on a rejected call |

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use purify_core::{purify, purify_with, EngineLimits, NoOpDiagnostics, PurifyArgs, Shape};
use purify_tests::fixtures::Tensor;

const SHAPES: &[&[usize]] = &[&[4096], &[64, 64], &[16, 16, 16], &[8, 8, 8, 8], &[4, 4, 4, 4, 4, 4]];

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("purify-engine");
    group.measurement_time(Duration::from_secs(10));
    let mut rng = StdRng::seed_from_u64(7);

    for lengths in SHAPES {
        let tensor = Tensor::random(&mut rng, lengths);
        let shape = tensor.shape();
        let signed = tensor.signed_lengths();
        let mut impurities = vec![0.0; shape.line_count()];

        group.throughput(Throughput::Elements(shape.cell_count() as u64));
        for tolerance in [0.0, 1e-6] {
            group.bench_with_input(
                BenchmarkId::new(format!("tol_{tolerance}"), format!("{lengths:?}")),
                &tensor,
                |b, tensor| {
                    b.iter_batched(
                        || tensor.scores.clone(),
                        |mut scores| {
                            let mut intercept = 0.0;
                            let args =
                                PurifyArgs::new(tolerance, &signed, &tensor.weights, &mut scores, &mut impurities)
                                    .with_intercept(&mut intercept);
                            black_box(purify_with(args, EngineLimits::default(), &NoOpDiagnostics).is_ok())
                        },
                        BatchSize::SmallInput,
                    )
                },
            );
        }
    }

    group.finish();
}

fn bench_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("purify-lines");

    for lengths in SHAPES {
        let shape = Shape::new(lengths).unwrap();
        group.throughput(Throughput::Elements(shape.line_count() as u64));
        group.bench_with_input(BenchmarkId::new("enumerate", format!("{lengths:?}")), &shape, |b, shape| {
            b.iter(|| shape.lines().map(|(_, line)| line.start).sum::<usize>())
        });
    }

    group.finish();
}

fn bench_boundary_rejection(c: &mut Criterion) {
    let mut group = c.benchmark_group("purify-boundary");
    let lengths = [8i64; 6];
    let weights = vec![1.0; 1 << 18];
    let mut scores = vec![0.0; 16];
    let mut impurities = vec![0.0; 16];

    group.bench_function("short_scores", |b| {
        b.iter(|| {
            let args = PurifyArgs::new(0.0, &lengths, &weights, &mut scores, &mut impurities);
            black_box(purify_with(args, EngineLimits::default(), &NoOpDiagnostics).is_err())
        })
    });

    group.bench_function("zero_dimensions", |b| {
        b.iter(|| {
            let args = PurifyArgs::new(0.0, &[], &[], &mut scores, &mut impurities);
            black_box(purify(args).is_ok())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_engine, bench_lines, bench_boundary_rejection);
criterion_main!(benches);
