//! Criterion benchmarks for the three knapsack solvers.
//!
//! Instances are synthetic, generated from a fixed seed so every run
//! measures the same input.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_knapsack::bpso::{BpsoConfig, BpsoRunner};
use u_knapsack::dp::{DpConfig, DpRunner};
use u_knapsack::instance::{Instance, Item};
use u_knapsack::random::create_rng;
use u_knapsack::search::{SearchConfig, SearchRunner};

/// Uncorrelated instance: weights in 1..=50, values in 1..=100, capacity at
/// half the total weight.
fn synthetic(n: usize, seed: u64) -> Instance {
    let mut rng = create_rng(seed);
    let items: Vec<Item> = (0..n)
        .map(|i| {
            Item::new(
                format!("item{i}"),
                rng.random_range(1..=50) as f64,
                rng.random_range(1..=100) as f64,
            )
        })
        .collect();
    let capacity = (items.iter().map(Item::weight).sum::<f64>() / 2.0).floor();
    Instance::new(items, capacity).expect("synthetic instance is valid")
}

fn bench_dp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dp");
    group.sample_size(10);

    for &n in &[20usize, 100, 500] {
        let instance = synthetic(n, 42);
        for parallel in [false, true] {
            let config = DpConfig::default().with_parallel(parallel);
            let id = if parallel { "parallel" } else { "sequential" };
            let input = (instance.clone(), config);
            group.bench_with_input(BenchmarkId::new(id, n), &input, |b, (i, c)| {
                b.iter(|| black_box(DpRunner::run(black_box(i), black_box(c))))
            });
        }
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for &n in &[20usize, 50, 100] {
        let instance = synthetic(n, 42);
        let config = SearchConfig::default().with_max_states(10_000);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(instance, config), |b, (i, c)| {
            b.iter(|| black_box(SearchRunner::run(black_box(i), black_box(c))))
        });
    }
    group.finish();
}

fn bench_bpso(c: &mut Criterion) {
    let mut group = c.benchmark_group("bpso");
    group.sample_size(10);

    for &n in &[20usize, 100, 500] {
        let instance = synthetic(n, 42);
        for parallel in [false, true] {
            let config = BpsoConfig::default()
                .with_n_particles(50)
                .with_max_iterations(100)
                .with_seed(42)
                .with_parallel(parallel);
            let id = if parallel { "parallel" } else { "sequential" };
            let input = (instance.clone(), config);
            group.bench_with_input(BenchmarkId::new(id, n), &input, |b, (i, c)| {
                b.iter(|| black_box(BpsoRunner::run(black_box(i), black_box(c))))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_dp, bench_search, bench_bpso);
criterion_main!(benches);
