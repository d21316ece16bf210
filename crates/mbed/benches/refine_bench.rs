//! Criterion benchmarks for length-threshold refinement.
//! Inputs: closed random walks in R^3 with n in {1e2, 1e3, 1e4, 1e5} vertices.
//! Compare `cargo bench -p mbed` against `--no-default-features` for the
//! sequential fill.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mbed::api::{draw_random_walk, refine, RefinePlan, ReplayToken, WalkCfg};

fn walk(n: usize) -> mbed::api::LineMesh {
    let cfg = WalkCfg {
        vertex_count: n,
        dim: 3,
        step_min: 0.05,
        step_max: 1.0,
        closed: true,
    };
    draw_random_walk(cfg, ReplayToken { seed: 5, index: n as u64 }).unwrap()
}

fn bench_refine(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine");
    for &n in &[100usize, 1_000, 10_000, 100_000] {
        let mesh = walk(n);
        group.throughput(Throughput::Elements(n as u64));
        for &threshold in &[0.5f64, 0.05] {
            let id = format!("n{n}_t{threshold}");
            group.bench_with_input(BenchmarkId::new("plan", &id), &mesh, |b, mesh| {
                b.iter(|| RefinePlan::new(mesh, threshold).unwrap())
            });
            group.bench_with_input(BenchmarkId::new("refine", &id), &mesh, |b, mesh| {
                b.iter(|| refine(mesh, threshold).unwrap())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_refine);
criterion_main!(benches);
