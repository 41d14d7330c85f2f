//! Criterion benchmarks for u-mowwo.
//!
//! Uses synthetic instances of growing size to measure objective
//! evaluation, non-dominated sorting and short end-to-end runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_mowwo::pareto::{non_dominated_sort, Evaluation};
use u_mowwo::problem::{
    evaluate, InstanceData, MedicalSupplyProblem, Objectives, ProblemInstance, Solution,
};
use u_mowwo::wwo::{MowwoConfig, MowwoRunner};

// ===========================================================================
// Synthetic instance
// ===========================================================================

fn synthetic(m: usize, n: usize, k: usize, k1: usize, seed: u64) -> ProblemInstance {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut draw = |len: usize, lo: f64, hi: f64| -> Vec<f64> {
        (0..len).map(|_| rng.random_range(lo..hi)).collect()
    };
    let data = InstanceData {
        m,
        n,
        k,
        k1,
        k2: None,
        n_open: Some(n / 2),
        wk: draw(k, 0.5, 2.0),
        ro: draw(k, 0.0, 1.0),
        rs: draw(k, 0.0, 1.5),
        rm: draw(k, 0.5, 2.0),
        rv: draw(k, 1.0, 3.0),
        aik: (0..m).map(|_| draw(k, 20.0, 60.0)).collect(),
        ajk: (0..n).map(|_| draw(k, 40.0, 120.0)).collect(),
        cijk: (0..m).map(|_| (0..n).map(|_| draw(k1, 1.0, 5.0)).collect()).collect(),
        cjjk: (0..n).map(|_| (0..n).map(|_| draw(k1, 1.0, 5.0)).collect()).collect(),
        coij: (0..m).map(|_| draw(n, 1.0, 3.0)).collect(),
        csij: (0..m).map(|_| draw(n, 2.0, 4.0)).collect(),
        cmij: (0..m).map(|_| draw(n, 2.0, 5.0)).collect(),
        cvij: (0..m).map(|_| draw(n, 3.0, 8.0)).collect(),
        bjk: (0..n).map(|_| draw(k, 0.0, 10.0)).collect(),
        no_i: draw(m, 10.0, 40.0),
        ns_i: draw(m, 0.0, 10.0),
        nm_i: draw(m, 0.0, 10.0),
        nv_i: draw(m, 0.0, 5.0),
        no_j: draw(n, 10.0, 30.0),
        ns_j: draw(n, 5.0, 10.0),
        nm_j: draw(n, 5.0, 10.0),
        nv_j: draw(n, 2.0, 5.0),
        c: 1_000.0,
        s: 0.3,
    };
    ProblemInstance::from_data(data).expect("synthetic instance is well-formed")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for &size in &[5, 20, 50] {
        let instance = synthetic(size, size, 6, 4, 1);
        let solution = Solution::random(instance.dims(), 2, &mut StdRng::seed_from_u64(2));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(instance, solution),
            |b, (inst, sol)| b.iter(|| black_box(evaluate(black_box(inst), black_box(sol)))),
        );
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("non_dominated_sort");

    for &n in &[10, 100, 500] {
        let mut rng = StdRng::seed_from_u64(3);
        let evaluations: Vec<Evaluation> = (0..n)
            .map(|_| {
                Evaluation::new(
                    Objectives {
                        satisfaction: rng.random_range(0.0..1.0),
                        cost_objective: rng.random_range(0.5..1.0),
                        cost: 0.0,
                    },
                    rng.random_bool(0.8),
                )
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &evaluations, |b, evals| {
            b.iter(|| black_box(non_dominated_sort(black_box(evals))))
        });
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("mowwo_run");
    group.sample_size(10);

    for &size in &[5, 20] {
        let problem = MedicalSupplyProblem::new(synthetic(size, size, 6, 4, 4));
        let config = MowwoConfig::reference().with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = MowwoRunner::run(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_sort, bench_run);
criterion_main!(benches);
