use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use heliorbit::constants::{KEPLER_MAX_ITER, KEPLER_TOLERANCE};
use heliorbit::kepler::solve_kepler;
use heliorbit::pipeline::evaluate_batch;
use heliorbit::time::j2000;
use heliorbit::{EvaluationParams, KeplerianElements, MeanAnomaly};

const SAMPLES: usize = 10_000;

#[inline]
fn rand_angle(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() * std::f64::consts::TAU
}

/// `(M, e)` pairs with `e` drawn from `range`.
fn cases(seed: u64, range: std::ops::Range<f64>) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..SAMPLES)
        .map(|_| (rand_angle(&mut rng), rng.random_range(range.clone())))
        .collect()
}

fn bench_regime(c: &mut Criterion, name: &str, seed: u64, range: std::ops::Range<f64>) {
    c.bench_function(name, |b| {
        b.iter_batched(
            || cases(seed, range.clone()),
            |cases| {
                for (m, e) in cases {
                    let ecc = solve_kepler(black_box(m), black_box(e), KEPLER_TOLERANCE, KEPLER_MAX_ITER);
                    black_box(ecc.ok());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Asteroid-like orbits: e ∈ [0, 0.7)
fn bench_typical(c: &mut Criterion) {
    bench_regime(c, "solve_kepler/typical_e<0.7", 0xDEADBEEF, 0.0..0.7);
}

/// Comet-like orbits, starting guess at π: e ∈ [0.8, 0.99)
fn bench_high_e(c: &mut Criterion) {
    bench_regime(c, "solve_kepler/high_e_0.8..0.99", 0xBADF00D, 0.8..0.99);
}

/// Planet-like orbits: e ∈ [0, 0.01)
fn bench_near_circular(c: &mut Criterion) {
    bench_regime(c, "solve_kepler/near_circular_e<0.01", 0xFEEDFACE, 0.0..0.01);
}

/// Slow case: small M with e just below 1.
fn bench_fixed_stress(c: &mut Criterion) {
    let (m, e) = (1e-3_f64, 0.995_f64);
    c.bench_function("solve_kepler/fixed_stress_case", |b| {
        b.iter(|| {
            let ecc = solve_kepler(black_box(m), black_box(e), KEPLER_TOLERANCE, KEPLER_MAX_ITER);
            black_box(ecc.ok());
        })
    });
}

/// Full evaluator over a synthetic catalog.
fn bench_batch(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let catalog: Vec<KeplerianElements> = (0..SAMPLES)
        .map(|_| {
            KeplerianElements::from_degrees(
                rng.random_range(0.5..50.0),
                rng.random_range(0.0..0.95),
                rng.random_range(0.0..180.0),
                rng.random_range(0.0..360.0),
                rng.random_range(0.0..360.0),
                MeanAnomaly::observed_degrees(rng.random_range(0.0..360.0)),
            )
        })
        .collect();
    let params = EvaluationParams::default();

    c.bench_function("evaluate_batch/10k_objects", |b| {
        b.iter(|| black_box(evaluate_batch(black_box(&catalog), j2000(), &params).distances()))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_high_e, bench_near_circular, bench_fixed_stress, bench_batch
);
criterion_main!(benches);
