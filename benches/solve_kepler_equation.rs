use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use impactor::kepler::mean_to_eccentric;

/// Uniform random in [0, 2π)
#[inline]
fn rand_angle(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() * std::f64::consts::TAU
}

fn bench_regime(c: &mut Criterion, name: &str, seed: u64, e_range: std::ops::Range<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let samples = 10_000usize;

    c.bench_function(name, |b| {
        b.iter_batched(
            || {
                // Pre-generate inputs to avoid RNG cost in the timed section
                (0..samples)
                    .map(|_| (rand_angle(&mut rng), rng.random_range(e_range.clone())))
                    .collect::<Vec<_>>()
            },
            |cases| {
                for (m, e) in cases {
                    let ecc_anomaly = mean_to_eccentric(black_box(m), black_box(e)).unwrap();
                    black_box(ecc_anomaly);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Typical NEO regime: e ∈ [0.0, 0.7)
fn bench_typical(c: &mut Criterion) {
    bench_regime(c, "mean_to_eccentric/typical_e<0.7", 0xDEADBEEF, 0.0..0.7);
}

/// High-eccentricity (still elliptic): e ∈ [0.7, 0.99)
fn bench_high_e(c: &mut Criterion) {
    bench_regime(c, "mean_to_eccentric/high_e_0.7..0.99", 0xBADF00D, 0.7..0.99);
}

/// Near-circular regime: e ≈ 1e-12
fn bench_near_circular(c: &mut Criterion) {
    bench_regime(
        c,
        "mean_to_eccentric/near_circular_e=1e-12",
        0xFEEDFACE,
        1e-12..2e-12,
    );
}

/// Near-parabolic case close to perihelion, where Newton needs the bracket.
fn bench_fixed_stress(c: &mut Criterion) {
    let e = 0.999_f64;
    let m = 1.0e-3_f64;

    c.bench_function("mean_to_eccentric/fixed_stress_case", |b| {
        b.iter(|| {
            let ecc_anomaly = mean_to_eccentric(black_box(m), black_box(e));
            black_box(ecc_anomaly.ok());
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_high_e, bench_near_circular, bench_fixed_stress
);
criterion_main!(benches);
