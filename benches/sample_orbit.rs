use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use impactor::asteroid::Asteroid;
use impactor::constants::{AU, GM_SUN, RADEG};
use impactor::impact::{analyze_impact, CalculationSettings};
use impactor::maneuver::{DirectionMode, ImpactorSpec};
use impactor::orbit_type::keplerian_element::KeplerianElements;
use impactor::time::epoch_from_jd_tdb;
use impactor::trajectory::sample_orbit;

fn scenario_orbit() -> KeplerianElements {
    KeplerianElements::new(
        epoch_from_jd_tdb(2_460_600.5).unwrap(),
        1.5 * AU,
        0.2,
        10.0 * RADEG,
        50.0 * RADEG,
        60.0 * RADEG,
        30.0 * RADEG,
    )
    .unwrap()
}

fn bench_sample_orbit(c: &mut Criterion) {
    let kep = scenario_orbit();
    let mut group = c.benchmark_group("sample_orbit");

    for num_points in [100usize, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_points),
            &num_points,
            |b, &n| b.iter(|| black_box(sample_orbit(&kep, GM_SUN, black_box(n)).unwrap())),
        );
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let kep = scenario_orbit();
    let asteroid = Asteroid::new(200.0, 2000.0).unwrap();
    let impactor = ImpactorSpec::new(500.0, 6000.0, 3.6, DirectionMode::Prograde).unwrap();
    let settings = CalculationSettings::default();

    c.bench_function("analyze_impact/default_settings", |b| {
        b.iter(|| {
            black_box(
                analyze_impact(&kep, &asteroid, &impactor, &settings, GM_SUN).unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_sample_orbit, bench_full_pipeline);
criterion_main!(benches);
