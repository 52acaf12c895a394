#![allow(dead_code)]

use approx::assert_relative_eq;
use impactor::constants::{AU, RADEG};
use impactor::orbit_type::keplerian_element::KeplerianElements;
use impactor::time::{elapsed_seconds, epoch_from_jd_tdb};

/// Orbit of the reference deflection scenario: a = 1.5 AU, e = 0.2, i = 10°,
/// Ω = 50°, ω = 60°, M = 30° at JD 2460600.5 TDB.
pub fn scenario_orbit() -> KeplerianElements {
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

/// NeoWs document carrying the reference scenario, numbers encoded as strings.
pub const SCENARIO_NEO_JSON: &str = r#"{
    "id": "9999001",
    "name": "Scenario body",
    "estimated_diameter": {
        "meters": {"estimated_diameter_min": "100.0", "estimated_diameter_max": "300.0"}
    },
    "orbital_data": {
        "epoch_osculation": "2460600.5",
        "eccentricity": "0.2",
        "semi_major_axis": "1.5",
        "inclination": "10",
        "ascending_node_longitude": "50",
        "perihelion_argument": "60",
        "mean_anomaly": "30"
    }
}"#;

/// Smallest signed difference between two angles.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(std::f64::consts::TAU);
    if d > std::f64::consts::PI {
        d - std::f64::consts::TAU
    } else {
        d
    }
}

pub fn assert_orbit_close(
    actual: &KeplerianElements,
    expected: &KeplerianElements,
    max_relative: f64,
    angle_epsilon: f64,
) {
    assert_eq!(
        elapsed_seconds(&expected.reference_epoch(), &actual.reference_epoch()),
        0.0
    );
    assert_relative_eq!(
        actual.semi_major_axis(),
        expected.semi_major_axis(),
        max_relative = max_relative
    );
    assert_relative_eq!(
        actual.eccentricity(),
        expected.eccentricity(),
        epsilon = angle_epsilon
    );
    assert!(angle_diff(actual.inclination(), expected.inclination()).abs() < angle_epsilon);
    assert!(
        angle_diff(
            actual.ascending_node_longitude(),
            expected.ascending_node_longitude()
        )
        .abs()
            < angle_epsilon
    );
    assert!(
        angle_diff(actual.periapsis_argument(), expected.periapsis_argument()).abs()
            < angle_epsilon
    );
    assert!(angle_diff(actual.mean_anomaly(), expected.mean_anomaly()).abs() < angle_epsilon);
}
