mod common;

use approx::assert_relative_eq;
use impactor::asteroid::Asteroid;
use impactor::constants::{AU, GM_SUN};
use impactor::impact::{
    analyze_impact, calculate_impact, calculate_impact_from_source, CalculationSettings,
    ImpactParameters,
};
use impactor::impactor_errors::ImpactorError;
use impactor::maneuver::{DirectionMode, ImpactorSpec};
use impactor::neo_record::{NeoCatalog, NeoRecord};
use impactor::orb_elem::elements_to_state;

use crate::common::{scenario_orbit, SCENARIO_NEO_JSON};

fn scenario_params(direction_mode: DirectionMode) -> ImpactParameters {
    ImpactParameters {
        craft_mass: 500.0,
        craft_velocity: 6000.0,
        asteroid_density: 2000.0,
        beta: 3.6,
        direction_mode,
    }
}

fn scenario_impactor(direction: DirectionMode) -> ImpactorSpec {
    ImpactorSpec::new(500.0, 6000.0, 3.6, direction).unwrap()
}

#[test]
fn test_prograde_scenario_from_record() {
    let record = NeoRecord::from_json(SCENARIO_NEO_JSON).unwrap();
    let result = calculate_impact(
        &record,
        &scenario_params(DirectionMode::Prograde),
        &CalculationSettings::default(),
    )
    .unwrap();

    assert_eq!(result.asteroid_name, "Scenario body");
    assert_eq!(result.diameter_m, 200.0);

    // (4/3)·π·100³·2000
    assert_relative_eq!(result.mass_kg, 8.377_580_409_572_781e9, max_relative = 1e-12);
    // 3.6·500·6000 / M
    assert_relative_eq!(
        result.delta_v_magnitude_mps,
        1.289_155_039_044_352e-3,
        max_relative = 1e-9
    );

    let summary = &result.orbital_change_report;
    assert!(summary.a.change > 0.0);
    assert!(summary.period_days.change > 0.0);
    assert_relative_eq!(
        summary.period_days.percent,
        1.5 * summary.a.percent,
        max_relative = 1e-4
    );
    assert!(summary.i.change.abs() < 1e-10);
    assert_eq!(result.trajectory_original_km.len(), 100);
    assert_eq!(result.trajectory_final_km.len(), 100);
}

#[test]
fn test_semi_major_axis_change_matches_energy_budget() {
    let original = scenario_orbit();
    let asteroid = Asteroid::new(200.0, 2000.0).unwrap();
    let settings = CalculationSettings {
        trajectory_points: 8,
    };

    let state = elements_to_state(&original, original.true_anomaly().unwrap(), GM_SUN).unwrap();
    let a = original.semi_major_axis();

    for direction in [
        DirectionMode::Prograde,
        DirectionMode::Retrograde,
        DirectionMode::Radial,
    ] {
        let analysis = analyze_impact(
            &original,
            &asteroid,
            &scenario_impactor(direction),
            &settings,
            GM_SUN,
        )
        .unwrap();

        let dv = analysis.delta_v.vector();
        let d_energy = state.velocity().dot(dv) + 0.5 * dv.norm_squared();
        let expected_da = 2.0 * a * a * d_energy / GM_SUN;

        assert_relative_eq!(
            analysis.report.semi_major_axis.change,
            expected_da,
            max_relative = 1e-4
        );
        assert_eq!(analysis.orbits.original, original);
    }
}

#[test]
fn test_retrograde_shrinks_orbit() {
    let record = NeoRecord::from_json(SCENARIO_NEO_JSON).unwrap();
    let result = calculate_impact(
        &record,
        &scenario_params(DirectionMode::Retrograde),
        &CalculationSettings::default(),
    )
    .unwrap();

    assert!(result.orbital_change_report.a.change < 0.0);
    assert!(result.orbital_change_report.period_days.change < 0.0);
}

#[test]
fn test_original_trajectory_does_not_depend_on_impact() {
    let record = NeoRecord::from_json(SCENARIO_NEO_JSON).unwrap();
    let settings = CalculationSettings::default();

    let prograde = calculate_impact(
        &record,
        &scenario_params(DirectionMode::Prograde),
        &settings,
    )
    .unwrap();
    let radial =
        calculate_impact(&record, &scenario_params(DirectionMode::Radial), &settings).unwrap();

    assert_eq!(
        prograde.trajectory_original_km,
        radial.trajectory_original_km
    );
    assert_ne!(prograde.trajectory_final_km, radial.trajectory_final_km);
    // the impact happens at the first sample, so both orbits start at the same point
    for k in 0..3 {
        assert_relative_eq!(
            prograde.trajectory_final_km[0][k],
            prograde.trajectory_original_km[0][k],
            epsilon = 1e-3,
            max_relative = 1e-7
        );
    }
}

#[test]
fn test_large_impulse_unbinds_orbit() {
    let original = scenario_orbit();
    let pebble = Asteroid::new(1.0, 1000.0).unwrap();
    let impactor = ImpactorSpec::new(1000.0, 20_000.0, 5.0, DirectionMode::Prograde).unwrap();

    let err = analyze_impact(
        &original,
        &pebble,
        &impactor,
        &CalculationSettings::default(),
        GM_SUN,
    )
    .unwrap_err();

    match err {
        ImpactorError::DegenerateOrbit {
            eccentricity,
            semi_major_axis,
        } => assert!(eccentricity >= 1.0 || semi_major_axis <= 0.0),
        other => panic!("expected a degenerate orbit, got {other:?}"),
    }
}

#[test]
fn test_invalid_parameters_are_rejected_first() {
    let record = NeoRecord::from_json(SCENARIO_NEO_JSON).unwrap();

    for (field, params) in [
        (
            "craft_mass",
            ImpactParameters {
                craft_mass: 0.0,
                ..scenario_params(DirectionMode::Prograde)
            },
        ),
        (
            "craft_velocity",
            ImpactParameters {
                craft_velocity: -6000.0,
                ..scenario_params(DirectionMode::Prograde)
            },
        ),
        (
            "asteroid_density",
            ImpactParameters {
                asteroid_density: f64::NAN,
                ..scenario_params(DirectionMode::Prograde)
            },
        ),
    ] {
        assert!(matches!(
            calculate_impact(&record, &params, &CalculationSettings::default()),
            Err(ImpactorError::InputValidation { field: ref f, .. }) if f == field
        ));
    }
}

#[test]
fn test_catalog_backed_calculation() {
    let mut catalog = NeoCatalog::new();
    catalog.insert_json(SCENARIO_NEO_JSON).unwrap();
    let params = scenario_params(DirectionMode::Prograde);
    let settings = CalculationSettings {
        trajectory_points: 12,
    };

    let result = calculate_impact_from_source(&catalog, "9999001", &params, &settings).unwrap();
    assert_eq!(result.trajectory_final_km.len(), 12);
    assert_relative_eq!(
        result.orbital_change_report.a.original,
        1.5,
        max_relative = 1e-12
    );

    assert_eq!(
        calculate_impact_from_source(&catalog, "404", &params, &settings).unwrap_err(),
        ImpactorError::ExternalDataUnavailable("no NeoWs record for id 404".into())
    );
}

#[test]
fn test_trajectory_lies_at_heliocentric_distances() {
    let record = NeoRecord::from_json(SCENARIO_NEO_JSON).unwrap();
    let result = calculate_impact(
        &record,
        &scenario_params(DirectionMode::Prograde),
        &CalculationSettings::default(),
    )
    .unwrap();

    let q_km = 1.5 * 0.8 * AU / 1e3;
    let big_q_km = 1.5 * 1.2 * AU / 1e3;
    for [x, y, z] in &result.trajectory_original_km {
        let r = (x * x + y * y + z * z).sqrt();
        assert!(r >= q_km * (1.0 - 1e-12) && r <= big_q_km * (1.0 + 1e-12));
    }
}
