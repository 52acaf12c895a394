use std::env;

use impactor::export::write_trajectories_csv_file;
use impactor::impact::{analyze_impact, CalculationSettings, ImpactParameters, ImpactResult};
use impactor::impactor_errors::ImpactorError;
use impactor::neo_record::NeoRecord;
use impactor::{constants::GM_SUN, maneuver::DirectionMode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// NeoWs document used when no file is given on the command line.
const DEFAULT_NEO_JSON: &str = r#"{
    "id": "9999001",
    "name": "Demo body",
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

/// Usage: `cargo run --example impact_scenario -- [neo.json] [direction] [trajectories.csv]`
fn main() -> Result<(), ImpactorError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let json = match args.first() {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_NEO_JSON.to_string(),
    };
    let direction_mode: DirectionMode = match args.get(1) {
        Some(mode) => mode.parse()?,
        None => DirectionMode::Prograde,
    };

    let record = NeoRecord::from_json(&json)?;
    let params = ImpactParameters {
        craft_mass: 500.0,
        craft_velocity: 6000.0,
        asteroid_density: 2000.0,
        beta: 3.6,
        direction_mode,
    };
    params.validate()?;
    let settings = CalculationSettings::default();

    let original = record.keplerian_elements()?;
    let asteroid = record.asteroid(params.asteroid_density)?;
    let analysis = analyze_impact(
        &original,
        &asteroid,
        &params.impactor_spec()?,
        &settings,
        GM_SUN,
    )?;

    println!("Asteroid: {}", record.display_name());
    println!(
        "Diameter: {:.1} m, mass: {:.4e} kg",
        asteroid.diameter(),
        asteroid.mass()
    );
    println!(
        "Delta-v ({direction_mode}): {:.6e} m/s",
        analysis.delta_v.magnitude()
    );
    println!("\nOriginal orbit:\n{}", analysis.orbits.original);
    println!("Final orbit:\n{}", analysis.orbits.final_orbit);
    println!("Changes (SI units):\n{}", analysis.report);

    let result = ImpactResult::from_analysis(record.display_name(), &analysis);
    if let Some(path) = args.get(2) {
        write_trajectories_csv_file(&result, path)?;
        println!("Trajectories written to {path}");
    }

    Ok(())
}
