//! # Deflection pipeline
//!
//! Entry points chaining the pipeline stages:
//!
//! ```text
//! NeoRecord + ImpactParameters
//!   → Asteroid (mass)                       asteroid
//!   → DeltaV, final orbit                   maneuver
//!   → sampled trajectories of both orbits   trajectory
//!   → OrbitalChangeReport                   orbital_change
//!   → ImpactResult
//! ```
//!
//! [`analyze_impact`] runs the pipeline on SI inputs and returns SI outputs.
//! [`calculate_impact`] is the record-level boundary: it reads a NeoWs record, validates
//! the user parameters before any numerical work, and converts the outcome into the
//! fixed-schema [`ImpactResult`] (AU, degrees, days, kilometers).
//!
//! Every function here is stateless: all inputs are borrowed, nothing is retained
//! between calls, and independent calculations can run concurrently.
//!
//! ## Example
//!
//! ```rust, no_run
//! use impactor::impact::{calculate_impact, CalculationSettings, ImpactParameters};
//! use impactor::maneuver::DirectionMode;
//! use impactor::neo_record::NeoRecord;
//!
//! let record = NeoRecord::from_json(&std::fs::read_to_string("neo.json")?)?;
//! let params = ImpactParameters {
//!     craft_mass: 500.0,
//!     craft_velocity: 6000.0,
//!     asteroid_density: 2000.0,
//!     beta: 3.6,
//!     direction_mode: DirectionMode::Prograde,
//! };
//! let result = calculate_impact(&record, &params, &CalculationSettings::default())?;
//! println!("{}", result.to_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    asteroid::Asteroid,
    constants::{
        Kilogram, AU, DEFAULT_TRAJECTORY_POINTS, GM_SUN, METERS_PER_KM, RADEG, SECONDS_PER_DAY,
    },
    impactor_errors::ImpactorError,
    maneuver::{DeltaV, DirectionMode, ImpactorSpec, OrbitPair},
    neo_record::{required, NeoNumber, NeoRecord, NeoSource},
    orbit_type::keplerian_element::KeplerianElements,
    orbital_change::{compare, ElementChange, OrbitalChangeReport},
    trajectory::sample_orbit,
};

/// User-supplied impact parameters.
///
/// Units
/// -----
/// * `craft_mass`: kg
/// * `craft_velocity`: m/s
/// * `asteroid_density`: kg/m³
/// * `beta`: dimensionless
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ImpactPayload")]
pub struct ImpactParameters {
    pub craft_mass: Kilogram,
    pub craft_velocity: f64,
    pub asteroid_density: f64,
    pub beta: f64,
    pub direction_mode: DirectionMode,
}

/// Wire form of [`ImpactParameters`]. Form submissions carry numbers as strings and
/// the direction either by name or by its code (`1`, `2`, `3`).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImpactPayload {
    craft_mass: Option<NeoNumber>,
    craft_velocity: Option<NeoNumber>,
    asteroid_density: Option<NeoNumber>,
    beta: Option<NeoNumber>,
    direction_mode: Option<NeoNumber>,
}

impl TryFrom<ImpactPayload> for ImpactParameters {
    type Error = ImpactorError;

    fn try_from(payload: ImpactPayload) -> Result<Self, Self::Error> {
        let direction_mode = match payload.direction_mode {
            Some(NeoNumber::Text(name)) => name.parse()?,
            Some(NeoNumber::Number(code)) => code.to_string().parse()?,
            Some(NeoNumber::Other(value)) => {
                return Err(ImpactorError::invalid(
                    "direction_mode",
                    format!("expected a direction name or code, got {value}"),
                ))
            }
            None => return Err(ImpactorError::invalid("direction_mode", "missing field")),
        };

        let params = ImpactParameters {
            craft_mass: required(payload.craft_mass.as_ref(), "craft_mass")?,
            craft_velocity: required(payload.craft_velocity.as_ref(), "craft_velocity")?,
            asteroid_density: required(payload.asteroid_density.as_ref(), "asteroid_density")?,
            beta: required(payload.beta.as_ref(), "beta")?,
            direction_mode,
        };
        params.validate()?;
        Ok(params)
    }
}

impl ImpactParameters {
    /// Parse parameters from a JSON payload and validate them.
    ///
    /// Errors
    /// ------
    /// * [`ImpactorError::JsonError`] if the payload is not a JSON object.
    /// * [`ImpactorError::InputValidation`] naming the first missing, malformed or
    ///   out-of-range field, `direction_mode` included.
    pub fn from_json(json: &str) -> Result<Self, ImpactorError> {
        let payload: ImpactPayload = serde_json::from_str(json)?;
        ImpactParameters::try_from(payload)
    }

    /// Errors
    /// ------
    /// * [`ImpactorError::InputValidation`] naming the first non-positive or
    ///   non-finite field.
    pub fn validate(&self) -> Result<(), ImpactorError> {
        ImpactorError::require_positive("craft_mass", self.craft_mass)?;
        ImpactorError::require_positive("craft_velocity", self.craft_velocity)?;
        ImpactorError::require_positive("asteroid_density", self.asteroid_density)?;
        ImpactorError::require_positive("beta", self.beta)?;
        Ok(())
    }

    pub fn impactor_spec(&self) -> Result<ImpactorSpec, ImpactorError> {
        ImpactorSpec::new(
            self.craft_mass,
            self.craft_velocity,
            self.beta,
            self.direction_mode,
        )
    }
}

/// Tunable settings of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationSettings {
    /// Samples per orbit in the output trajectories.
    pub trajectory_points: usize,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        CalculationSettings {
            trajectory_points: DEFAULT_TRAJECTORY_POINTS,
        }
    }
}

impl CalculationSettings {
    pub fn validate(&self) -> Result<(), ImpactorError> {
        if self.trajectory_points == 0 {
            return Err(ImpactorError::invalid(
                "trajectory_points",
                "at least one sample is required",
            ));
        }
        Ok(())
    }
}

/// Outcome of one impact, in SI units.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactAnalysis {
    pub asteroid: Asteroid,
    pub delta_v: DeltaV,
    pub orbits: OrbitPair,
    pub report: OrbitalChangeReport,
    /// Heliocentric ecliptic positions (m) over one period of the original orbit.
    pub trajectory_original: Vec<Vector3<f64>>,
    /// Same for the post-impact orbit.
    pub trajectory_final: Vec<Vector3<f64>>,
}

/// Run the deflection pipeline on SI inputs.
///
/// Arguments
/// ---------
/// * `original` – Orbit of the asteroid; the impact happens at its reference epoch.
/// * `asteroid` – Physical model of the asteroid.
/// * `impactor` – Impacting spacecraft.
/// * `settings` – Sampling settings.
/// * `mu` – Gravitational parameter of the central body (m³/s²).
///
/// Errors
/// ------
/// * [`ImpactorError::InputValidation`] for invalid settings.
/// * [`ImpactorError::DegenerateOrbit`] if the impact unbinds the orbit.
/// * [`ImpactorError::Convergence`] from the Kepler solve.
pub fn analyze_impact(
    original: &KeplerianElements,
    asteroid: &Asteroid,
    impactor: &ImpactorSpec,
    settings: &CalculationSettings,
    mu: f64,
) -> Result<ImpactAnalysis, ImpactorError> {
    settings.validate()?;

    let (delta_v, orbits) = OrbitPair::from_impact(original, asteroid, impactor, mu)?;
    let trajectory_original = sample_orbit(&orbits.original, mu, settings.trajectory_points)?;
    let trajectory_final = sample_orbit(&orbits.final_orbit, mu, settings.trajectory_points)?;
    let report = compare(&orbits.original, &orbits.final_orbit, mu)?;

    debug!(
        mass = asteroid.mass(),
        delta_v = delta_v.magnitude(),
        da = report.semi_major_axis.change,
        "impact analysis complete"
    );

    Ok(ImpactAnalysis {
        asteroid: *asteroid,
        delta_v,
        orbits,
        report,
        trajectory_original,
        trajectory_final,
    })
}

/// Orbital changes in output units: `a` in AU, `i` in degrees, period in days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalChangeSummary {
    pub a: ElementChange,
    pub e: ElementChange,
    pub i: ElementChange,
    pub period_days: ElementChange,
}

impl From<&OrbitalChangeReport> for OrbitalChangeSummary {
    fn from(report: &OrbitalChangeReport) -> Self {
        OrbitalChangeSummary {
            a: report.semi_major_axis.scaled(1.0 / AU),
            e: report.eccentricity,
            i: report.inclination.scaled(1.0 / RADEG),
            period_days: report.period.scaled(1.0 / SECONDS_PER_DAY),
        }
    }
}

/// Fixed-schema result record of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactResult {
    pub asteroid_name: String,
    pub diameter_m: f64,
    pub mass_kg: f64,
    pub delta_v_mps: [f64; 3],
    pub delta_v_magnitude_mps: f64,
    pub orbital_change_report: OrbitalChangeSummary,
    pub trajectory_original_km: Vec<[f64; 3]>,
    pub trajectory_final_km: Vec<[f64; 3]>,
}

fn to_km(positions: &[Vector3<f64>]) -> Vec<[f64; 3]> {
    positions
        .iter()
        .map(|r| {
            let km = r / METERS_PER_KM;
            [km.x, km.y, km.z]
        })
        .collect()
}

impl ImpactResult {
    pub fn from_analysis(asteroid_name: impl Into<String>, analysis: &ImpactAnalysis) -> Self {
        let dv = analysis.delta_v.vector();
        ImpactResult {
            asteroid_name: asteroid_name.into(),
            diameter_m: analysis.asteroid.diameter(),
            mass_kg: analysis.asteroid.mass(),
            delta_v_mps: [dv.x, dv.y, dv.z],
            delta_v_magnitude_mps: analysis.delta_v.magnitude(),
            orbital_change_report: OrbitalChangeSummary::from(&analysis.report),
            trajectory_original_km: to_km(&analysis.trajectory_original),
            trajectory_final_km: to_km(&analysis.trajectory_final),
        }
    }

    /// Serialize the record as a JSON document.
    pub fn to_json(&self) -> Result<String, ImpactorError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Evaluate an impact on the asteroid described by a NeoWs record.
///
/// The parameters and settings are validated before any numerical work. The asteroid
/// diameter is the mean of the record's estimated range and μ is [`GM_SUN`].
///
/// Errors
/// ------
/// * [`ImpactorError::InputValidation`] for invalid parameters, settings or record fields.
/// * [`ImpactorError::DegenerateOrbit`] if the impact unbinds the orbit.
/// * [`ImpactorError::Convergence`] from the Kepler solve.
pub fn calculate_impact(
    record: &NeoRecord,
    params: &ImpactParameters,
    settings: &CalculationSettings,
) -> Result<ImpactResult, ImpactorError> {
    params.validate()?;
    settings.validate()?;

    let original = record.keplerian_elements()?;
    let asteroid = record.asteroid(params.asteroid_density)?;
    let impactor = params.impactor_spec()?;

    debug!(name = record.display_name(), "evaluating kinetic impact");
    let analysis = analyze_impact(&original, &asteroid, &impactor, settings, GM_SUN)?;

    Ok(ImpactResult::from_analysis(record.display_name(), &analysis))
}

/// Fetch a record from `source` and evaluate the impact on it.
///
/// Errors
/// ------
/// * [`ImpactorError::ExternalDataUnavailable`] from the source, unchanged.
/// * Any error of [`calculate_impact`].
pub fn calculate_impact_from_source<S: NeoSource + ?Sized>(
    source: &S,
    id: &str,
    params: &ImpactParameters,
    settings: &CalculationSettings,
) -> Result<ImpactResult, ImpactorError> {
    params.validate()?;
    settings.validate()?;

    let record = source.fetch(id)?;
    calculate_impact(&record, params, settings)
}
