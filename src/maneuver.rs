//! # Impulsive maneuver from a kinetic impact
//!
//! A kinetic impactor of mass `m` hitting the asteroid (mass `M`) with closing speed
//! `v` transfers a momentum `β·m·v`, where β ≥ 1 accounts for the recoil of the ejecta.
//! The asteroid therefore receives an instantaneous velocity change
//!
//! ```text
//! |Δv| = β·m·v / M
//! ```
//!
//! aimed along one of the [`DirectionMode`]s. [`apply_maneuver`] adds that impulse to
//! the heliocentric velocity at the reference epoch and rebuilds the orbit from the new
//! state; the original elements are never modified.

use std::{fmt, str::FromStr};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    asteroid::Asteroid,
    constants::{Kilogram, MeterPerSecond},
    impactor_errors::ImpactorError,
    orb_elem::{elements_to_state, state_to_elements},
    orbit_type::{keplerian_element::KeplerianElements, state_vector::StateVector},
};

/// Direction along which the impulse is applied.
///
/// Parsing accepts the mode name (`"prograde"`, `"retrograde"`, `"radial"`) as well as
/// the numeric form codes `"1"`, `"2"` and `"3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DirectionMode {
    /// Along the heliocentric velocity (speeds the asteroid up).
    Prograde,
    /// Against the heliocentric velocity (slows the asteroid down).
    Retrograde,
    /// Along the Sun → asteroid direction.
    Radial,
}

impl DirectionMode {
    /// Unit vector of the impulse for the given state.
    fn unit_vector(&self, state: &StateVector) -> Result<Vector3<f64>, ImpactorError> {
        let (reference, sign) = match self {
            DirectionMode::Prograde => (state.velocity(), 1.0),
            DirectionMode::Retrograde => (state.velocity(), -1.0),
            DirectionMode::Radial => (state.position(), 1.0),
        };

        reference
            .try_normalize(f64::MIN_POSITIVE)
            .map(|unit| sign * unit)
            .ok_or_else(|| {
                ImpactorError::invalid(
                    "state_at_epoch",
                    format!("cannot take a {self} direction from a zero-length vector"),
                )
            })
    }
}

impl fmt::Display for DirectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DirectionMode::Prograde => "prograde",
            DirectionMode::Retrograde => "retrograde",
            DirectionMode::Radial => "radial",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DirectionMode {
    type Err = ImpactorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prograde" | "1" => Ok(DirectionMode::Prograde),
            "retrograde" | "2" => Ok(DirectionMode::Retrograde),
            "radial" | "3" => Ok(DirectionMode::Radial),
            other => Err(ImpactorError::invalid(
                "direction_mode",
                format!("expected prograde, retrograde or radial (or 1, 2, 3), got {other:?}"),
            )),
        }
    }
}

impl TryFrom<String> for DirectionMode {
    type Error = ImpactorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Impacting spacecraft.
///
/// Units
/// -----
/// * `craft_mass`: kg.
/// * `craft_velocity`: closing speed relative to the asteroid, m/s.
/// * `beta`: momentum-enhancement factor (dimensionless).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactorSpec {
    craft_mass: Kilogram,
    craft_velocity: MeterPerSecond,
    beta: f64,
    direction: DirectionMode,
}

impl ImpactorSpec {
    /// Errors
    /// ------
    /// * [`ImpactorError::InputValidation`] if mass, velocity or β is not positive and finite.
    pub fn new(
        craft_mass: Kilogram,
        craft_velocity: MeterPerSecond,
        beta: f64,
        direction: DirectionMode,
    ) -> Result<Self, ImpactorError> {
        Ok(Self {
            craft_mass: ImpactorError::require_positive("craft_mass", craft_mass)?,
            craft_velocity: ImpactorError::require_positive("craft_velocity", craft_velocity)?,
            beta: ImpactorError::require_positive("beta", beta)?,
            direction,
        })
    }

    pub fn craft_mass(&self) -> Kilogram {
        self.craft_mass
    }

    pub fn craft_velocity(&self) -> MeterPerSecond {
        self.craft_velocity
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn direction(&self) -> DirectionMode {
        self.direction
    }

    /// Velocity change imparted to `asteroid` in the state `state_at_epoch`.
    pub fn delta_v_on(
        &self,
        asteroid: &Asteroid,
        state_at_epoch: &StateVector,
    ) -> Result<DeltaV, ImpactorError> {
        compute_delta_v(
            self.beta,
            self.craft_mass,
            self.craft_velocity,
            asteroid.mass(),
            self.direction,
            state_at_epoch,
        )
    }
}

/// Instantaneous velocity change in the heliocentric ecliptic frame (m/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaV(Vector3<f64>);

impl DeltaV {
    pub fn new(vector: Vector3<f64>) -> Self {
        DeltaV(vector)
    }

    pub fn zero() -> Self {
        DeltaV(Vector3::zeros())
    }

    pub fn vector(&self) -> &Vector3<f64> {
        &self.0
    }

    pub fn magnitude(&self) -> MeterPerSecond {
        self.0.norm()
    }
}

/// Compute the velocity change produced by a kinetic impact.
///
/// Magnitude `β·m·v / M`, aimed along `+v̂` (prograde), `−v̂` (retrograde) or `+r̂`
/// (radial), where `v̂` and `r̂` are taken from `state_at_epoch`.
///
/// Arguments
/// ---------
/// * `beta` – Momentum-enhancement factor β.
/// * `craft_mass` – Impactor mass `m` (kg).
/// * `craft_velocity` – Closing speed `v` (m/s).
/// * `asteroid_mass` – Asteroid mass `M` (kg).
/// * `direction` – Impulse direction.
/// * `state_at_epoch` – Asteroid state at the impact epoch.
///
/// Errors
/// ------
/// * [`ImpactorError::InputValidation`] if `asteroid_mass ≤ 0` (or any scalar input is
///   not positive and finite), or if the reference vector has zero length.
pub fn compute_delta_v(
    beta: f64,
    craft_mass: Kilogram,
    craft_velocity: MeterPerSecond,
    asteroid_mass: Kilogram,
    direction: DirectionMode,
    state_at_epoch: &StateVector,
) -> Result<DeltaV, ImpactorError> {
    ImpactorError::require_positive("asteroid_mass", asteroid_mass)?;
    ImpactorError::require_positive("beta", beta)?;
    ImpactorError::require_positive("craft_mass", craft_mass)?;
    ImpactorError::require_positive("craft_velocity", craft_velocity)?;

    let magnitude = beta * craft_mass * craft_velocity / asteroid_mass;
    let delta_v = DeltaV(magnitude * direction.unit_vector(state_at_epoch)?);

    debug!(
        %direction,
        magnitude,
        dv_x = delta_v.0.x,
        dv_y = delta_v.0.y,
        dv_z = delta_v.0.z,
        "computed impact delta-v"
    );
    Ok(delta_v)
}

/// Apply an impulsive velocity change at the reference epoch of `original`.
///
/// The state at epoch is evaluated at the true anomaly implied by the stored mean
/// anomaly; the impulse is added to the velocity while position and epoch are kept;
/// the new state is converted back to elements.
///
/// Errors
/// ------
/// * [`ImpactorError::DegenerateOrbit`] if the impulse leaves the asteroid on an
///   unbound (or rectilinear) trajectory. This is an expected outcome for a large,
///   badly aimed impulse and is returned unchanged.
/// * [`ImpactorError::Convergence`] from the Kepler solve.
pub fn apply_maneuver(
    original: &KeplerianElements,
    delta_v: &DeltaV,
    mu: f64,
) -> Result<KeplerianElements, ImpactorError> {
    let state_at_epoch = elements_to_state(original, original.true_anomaly()?, mu)?;
    let kicked = state_at_epoch.with_velocity_increment(delta_v.vector());

    match state_to_elements(&kicked, mu) {
        Ok((final_elements, _)) => {
            debug!(
                a = final_elements.semi_major_axis(),
                e = final_elements.eccentricity(),
                "post-impact orbit"
            );
            Ok(final_elements)
        }
        Err(err) => {
            if let ImpactorError::DegenerateOrbit { .. } = err {
                warn!(delta_v = delta_v.magnitude(), "impulse leaves the asteroid unbound: {err}");
            }
            Err(err)
        }
    }
}

/// Orbits before and after an impact.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPair {
    pub original: KeplerianElements,
    pub final_orbit: KeplerianElements,
}

impl OrbitPair {
    /// Evaluate the impact of `impactor` on `asteroid` moving on `original`.
    ///
    /// Return
    /// ------
    /// * The delta-v applied and the resulting pair of orbits (`original` is cloned,
    ///   never modified).
    pub fn from_impact(
        original: &KeplerianElements,
        asteroid: &Asteroid,
        impactor: &ImpactorSpec,
        mu: f64,
    ) -> Result<(DeltaV, Self), ImpactorError> {
        let state_at_epoch = elements_to_state(original, original.true_anomaly()?, mu)?;
        let delta_v = impactor.delta_v_on(asteroid, &state_at_epoch)?;
        let final_orbit = apply_maneuver(original, &delta_v, mu)?;

        Ok((
            delta_v,
            OrbitPair {
                original: original.clone(),
                final_orbit,
            },
        ))
    }
}
