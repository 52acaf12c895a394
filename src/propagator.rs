//! # Two-body propagation
//!
//! Keplerian propagation by mean motion: the mean anomaly advances linearly in time,
//! and the state at the new epoch follows from the Kepler solve and the perifocal
//! rotation. No perturbations are modeled.

use crate::{
    constants::Second,
    impactor_errors::ImpactorError,
    kepler::{eccentric_to_true, mean_to_eccentric, principal_angle},
    orb_elem::elements_to_state_at,
    orbit_type::{keplerian_element::KeplerianElements, state_vector::StateVector},
    time::shift_epoch,
};

/// Propagate an orbit by `dt` seconds from its reference epoch.
///
/// ```text
/// n  = √(μ/a³)
/// M₂ = (M₁ + n·Δt) mod 2π
/// E₂ = solve(M₂, e),  ν₂ = ν(E₂, e)
/// ```
///
/// Arguments
/// ---------
/// * `elements` – Orbit at its reference epoch.
/// * `dt` – Time offset in seconds; may be negative or span several periods.
/// * `mu` – Gravitational parameter of the central body (m³/s²).
///
/// Return
/// ------
/// * The [`StateVector`] at `reference_epoch + dt`.
///
/// Errors
/// ------
/// * [`ImpactorError::InputValidation`] if `dt` is not finite or `mu` is invalid.
/// * [`ImpactorError::Convergence`] if the Kepler solve fails.
pub fn propagate(
    elements: &KeplerianElements,
    dt: Second,
    mu: f64,
) -> Result<StateVector, ImpactorError> {
    if !dt.is_finite() {
        return Err(ImpactorError::invalid(
            "dt",
            format!("propagation interval must be finite, got {dt}"),
        ));
    }
    ImpactorError::require_positive("gravitational_parameter", mu)?;

    let ecc = elements.eccentricity();
    let mean_anomaly = principal_angle(elements.mean_anomaly() + elements.mean_motion(mu) * dt);

    let eccentric_anomaly = mean_to_eccentric(mean_anomaly, ecc)?;
    let true_anomaly = eccentric_to_true(eccentric_anomaly, ecc)?;

    elements_to_state_at(
        elements,
        true_anomaly,
        mu,
        shift_epoch(&elements.reference_epoch(), dt),
    )
}
