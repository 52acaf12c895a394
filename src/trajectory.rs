//! # Trajectory sampling
//!
//! Geometric samples of one full revolution, for plotting by a downstream consumer.
//! Each sample is an independent [`propagate`] call, so the sequence can be
//! regenerated at will and evaluated in any order.

use nalgebra::Vector3;
use tracing::debug;

use crate::{
    constants::Second,
    impactor_errors::ImpactorError,
    orbit_type::{keplerian_element::KeplerianElements, state_vector::StateVector},
    propagator::propagate,
};

/// Sample times `t_k = k·T/n`, `k = 0 … n−1`, over one period `T` (seconds).
pub fn sample_times(
    elements: &KeplerianElements,
    mu: f64,
    num_points: usize,
) -> impl Iterator<Item = Second> {
    let step = elements.period(mu) / num_points.max(1) as f64;
    (0..num_points).map(move |k| k as f64 * step)
}

/// Propagated states over one orbital period, starting at the reference epoch.
///
/// Errors
/// ------
/// * [`ImpactorError::InputValidation`] if `num_points == 0`.
/// * Any error raised by [`propagate`].
pub fn sample_orbit_states(
    elements: &KeplerianElements,
    mu: f64,
    num_points: usize,
) -> Result<Vec<StateVector>, ImpactorError> {
    if num_points == 0 {
        return Err(ImpactorError::invalid(
            "trajectory_points",
            "at least one sample is required",
        ));
    }
    ImpactorError::require_positive("gravitational_parameter", mu)?;

    debug!(num_points, "sampling one orbital period");
    sample_times(elements, mu, num_points)
        .map(|t| propagate(elements, t, mu))
        .collect()
}

/// Heliocentric ecliptic positions (meters) over one orbital period.
///
/// The samples are ordered in time, start at the reference epoch and stop one step
/// short of a full revolution, so they trace one closed loop of the ellipse without
/// repeating the first point.
///
/// Arguments
/// ---------
/// * `elements` – Orbit to sample.
/// * `mu` – Gravitational parameter (m³/s²).
/// * `num_points` – Number of samples (the pipeline uses
///   [`DEFAULT_TRAJECTORY_POINTS`](crate::constants::DEFAULT_TRAJECTORY_POINTS)).
pub fn sample_orbit(
    elements: &KeplerianElements,
    mu: f64,
    num_points: usize,
) -> Result<Vec<Vector3<f64>>, ImpactorError> {
    Ok(sample_orbit_states(elements, mu, num_points)?
        .into_iter()
        .map(|state| *state.position())
        .collect())
}

#[cfg(test)]
mod trajectory_test {
    use super::*;
    use crate::constants::{DEFAULT_TRAJECTORY_POINTS, GM_SUN};
    use crate::orbit_type::keplerian_element::test_keplerian_element::reference_orbit;
    use crate::propagator::propagate;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_count_and_start() {
        let kep = reference_orbit();
        let samples = sample_orbit(&kep, GM_SUN, DEFAULT_TRAJECTORY_POINTS).unwrap();

        assert_eq!(samples.len(), DEFAULT_TRAJECTORY_POINTS);
        assert_eq!(samples[0], *propagate(&kep, 0.0, GM_SUN).unwrap().position());
    }

    #[test]
    fn test_samples_stay_on_ellipse() {
        let kep = reference_orbit();
        let q = kep.perihelion_distance();
        let big_q = kep.aphelion_distance();

        for position in sample_orbit(&kep, GM_SUN, 64).unwrap() {
            let r = position.norm();
            assert!(r >= q * (1.0 - 1e-12) && r <= big_q * (1.0 + 1e-12));
        }
    }

    #[test]
    fn test_sampling_is_restartable() {
        let kep = reference_orbit();
        let first = sample_orbit(&kep, GM_SUN, 10).unwrap();
        let second = sample_orbit(&kep, GM_SUN, 10).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sample_times_span_one_period() {
        let kep = reference_orbit();
        let times: Vec<f64> = sample_times(&kep, GM_SUN, 4).collect();
        let period = kep.period(GM_SUN);

        assert_eq!(times.len(), 4);
        assert_eq!(times[0], 0.0);
        assert_relative_eq!(times[3], 0.75 * period, max_relative = 1e-15);
    }

    #[test]
    fn test_zero_points_rejected() {
        let kep = reference_orbit();
        assert!(matches!(
            sample_orbit(&kep, GM_SUN, 0),
            Err(ImpactorError::InputValidation { .. })
        ));
    }
}
