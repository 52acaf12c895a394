//! # Elements ⇄ state vector conversions
//!
//! [`elements_to_state`] maps Keplerian elements plus a true anomaly to a heliocentric
//! ecliptic Cartesian state through the perifocal frame. [`state_to_elements`] is the
//! inverse, built on the angular momentum and eccentricity (Laplace–Runge–Lenz)
//! vectors. Only bound ellipses are accepted on the way back: a state with
//! `e ≥ 1` or non-negative energy yields [`ImpactorError::DegenerateOrbit`].

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::{
    constants::{Radian, CIRCULAR_EPS, EQUATORIAL_EPS},
    impactor_errors::ImpactorError,
    kepler::{principal_angle, true_to_mean},
    orbit_type::{keplerian_element::KeplerianElements, state_vector::StateVector},
    ref_system::perifocal_to_ecliptic,
};

fn check_mu(mu: f64) -> Result<f64, ImpactorError> {
    ImpactorError::require_positive("gravitational_parameter", mu)
}

/// Signed angle from `from` to `to`, measured counter-clockwise about `normal`, in `[0, 2π)`.
fn angle_in_plane(from: &Vector3<f64>, to: &Vector3<f64>, normal: &Vector3<f64>) -> Radian {
    principal_angle(from.cross(to).dot(normal).atan2(from.dot(to)))
}

/// Cartesian state on the orbit described by `elements`, at true anomaly `true_anomaly`,
/// tagged with `epoch`.
pub(crate) fn elements_to_state_at(
    elements: &KeplerianElements,
    true_anomaly: Radian,
    mu: f64,
    epoch: Epoch,
) -> Result<StateVector, ImpactorError> {
    let mu = check_mu(mu)?;
    let ecc = elements.eccentricity();

    let p = elements.semi_latus_rectum();
    let (sin_nu, cos_nu) = true_anomaly.sin_cos();
    let radius = p / (1.0 + ecc * cos_nu);

    let position_pf = Vector3::new(radius * cos_nu, radius * sin_nu, 0.0);
    let velocity_pf = (mu / p).sqrt() * Vector3::new(-sin_nu, ecc + cos_nu, 0.0);

    let rot = perifocal_to_ecliptic(
        elements.inclination(),
        elements.ascending_node_longitude(),
        elements.periapsis_argument(),
    );

    Ok(StateVector::new(rot * position_pf, rot * velocity_pf, epoch))
}

/// Convert Keplerian elements and a true anomaly to a heliocentric ecliptic state.
///
/// Perifocal position `(r·cosν, r·sinν, 0)` with `r = p/(1 + e·cosν)`, `p = a(1−e²)`,
/// and perifocal velocity `√(μ/p)·(−sinν, e + cosν, 0)`, both rotated by
/// `R_z(Ω)·R_x(i)·R_z(ω)`.
///
/// Arguments
/// ---------
/// * `elements` – Orbit to evaluate.
/// * `true_anomaly` – True anomaly ν (radians).
/// * `mu` – Gravitational parameter of the central body (m³/s²).
///
/// Return
/// ------
/// * A [`StateVector`] (m, m/s) tagged with the elements' reference epoch.
///
/// Errors
/// ------
/// * [`ImpactorError::InputValidation`] if `mu` is not a positive finite number.
pub fn elements_to_state(
    elements: &KeplerianElements,
    true_anomaly: Radian,
    mu: f64,
) -> Result<StateVector, ImpactorError> {
    elements_to_state_at(elements, true_anomaly, mu, elements.reference_epoch())
}

/// Recover Keplerian elements and true anomaly from a heliocentric ecliptic state.
///
/// Steps
/// -----
/// 1. `h = r × v`, `e_vec = (v × h)/μ − r/|r|`, `e = |e_vec|`.
/// 2. `a = −μ / (2ε)` from the specific energy `ε = v²/2 − μ/|r|` (vis-viva).
/// 3. `i = atan2(√(h_x² + h_y²), h_z)`, node direction `n = ẑ × h`, `Ω = atan2(n_y, n_x)`.
/// 4. ω is the angle from the node to `e_vec`, ν the angle from `e_vec` to `r`,
///    both measured in the orbital plane about `ĥ`.
///
/// Degenerate geometry follows fixed conventions:
/// * equatorial orbits (`sin i` below [`EQUATORIAL_EPS`]): `Ω = 0` and the +x axis
///   replaces the node direction;
/// * circular orbits (`e` below [`CIRCULAR_EPS`]): `ω = 0` and ν is counted from the
///   node direction (argument of latitude).
///
/// The mean anomaly of the returned elements corresponds to ν, and their reference
/// epoch is the epoch of `state`.
///
/// Errors
/// ------
/// * [`ImpactorError::DegenerateOrbit`] if the orbit is not a bound ellipse
///   (`e ≥ 1`, `a ≤ 0`, or zero angular momentum).
/// * [`ImpactorError::InputValidation`] if `mu` or the state is not finite/positive.
pub fn state_to_elements(
    state: &StateVector,
    mu: f64,
) -> Result<(KeplerianElements, Radian), ImpactorError> {
    let mu = check_mu(mu)?;
    let position = state.position();
    let velocity = state.velocity();

    if !(position.iter().chain(velocity.iter()).all(|x| x.is_finite())) {
        return Err(ImpactorError::invalid(
            "state_vector",
            "position and velocity must be finite",
        ));
    }

    let radius = position.norm();
    if radius == 0.0 {
        return Err(ImpactorError::invalid(
            "state_vector",
            "position must not be at the central body",
        ));
    }

    let energy = state.specific_energy(mu);
    let semi_major_axis = -mu / (2.0 * energy);

    let angular_momentum = state.angular_momentum();
    let h_norm = angular_momentum.norm();

    let ecc_vector = velocity.cross(&angular_momentum) / mu - position / radius;
    let eccentricity = ecc_vector.norm();

    // rectilinear motion has no orbital plane and e = 1
    if h_norm == 0.0 || eccentricity >= 1.0 || !(semi_major_axis > 0.0) {
        return Err(ImpactorError::DegenerateOrbit {
            eccentricity: if h_norm == 0.0 { 1.0 } else { eccentricity },
            semi_major_axis,
        });
    }

    let h_hat = angular_momentum / h_norm;

    let sin_incl = (h_hat.x.powi(2) + h_hat.y.powi(2)).sqrt();
    let inclination = sin_incl.atan2(h_hat.z);

    let equatorial = sin_incl < EQUATORIAL_EPS;
    let (ascending_node_longitude, node_direction) = if equatorial {
        (0.0, Vector3::x())
    } else {
        let node = Vector3::new(-h_hat.y, h_hat.x, 0.0) / sin_incl;
        (principal_angle(node.y.atan2(node.x)), node)
    };

    let circular = eccentricity < CIRCULAR_EPS;
    let (periapsis_argument, true_anomaly) = if circular {
        (0.0, angle_in_plane(&node_direction, position, &h_hat))
    } else {
        (
            angle_in_plane(&node_direction, &ecc_vector, &h_hat),
            angle_in_plane(&ecc_vector, position, &h_hat),
        )
    };

    let mean_anomaly = true_to_mean(true_anomaly, eccentricity)?;

    let elements = KeplerianElements::new(
        state.epoch(),
        semi_major_axis,
        eccentricity,
        inclination,
        ascending_node_longitude,
        periapsis_argument,
        mean_anomaly,
    )?;

    Ok((elements, true_anomaly))
}

#[cfg(test)]
mod orb_elem_test {
    use super::*;
    use crate::constants::{AU, GM_SUN, RADEG};
    use crate::orbit_type::keplerian_element::test_keplerian_element::reference_orbit;
    use crate::time::epoch_from_jd_tdb;
    use approx::assert_relative_eq;

    fn epoch() -> Epoch {
        epoch_from_jd_tdb(2_460_600.5).unwrap()
    }

    #[test]
    fn test_perihelion_state_in_plane() {
        // i = Ω = ω = 0: perihelion on +x, velocity along +y
        let kep = KeplerianElements::new(epoch(), AU, 0.5, 0.0, 0.0, 0.0, 0.0).unwrap();
        let state = elements_to_state(&kep, 0.0, GM_SUN).unwrap();

        assert_relative_eq!(state.position().x, 0.5 * AU, max_relative = 1e-14);
        assert_relative_eq!(state.position().y, 0.0);
        let v_peri = (GM_SUN / AU * 1.5 / 0.5).sqrt();
        assert_relative_eq!(state.velocity().y, v_peri, max_relative = 1e-14);
        assert_eq!(state.epoch(), epoch());
    }

    #[test]
    fn test_vis_viva_holds() {
        let kep = reference_orbit();
        for k in 0..12 {
            let nu = k as f64 * 30.0 * RADEG;
            let state = elements_to_state(&kep, nu, GM_SUN).unwrap();
            let expected = GM_SUN * (2.0 / state.radius() - 1.0 / kep.semi_major_axis());
            assert_relative_eq!(state.speed().powi(2), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_round_trip_reference_orbit() {
        let kep = reference_orbit();
        let nu = kep.true_anomaly().unwrap();
        let state = elements_to_state(&kep, nu, GM_SUN).unwrap();
        let (back, nu_back) = state_to_elements(&state, GM_SUN).unwrap();

        assert_relative_eq!(back.semi_major_axis(), kep.semi_major_axis(), max_relative = 1e-12);
        assert_relative_eq!(back.eccentricity(), kep.eccentricity(), epsilon = 1e-12);
        assert_relative_eq!(back.inclination(), kep.inclination(), epsilon = 1e-12);
        assert_relative_eq!(
            back.ascending_node_longitude(),
            kep.ascending_node_longitude(),
            epsilon = 1e-12
        );
        assert_relative_eq!(back.periapsis_argument(), kep.periapsis_argument(), epsilon = 1e-10);
        assert_relative_eq!(back.mean_anomaly(), kep.mean_anomaly(), epsilon = 1e-10);
        assert_relative_eq!(nu_back, nu, epsilon = 1e-10);
    }

    #[test]
    fn test_circular_equatorial_conventions() {
        let kep = KeplerianElements::new(epoch(), AU, 0.0, 0.0, 0.0, 0.0, 1.0).unwrap();
        let state = elements_to_state(&kep, 1.0, GM_SUN).unwrap();
        let (back, nu) = state_to_elements(&state, GM_SUN).unwrap();

        assert_eq!(back.ascending_node_longitude(), 0.0);
        assert_eq!(back.periapsis_argument(), 0.0);
        assert!(back.eccentricity() < 1e-12);
        assert_relative_eq!(nu, 1.0, epsilon = 1e-12);

        let again = elements_to_state(&back, nu, GM_SUN).unwrap();
        assert_relative_eq!(again.position(), state.position(), max_relative = 1e-12);
        assert_relative_eq!(again.velocity(), state.velocity(), max_relative = 1e-12);
    }

    #[test]
    fn test_hyperbolic_state_is_degenerate() {
        let position = Vector3::new(AU, 0.0, 0.0);
        let v_escape = (2.0 * GM_SUN / AU).sqrt();
        let state = StateVector::new(position, Vector3::new(0.0, 1.1 * v_escape, 0.0), epoch());

        let err = state_to_elements(&state, GM_SUN).unwrap_err();
        match err {
            ImpactorError::DegenerateOrbit {
                eccentricity,
                semi_major_axis,
            } => {
                assert!(eccentricity >= 1.0);
                assert!(semi_major_axis < 0.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_radial_state_is_degenerate() {
        let state = StateVector::new(
            Vector3::new(AU, 0.0, 0.0),
            Vector3::new(1_000.0, 0.0, 0.0),
            epoch(),
        );
        assert!(matches!(
            state_to_elements(&state, GM_SUN),
            Err(ImpactorError::DegenerateOrbit { .. })
        ));
    }

    #[test]
    fn test_invalid_mu() {
        let kep = reference_orbit();
        assert!(matches!(
            elements_to_state(&kep, 0.0, -1.0),
            Err(ImpactorError::InputValidation { .. })
        ));
    }
}
