//! # Anomaly conversions for elliptic orbits
//!
//! Conversions between the three measures of orbital position:
//!
//! * **M** – mean anomaly (linear in time),
//! * **E** – eccentric anomaly (auxiliary circle),
//! * **ν** – true anomaly (geometric angle from periapsis).
//!
//! The only non-algebraic step is `M → E`, i.e. solving Kepler's equation
//! `E − e·sin(E) = M`, done here with a bounded Newton–Raphson iteration.
//! Every routine is restricted to bound orbits, `0 ≤ e < 1`.

use tracing::trace;

use crate::constants::{Radian, DPI, KEPLER_MAX_ITER, KEPLER_TOLERANCE};
use crate::impactor_errors::ImpactorError;

/// Principal value of an angle in radians, in `[0, 2π)`.
pub fn principal_angle(a: f64) -> f64 {
    let r = a.rem_euclid(DPI);
    // rem_euclid may round up to exactly 2π for tiny negative inputs
    if r >= DPI {
        0.0
    } else {
        r
    }
}

fn check_elliptic(eccentricity: f64) -> Result<(), ImpactorError> {
    if (0.0..1.0).contains(&eccentricity) {
        Ok(())
    } else {
        Err(ImpactorError::invalid(
            "eccentricity",
            format!("anomaly conversions require 0 <= e < 1, got {eccentricity}"),
        ))
    }
}

/// Solve Kepler's equation `E − e·sin(E) = M` for the eccentric anomaly.
///
/// Newton–Raphson iteration started from `E₀ = M`:
///
/// ```text
/// E ← E − (E − e·sin E − M) / (1 − e·cos E)
/// ```
///
/// The root is kept inside a shrinking bracket of `[0, 2π]`; a Newton step that
/// leaves the bracket is replaced by a bisection step, which keeps the iteration
/// convergent for eccentricities arbitrarily close to 1.
///
/// The iteration stops when the residual `|E − e·sin E − M|` drops below
/// [`KEPLER_TOLERANCE`]. The mean anomaly is first reduced to `[0, 2π)`, so the
/// returned `E` also lies in `[0, 2π)`.
///
/// Arguments
/// ---------
/// * `mean_anomaly` – Mean anomaly `M` (radians, any value).
/// * `eccentricity` – Eccentricity `e`, with `0 ≤ e < 1`.
///
/// Return
/// ------
/// * The eccentric anomaly `E` in radians.
///
/// Errors
/// ------
/// * [`ImpactorError::InputValidation`] if `e` is outside `[0, 1)`.
/// * [`ImpactorError::Convergence`] if [`KEPLER_MAX_ITER`] iterations were not enough.
pub fn mean_to_eccentric(
    mean_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, ImpactorError> {
    check_elliptic(eccentricity)?;

    let mean_anomaly = principal_angle(mean_anomaly);
    let residual = |ecc_anom: f64| ecc_anom - eccentricity * ecc_anom.sin() - mean_anomaly;

    // The root always lies in [0, 2π]: residual(0) = −M ≤ 0 and residual(2π) = 2π − M > 0.
    let (mut lower, mut upper) = (0.0, DPI);
    let mut ecc_anom = mean_anomaly;
    let mut res = residual(ecc_anom);

    // final Newton step past the stopping tolerance, kept only if it stays bracketed and improves
    let polish = |ecc_anom: f64, res: f64, lower: f64, upper: f64| {
        let refined = ecc_anom - res / (1.0 - eccentricity * ecc_anom.cos());
        if refined >= lower && refined <= upper && residual(refined).abs() <= res.abs() {
            refined
        } else {
            ecc_anom
        }
    };

    for iter in 0..KEPLER_MAX_ITER {
        if res.abs() < KEPLER_TOLERANCE {
            trace!(iter, ecc_anom, res, "Kepler equation converged");
            return Ok(polish(ecc_anom, res, lower, upper));
        }

        if res < 0.0 {
            lower = ecc_anom;
        } else {
            upper = ecc_anom;
        }

        let newton = ecc_anom - res / (1.0 - eccentricity * ecc_anom.cos());
        // near e = 1 the Newton step can overshoot the bracket and cycle; bisect instead
        ecc_anom = if newton > lower && newton < upper {
            newton
        } else {
            0.5 * (lower + upper)
        };
        res = residual(ecc_anom);
    }

    if res.abs() < KEPLER_TOLERANCE {
        return Ok(polish(ecc_anom, res, lower, upper));
    }

    Err(ImpactorError::Convergence {
        mean_anomaly,
        eccentricity,
        iterations: KEPLER_MAX_ITER,
        residual: res,
    })
}

/// Eccentric anomaly → true anomaly, normalized to `[0, 2π)`.
///
/// `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`
pub fn eccentric_to_true(
    eccentric_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, ImpactorError> {
    check_elliptic(eccentricity)?;
    let half = 0.5 * eccentric_anomaly;
    let nu = 2.0
        * ((1.0 + eccentricity).sqrt() * half.sin())
            .atan2((1.0 - eccentricity).sqrt() * half.cos());
    Ok(principal_angle(nu))
}

/// True anomaly → eccentric anomaly, normalized to `[0, 2π)`.
///
/// `E = 2·atan2(√(1−e)·sin(ν/2), √(1+e)·cos(ν/2))`
pub fn true_to_eccentric(
    true_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, ImpactorError> {
    check_elliptic(eccentricity)?;
    let half = 0.5 * true_anomaly;
    let ecc_anom = 2.0
        * ((1.0 - eccentricity).sqrt() * half.sin())
            .atan2((1.0 + eccentricity).sqrt() * half.cos());
    Ok(principal_angle(ecc_anom))
}

/// Eccentric anomaly → mean anomaly (Kepler's equation), normalized to `[0, 2π)`.
pub fn eccentric_to_mean(
    eccentric_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, ImpactorError> {
    check_elliptic(eccentricity)?;
    Ok(principal_angle(
        eccentric_anomaly - eccentricity * eccentric_anomaly.sin(),
    ))
}

/// Mean anomaly → true anomaly, through the Kepler solve.
pub fn mean_to_true(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, ImpactorError> {
    let ecc_anom = mean_to_eccentric(mean_anomaly, eccentricity)?;
    eccentric_to_true(ecc_anom, eccentricity)
}

/// True anomaly → mean anomaly.
pub fn true_to_mean(true_anomaly: Radian, eccentricity: f64) -> Result<Radian, ImpactorError> {
    let ecc_anom = true_to_eccentric(true_anomaly, eccentricity)?;
    eccentric_to_mean(ecc_anom, eccentricity)
}
