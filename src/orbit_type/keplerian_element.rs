//! # Keplerian orbital elements
//!
//! This module defines the [`KeplerianElements`] struct, the **classical orbital
//! element representation** `(a, e, i, Ω, ω, M)` at a reference epoch, restricted to
//! bound elliptic orbits.
//!
//! ## Invariants
//!
//! A [`KeplerianElements`] value can only be obtained through
//! [`KeplerianElements::new`], which enforces:
//!
//! - `a > 0` and finite,
//! - `0 ≤ e < 1`,
//! - every angle finite and normalized to `[0, 2π)` with [`principal_angle`].
//!
//! The value is immutable afterwards: maneuvers and propagation always build new
//! values instead of editing an existing one.
//!
//! ## Units
//!
//! - Lengths: **meters**
//! - Angles: **radians**
//! - Epoch: [`hifitime::Epoch`] (TDB when built from a NeoWs record)
//!
//! ## Degeneracies
//!
//! - **Circular orbits (`e → 0`)**: the periapsis argument ω is undefined and
//!   conventionally `0.0`; the anomaly is then counted from the ascending node.
//! - **Equatorial orbits (`sin i → 0`)**: Ω is undefined and conventionally `0.0`.

use std::fmt;

use hifitime::Epoch;

use crate::{
    constants::{Meter, Radian, Second, AU, DPI},
    impactor_errors::ImpactorError,
    kepler::{mean_to_true, principal_angle},
};

/// Keplerian orbital elements (osculating, two-body, elliptic).
///
/// Units
/// -----
/// * `reference_epoch`: [`Epoch`].
/// * `semi_major_axis`: meters.
/// * `eccentricity`: unitless, `0 ≤ e < 1`.
/// * `inclination`: radians.
/// * `ascending_node_longitude`: radians (Ω).
/// * `periapsis_argument`: radians (ω).
/// * `mean_anomaly`: radians (M at `reference_epoch`).
#[derive(Debug, PartialEq, Clone)]
pub struct KeplerianElements {
    reference_epoch: Epoch,
    semi_major_axis: Meter,
    eccentricity: f64,
    inclination: Radian,
    ascending_node_longitude: Radian,
    periapsis_argument: Radian,
    mean_anomaly: Radian,
}

impl KeplerianElements {
    /// Build a validated set of elliptic Keplerian elements.
    ///
    /// Arguments
    /// ---------
    /// * `reference_epoch` – Epoch at which `mean_anomaly` is given.
    /// * `semi_major_axis` – `a` in meters, finite and `> 0`.
    /// * `eccentricity` – `e`, with `0 ≤ e < 1`.
    /// * `inclination`, `ascending_node_longitude`, `periapsis_argument`,
    ///   `mean_anomaly` – radians, any finite value (normalized to `[0, 2π)`).
    ///
    /// Errors
    /// ------
    /// * [`ImpactorError::InputValidation`] naming the offending element.
    pub fn new(
        reference_epoch: Epoch,
        semi_major_axis: Meter,
        eccentricity: f64,
        inclination: Radian,
        ascending_node_longitude: Radian,
        periapsis_argument: Radian,
        mean_anomaly: Radian,
    ) -> Result<Self, ImpactorError> {
        ImpactorError::require_positive("semi_major_axis", semi_major_axis)?;

        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ImpactorError::invalid(
                "eccentricity",
                format!("only bound elliptic orbits are supported (0 <= e < 1), got {eccentricity}"),
            ));
        }

        let angle = |field: &str, value: f64| -> Result<Radian, ImpactorError> {
            if value.is_finite() {
                Ok(principal_angle(value))
            } else {
                Err(ImpactorError::invalid(
                    field,
                    format!("angle must be finite, got {value}"),
                ))
            }
        };

        Ok(Self {
            reference_epoch,
            semi_major_axis,
            eccentricity,
            inclination: angle("inclination", inclination)?,
            ascending_node_longitude: angle("ascending_node_longitude", ascending_node_longitude)?,
            periapsis_argument: angle("periapsis_argument", periapsis_argument)?,
            mean_anomaly: angle("mean_anomaly", mean_anomaly)?,
        })
    }

    pub fn reference_epoch(&self) -> Epoch {
        self.reference_epoch
    }

    pub fn semi_major_axis(&self) -> Meter {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination(&self) -> Radian {
        self.inclination
    }

    pub fn ascending_node_longitude(&self) -> Radian {
        self.ascending_node_longitude
    }

    pub fn periapsis_argument(&self) -> Radian {
        self.periapsis_argument
    }

    pub fn mean_anomaly(&self) -> Radian {
        self.mean_anomaly
    }

    /// Semi-latus rectum `p = a(1 − e²)` (meters).
    pub fn semi_latus_rectum(&self) -> Meter {
        self.semi_major_axis * (1.0 - self.eccentricity.powi(2))
    }

    /// Perihelion distance `q = a(1 − e)` (meters).
    pub fn perihelion_distance(&self) -> Meter {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Aphelion distance `Q = a(1 + e)` (meters).
    pub fn aphelion_distance(&self) -> Meter {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Mean motion `n = √(μ/a³)` (rad/s).
    pub fn mean_motion(&self, mu: f64) -> f64 {
        (mu / self.semi_major_axis.powi(3)).sqrt()
    }

    /// Orbital period `T = 2π/n` (seconds).
    pub fn period(&self, mu: f64) -> Second {
        DPI / self.mean_motion(mu)
    }

    /// True anomaly at the reference epoch, from the stored mean anomaly.
    ///
    /// Errors
    /// ------
    /// * [`ImpactorError::Convergence`] if the Kepler solve fails.
    pub fn true_anomaly(&self) -> Result<Radian, ImpactorError> {
        mean_to_true(self.mean_anomaly, self.eccentricity)
    }
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rad_to_deg = 180.0 / std::f64::consts::PI;
        writeln!(f, "Keplerian Elements @ epoch: {}", self.reference_epoch)?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.9} AU",
            self.semi_major_axis / AU
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.9}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6} rad ({:.6}°)",
            self.inclination,
            self.inclination * rad_to_deg
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6} rad ({:.6}°)",
            self.ascending_node_longitude,
            self.ascending_node_longitude * rad_to_deg
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6} rad ({:.6}°)",
            self.periapsis_argument,
            self.periapsis_argument * rad_to_deg
        )?;
        writeln!(
            f,
            "  M   (mean anomaly)          = {:.6} rad ({:.6}°)",
            self.mean_anomaly,
            self.mean_anomaly * rad_to_deg
        )
    }
}
