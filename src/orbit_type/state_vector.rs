use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::{Meter, MeterPerSecond};

/// Heliocentric ecliptic Cartesian state at a given epoch.
///
/// Units
/// -----
/// * `position`: meters.
/// * `velocity`: meters per second.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    epoch: Epoch,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>, epoch: Epoch) -> Self {
        Self {
            position,
            velocity,
            epoch,
        }
    }

    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    pub fn velocity(&self) -> &Vector3<f64> {
        &self.velocity
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Heliocentric distance |r| (meters).
    pub fn radius(&self) -> Meter {
        self.position.norm()
    }

    /// Speed |v| (m/s).
    pub fn speed(&self) -> MeterPerSecond {
        self.velocity.norm()
    }

    /// Specific angular momentum `h = r × v` (m²/s).
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.velocity)
    }

    /// Specific orbital energy `v²/2 − μ/r` (J/kg).
    pub fn specific_energy(&self, mu: f64) -> f64 {
        0.5 * self.velocity.norm_squared() - mu / self.radius()
    }

    /// New state with the same position and epoch and the velocity increased by `delta_v`.
    pub fn with_velocity_increment(&self, delta_v: &Vector3<f64>) -> Self {
        Self {
            position: self.position,
            velocity: self.velocity + delta_v,
            epoch: self.epoch,
        }
    }
}
