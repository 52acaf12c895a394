//! Physical model of the deflected body: a homogeneous sphere.

use std::f64::consts::PI;

use crate::{
    constants::{Kilogram, Meter},
    impactor_errors::ImpactorError,
};

/// Target asteroid, modeled as a homogeneous sphere.
///
/// Units
/// -----
/// * `diameter`: meters.
/// * `density`: kg/m³.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    diameter: Meter,
    density: f64,
}

impl Asteroid {
    /// Build an asteroid from its diameter and bulk density.
    ///
    /// Errors
    /// ------
    /// * [`ImpactorError::InputValidation`] if either value is not a positive finite number.
    pub fn new(diameter: Meter, density: f64) -> Result<Self, ImpactorError> {
        Ok(Self {
            diameter: ImpactorError::require_positive("diameter", diameter)?,
            density: ImpactorError::require_positive("asteroid_density", density)?,
        })
    }

    /// Build an asteroid from a catalog diameter estimate `[min, max]`, using its mean.
    pub fn from_diameter_range(
        diameter_min: Meter,
        diameter_max: Meter,
        density: f64,
    ) -> Result<Self, ImpactorError> {
        let check = |field: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(value)
            } else {
                Err(ImpactorError::invalid(
                    field,
                    format!("diameter estimate must be a finite value >= 0, got {value}"),
                ))
            }
        };
        let diameter_min = check("estimated_diameter_min", diameter_min)?;
        let diameter_max = check("estimated_diameter_max", diameter_max)?;

        Self::new(0.5 * (diameter_min + diameter_max), density)
    }

    pub fn diameter(&self) -> Meter {
        self.diameter
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Volume of the sphere (m³).
    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * (0.5 * self.diameter).powi(3)
    }

    /// Mass `(4/3)·π·(d/2)³·ρ` (kg).
    pub fn mass(&self) -> Kilogram {
        self.volume() * self.density
    }
}
