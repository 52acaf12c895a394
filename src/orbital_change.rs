//! # Before/after comparison of two orbits
//!
//! [`compare`] reports, for the semi-major axis, the eccentricity, the inclination and
//! the orbital period, the original and final values together with their absolute and
//! percent change.
//!
//! ## Percent change of a zero original value
//!
//! When the original value is exactly `0.0` (e.g. a circular or an ecliptic orbit) the
//! relative change is undefined. The report then states a percent change of `0.0`.
//! This is a **display convention** chosen to keep the report finite: it does not claim
//! that the element did not change. Read [`ElementChange::change`] for the actual
//! difference.

use std::fmt;

use serde::Serialize;

use crate::impactor_errors::ImpactorError;
use crate::orbit_type::keplerian_element::KeplerianElements;

/// Elements tracked by the change report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedElement {
    SemiMajorAxis,
    Eccentricity,
    Inclination,
    Period,
}

impl TrackedElement {
    pub const ALL: [TrackedElement; 4] = [
        TrackedElement::SemiMajorAxis,
        TrackedElement::Eccentricity,
        TrackedElement::Inclination,
        TrackedElement::Period,
    ];

    /// Short name used in reports (`a`, `e`, `i`, `period`).
    pub fn name(&self) -> &'static str {
        match self {
            TrackedElement::SemiMajorAxis => "a",
            TrackedElement::Eccentricity => "e",
            TrackedElement::Inclination => "i",
            TrackedElement::Period => "period",
        }
    }
}

/// Original and final value of one element, with absolute and percent change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementChange {
    pub original: f64,
    #[serde(rename = "final")]
    pub final_value: f64,
    pub change: f64,
    /// `100·change/original`, or `0.0` when `original == 0.0` (display convention,
    /// see the [module documentation](self)).
    pub percent: f64,
}

impl ElementChange {
    pub fn new(original: f64, final_value: f64) -> Self {
        let change = final_value - original;
        let percent = if original == 0.0 {
            0.0
        } else {
            100.0 * change / original
        };

        Self {
            original,
            final_value,
            change,
            percent,
        }
    }

    /// Same change expressed in another unit (`value · factor`); the percent is unchanged.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            original: self.original * factor,
            final_value: self.final_value * factor,
            change: self.change * factor,
            percent: self.percent,
        }
    }
}

/// Per-element changes between an original and a final orbit, in SI units
/// (`a` in meters, `i` in radians, period in seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalChangeReport {
    pub semi_major_axis: ElementChange,
    pub eccentricity: ElementChange,
    pub inclination: ElementChange,
    pub period: ElementChange,
}

impl OrbitalChangeReport {
    pub fn get(&self, element: TrackedElement) -> &ElementChange {
        match element {
            TrackedElement::SemiMajorAxis => &self.semi_major_axis,
            TrackedElement::Eccentricity => &self.eccentricity,
            TrackedElement::Inclination => &self.inclination,
            TrackedElement::Period => &self.period,
        }
    }

    /// Iterate over `(element, change)` in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (TrackedElement, &ElementChange)> + '_ {
        TrackedElement::ALL
            .into_iter()
            .map(move |element| (element, self.get(element)))
    }
}

/// Compare two orbits element by element.
///
/// Arguments
/// ---------
/// * `original` – Orbit before the impact.
/// * `final_orbit` – Orbit after the impact.
/// * `mu` – Gravitational parameter used for the periods (m³/s²).
///
/// Errors
/// ------
/// * [`ImpactorError::InputValidation`] if `mu` is not strictly positive and finite.
pub fn compare(
    original: &KeplerianElements,
    final_orbit: &KeplerianElements,
    mu: f64,
) -> Result<OrbitalChangeReport, ImpactorError> {
    ImpactorError::require_positive("gravitational_parameter", mu)?;

    Ok(OrbitalChangeReport {
        semi_major_axis: ElementChange::new(
            original.semi_major_axis(),
            final_orbit.semi_major_axis(),
        ),
        eccentricity: ElementChange::new(original.eccentricity(), final_orbit.eccentricity()),
        inclination: ElementChange::new(original.inclination(), final_orbit.inclination()),
        period: ElementChange::new(original.period(mu), final_orbit.period(mu)),
    })
}

impl fmt::Display for OrbitalChangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<8} {:>22} {:>22} {:>14} {:>12}",
            "element", "original", "final", "change", "percent"
        )?;
        for (element, c) in self.iter() {
            writeln!(
                f,
                "{:<8} {:>22.12e} {:>22.12e} {:>14.6e} {:>11.6e}%",
                element.name(),
                c.original,
                c.final_value,
                c.change,
                c.percent
            )?;
        }
        Ok(())
    }
}
