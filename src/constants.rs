//! # Constants and type definitions for Impactor
//!
//! This module centralizes the **physical constants**, **conversion factors**, and
//! **numerical settings** used throughout the `impactor` library.
//!
//! ## Overview
//!
//! - Heliocentric gravitational parameter and astronomical unit (SI)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, AU ↔ m, m ↔ km)
//! - Kepler solver tolerance and iteration cap
//! - Core type aliases used across the crate
//!
//! The numerical core works exclusively in SI units (m, m/s, s, kg, rad).
//! Conversions to and from AU, degrees, days and kilometers only happen in
//! [`crate::neo_record`] (input) and [`crate::impact`] / [`crate::export`] (output).

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Heliocentric gravitational parameter μ☉ in m³/s² (IAU 2009 TDB-compatible)
pub const GM_SUN: f64 = 1.327_124_400_18e20;

/// Astronomical Unit in meters (IAU 2012)
pub const AU: f64 = 149_597_870_700.0;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Meters in a kilometer
pub const METERS_PER_KM: f64 = 1_000.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

// -------------------------------------------------------------------------------------------------
// Numerical settings
// -------------------------------------------------------------------------------------------------

/// Residual tolerance on `E − e·sin(E) − M` for the Kepler solver
pub const KEPLER_TOLERANCE: f64 = 1e-8;

/// Maximum number of Newton–Raphson iterations for the Kepler solver
pub const KEPLER_MAX_ITER: usize = 50;

/// Below this eccentricity the orbit is treated as circular (ω undefined)
pub const CIRCULAR_EPS: f64 = 1e-11;

/// Below this value of sin(i) the orbit is treated as equatorial (Ω undefined)
pub const EQUATORIAL_EPS: f64 = 1e-11;

/// Default number of samples along one orbital revolution
pub const DEFAULT_TRAJECTORY_POINTS: usize = 100;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Mass in kilograms
pub type Kilogram = f64;
/// Speed in meters per second
pub type MeterPerSecond = f64;
/// Duration in seconds
pub type Second = f64;
/// Julian Date (days)
pub type JD = f64;
