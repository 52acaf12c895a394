//! # Reference frame rotations
//!
//! Elementary rotations used to map vectors from the **perifocal frame**
//! (orbital plane, x-axis toward periapsis) to the **heliocentric ecliptic
//! frame** in which every stored state vector lives.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::Radian;

/// Axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Elementary (active) rotation matrix of angle `alpha` about `axis`.
///
/// The matrix rotates a vector counter-clockwise by `alpha` when looking down
/// the axis toward the origin.
///
/// Arguments
/// ---------
/// * `alpha` – Rotation angle (radians).
/// * `axis` – Rotation axis.
///
/// Return
/// ------
/// * The 3×3 rotation matrix.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Perifocal → ecliptic rotation `R_z(Ω)·R_x(i)·R_z(ω)` (3-1-3 sequence).
///
/// Arguments
/// ---------
/// * `inclination` – Orbital inclination `i` (radians).
/// * `ascending_node_longitude` – Longitude of ascending node `Ω` (radians).
/// * `periapsis_argument` – Argument of periapsis `ω` (radians).
///
/// Return
/// ------
/// * The orthonormal matrix whose columns are the perifocal axes `P̂, Q̂, Ŵ`
///   expressed in the ecliptic frame.
pub fn perifocal_to_ecliptic(
    inclination: Radian,
    ascending_node_longitude: Radian,
    periapsis_argument: Radian,
) -> Matrix3<f64> {
    rotmt(ascending_node_longitude, Axis::Z)
        * rotmt(inclination, Axis::X)
        * rotmt(periapsis_argument, Axis::Z)
}
