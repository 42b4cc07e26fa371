//! # Reference-frame rotations
//!
//! Elementary axis rotations and the classical 3-1-3 Euler sequence that maps a vector
//! expressed in the orbital plane (x towards periapsis, z along the orbit normal) into the
//! heliocentric ecliptic frame.
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::Radian;

/// Principal axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// The matrix is an **active rotation** of a vector by `alpha` in the direct
/// (counter-clockwise) sense, so that the rotated vector is `x' = R · x`.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians**.
/// * `axis` - Axis of rotation.
///
/// # Remarks
///
/// Built from [`nalgebra::Rotation3::from_axis_angle`], so the result is orthonormal and
/// satisfies `R.transpose() == R.inverse()`.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let unit_axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&unit_axis, alpha).into()
}

/// Rotation matrix from the orbital plane to the ecliptic frame.
///
/// Composition `Rz(Ω) · Rx(i) · Rz(ω)`: the vector is first rotated by the argument of
/// periapsis about the orbit normal, then by the inclination about the resulting x-axis
/// (the line of nodes), and finally by the longitude of the ascending node about the
/// ecliptic pole.
///
/// Arguments
/// ---------
/// * `periapsis_argument` – ω (radians).
/// * `inclination` – i (radians).
/// * `ascending_node_longitude` – Ω (radians).
pub fn orbital_plane_to_ecliptic(
    periapsis_argument: Radian,
    inclination: Radian,
    ascending_node_longitude: Radian,
) -> Matrix3<f64> {
    rotmt(ascending_node_longitude, Axis::Z)
        * rotmt(inclination, Axis::X)
        * rotmt(periapsis_argument, Axis::Z)
}
