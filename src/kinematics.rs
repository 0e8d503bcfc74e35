//! Frame rotations and scalar-first quaternion kinematics.
//!
//! Rotation matrices here are passive. Quaternions are stored as plain
//! `Vector4` slots of the state, `[q0, q1, q2, q3]` with the scalar first.

use nalgebra::{Quaternion, Rotation3, Unit, UnitQuaternion};

use crate::errors::{Result, SimError};
use crate::linalg::{Matrix3, Matrix4, Vector3, Vector4};

// ---------------------------------------------------------------------------
// Frame rotations
// ---------------------------------------------------------------------------
//
// All matrices here map parent-frame components into the child frame
// (passive rotations). Their transpose takes child-frame components back
// into the parent frame.

/// Frame rotation by `angle` about the x-axis.
pub fn rotation_x(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, c, s,
        0.0, -s, c,
    )
}

/// Frame rotation by `angle` about the y-axis.
pub fn rotation_y(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, 0.0, -s,
        0.0, 1.0, 0.0,
        s, 0.0, c,
    )
}

/// Frame rotation by `angle` about the z-axis.
pub fn rotation_z(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, s, 0.0,
        -s, c, 0.0,
        0.0, 0.0, 1.0,
    )
}

/// Frame rotation by `angle` about an arbitrary unit `axis`.
///
/// Reduces to [`rotation_x`], [`rotation_y`] and [`rotation_z`] for the
/// coordinate axes.
pub fn frame_rotation(axis: &Unit<Vector3<f64>>, angle: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(axis, angle).matrix().transpose()
}

// ---------------------------------------------------------------------------
// Quaternion kinematics (scalar-first: [q0, q1, q2, q3])
// ---------------------------------------------------------------------------

/// Direction-cosine matrix of a unit quaternion.
///
/// Maps inertial components into the body frame, i.e. the transpose of the
/// body→inertial rotation. The quaternion is not checked for unit norm.
pub fn quaternion_to_rotation_matrix(q: &Vector4<f64>) -> Matrix3<f64> {
    let (q0, q1, q2, q3) = (q[0], q[1], q[2], q[3]);
    Matrix3::new(
        1.0 - 2.0 * (q2 * q2 + q3 * q3),
        2.0 * (q1 * q2 + q0 * q3),
        2.0 * (q1 * q3 - q0 * q2),
        2.0 * (q1 * q2 - q0 * q3),
        1.0 - 2.0 * (q1 * q1 + q3 * q3),
        2.0 * (q2 * q3 + q0 * q1),
        2.0 * (q1 * q3 + q0 * q2),
        2.0 * (q2 * q3 - q0 * q1),
        1.0 - 2.0 * (q1 * q1 + q2 * q2),
    )
}

/// Skew-symmetric operator Ω(ω) with `dq/dt = ½·Ω(ω)·q`.
pub fn omega_matrix(omega: &Vector3<f64>) -> Matrix4<f64> {
    let (wx, wy, wz) = (omega.x, omega.y, omega.z);
    Matrix4::new(
        0.0, -wx, -wy, -wz,
        wx, 0.0, wz, -wy,
        wy, -wz, 0.0, wx,
        wz, wy, -wx, 0.0,
    )
}

/// Quaternion rate for body angular velocity `omega`.
pub fn quaternion_derivative(omega: &Vector3<f64>, q: &Vector4<f64>) -> Vector4<f64> {
    omega_matrix(omega) * q * 0.5
}

/// Rescale `q` to unit length in place.
///
/// A zero quaternion is left untouched and reported as
/// [`SimError::DegenerateRenormalization`].
pub fn renormalize_quaternion(q: &mut Vector4<f64>) -> Result<()> {
    let norm = q.norm();
    if norm == 0.0 {
        return Err(SimError::DegenerateRenormalization);
    }
    *q /= norm;
    Ok(())
}

/// Scalar-first 4-vector → `nalgebra` unit quaternion (body→inertial).
pub fn to_unit_quaternion(q: &Vector4<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::new_normalize(Quaternion::new(q[0], q[1], q[2], q[3]))
}

/// `nalgebra` unit quaternion → scalar-first 4-vector.
pub fn from_unit_quaternion(q: &UnitQuaternion<f64>) -> Vector4<f64> {
    Vector4::new(q.w, q.i, q.j, q.k)
}
