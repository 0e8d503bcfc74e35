use nalgebra::{SVector, UnitQuaternion, Vector2};

use crate::kinematics;
use crate::linalg::{Matrix3, Vector3, Vector4};

// ---------------------------------------------------------------------------
// Flat state vectors and slot layout
// ---------------------------------------------------------------------------

pub const ORBITAL_LEN: usize = 6;
pub const GYROSTAT_LEN: usize = 11;

pub type OrbitalVector = SVector<f64, ORBITAL_LEN>;
pub type GyrostatVector = SVector<f64, GYROSTAT_LEN>;

// orbital slots
pub const POS: usize = 0;
pub const VEL: usize = 3;

// gyrostat slots
pub const OMEGA: usize = 0;
pub const QUAT: usize = 3;
pub const PSI1: usize = 7;
pub const PSI2: usize = 8;
pub const PSI1_RATE: usize = 9;
pub const PSI2_RATE: usize = 10;

// ---------------------------------------------------------------------------
// Orbital state: position, velocity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalState {
    pub pos: Vector3<f64>,
    pub vel: Vector3<f64>,
}

impl OrbitalState {
    pub fn to_vector(&self) -> OrbitalVector {
        let mut y = OrbitalVector::zeros();
        y.fixed_rows_mut::<3>(POS).copy_from(&self.pos);
        y.fixed_rows_mut::<3>(VEL).copy_from(&self.vel);
        y
    }

    pub fn from_vector(y: &OrbitalVector) -> Self {
        Self {
            pos: y.fixed_rows::<3>(POS).into_owned(),
            vel: y.fixed_rows::<3>(VEL).into_owned(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.pos.norm()
    }
}

// ---------------------------------------------------------------------------
// Gyrostat state: body rate, attitude, joint angles and rates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GyrostatState {
    pub omega: Vector3<f64>,    // rad/s, primary body frame
    pub quat: Vector4<f64>,     // scalar-first, body→inertial
    pub psi: Vector2<f64>,      // rad, joint angles
    pub psi_rate: Vector2<f64>, // rad/s
}

impl GyrostatState {
    pub fn to_vector(&self) -> GyrostatVector {
        let mut y = GyrostatVector::zeros();
        y.fixed_rows_mut::<3>(OMEGA).copy_from(&self.omega);
        y.fixed_rows_mut::<4>(QUAT).copy_from(&self.quat);
        y[PSI1] = self.psi.x;
        y[PSI2] = self.psi.y;
        y[PSI1_RATE] = self.psi_rate.x;
        y[PSI2_RATE] = self.psi_rate.y;
        y
    }

    pub fn from_vector(y: &GyrostatVector) -> Self {
        Self {
            omega: y.fixed_rows::<3>(OMEGA).into_owned(),
            quat: y.fixed_rows::<4>(QUAT).into_owned(),
            psi: Vector2::new(y[PSI1], y[PSI2]),
            psi_rate: Vector2::new(y[PSI1_RATE], y[PSI2_RATE]),
        }
    }

    /// Attitude as an `nalgebra` rotation (body→inertial).
    pub fn attitude(&self) -> UnitQuaternion<f64> {
        kinematics::to_unit_quaternion(&self.quat)
    }

    /// Direction-cosine matrix, inertial→body.
    pub fn dcm(&self) -> Matrix3<f64> {
        kinematics::quaternion_to_rotation_matrix(&self.quat)
    }
}
