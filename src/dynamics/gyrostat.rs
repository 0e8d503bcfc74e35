use log::warn;
use nalgebra::{SVector, Vector2};

use super::state::{GyrostatState, GyrostatVector, GYROSTAT_LEN, QUAT};
use super::{Dynamics, Mode};
use crate::config::GyrostatParams;
use crate::errors::{Result, SimError};
use crate::kinematics::{frame_rotation, quaternion_derivative, renormalize_quaternion};
use crate::linalg::{coupling_kernel, solve, Matrix3, Matrix5, Vector3, Vector4, Vector5};

// ---------------------------------------------------------------------------
// Two-body gyrostat: primary body + secondary on a two-axis joint
// ---------------------------------------------------------------------------

/// Attitude dynamics of a primary rigid body carrying a secondary body on a
/// two-axis gimbal.
///
/// The first joint turns the gimbal frame about `joint_axis` (fixed in the
/// primary) by ψ1; the second turns the secondary about `gimbal_axis` (fixed
/// in the gimbal frame) by ψ2. Both joints are torque-free, so the two joint
/// accelerations are coupled to the primary's angular acceleration through
/// the 5×5 generalized mass matrix `S`, which is rebuilt and inverted at
/// every evaluation.
#[derive(Debug, Clone)]
pub struct Gyrostat {
    params: GyrostatParams,
}

/// The generalized mass matrix and right-hand side for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingSystem {
    pub matrix: Matrix5<f64>,
    pub rhs: Vector5<f64>,
}

/// Quantities shared by the coupling system and the momentum diagnostics.
struct JointFrames {
    omega1: Vector3<f64>,
    omega2: Vector3<f64>,
    j2: Matrix3<f64>,     // secondary inertia in the primary frame
    alpha2: Vector3<f64>, // secondary offset in the primary frame
    e1: Vector3<f64>,
    e2: Vector3<f64>,     // second joint axis in the primary frame
}

impl Gyrostat {
    pub fn new(params: GyrostatParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GyrostatParams {
        &self.params
    }

    fn frames(&self, s: &GyrostatState) -> JointFrames {
        let p = &self.params;
        let b1 = frame_rotation(&p.joint_axis, s.psi.x);
        let b3 = frame_rotation(&p.gimbal_axis, s.psi.y);
        // secondary frame -> primary frame
        let to_primary = b1.transpose() * b3.transpose();

        let e1 = p.joint_axis.into_inner();
        let e2 = to_primary * p.gimbal_axis.into_inner();
        let omega2 = s.omega + e1 * s.psi_rate.x + e2 * s.psi_rate.y;

        JointFrames {
            omega1: s.omega,
            omega2,
            j2: to_primary * p.secondary_inertia * to_primary.transpose(),
            alpha2: to_primary * p.secondary_offset,
            e1,
            e2,
        }
    }

    /// Assemble `S` and `v` such that `S·[ω̇1, ψ̈1, ψ̈2] = v`.
    pub fn coupling_system(&self, y: &GyrostatVector) -> CouplingSystem {
        let s = GyrostatState::from_vector(y);
        let p = &self.params;
        let k = self.frames(&s);
        let (omega1, omega2, j2, alpha2) = (k.omega1, k.omega2, k.j2, k.alpha2);
        let a1 = p.primary_offset;

        // velocity-dependent terms
        let joint1 = k.e1 * s.psi_rate.x;
        let joint2 = k.e2 * s.psi_rate.y;
        let f1 = omega1.cross(&(p.primary_inertia * omega1));
        let f3 = omega1.cross(&joint1) + (omega1 + joint1).cross(&joint2);
        let f2 = omega2.cross(&(j2 * omega2)) + j2 * f3;
        let f4 = f3.cross(&alpha2)
            + omega1.cross(&omega1.cross(&a1))
            + omega2.cross(&omega2.cross(&alpha2));

        let a = a1 + alpha2;
        let body = p.primary_inertia + j2 + coupling_kernel(&a, &a);
        let to_joints = j2 + coupling_kernel(&a, &alpha2);
        let from_joints = j2 + coupling_kernel(&alpha2, &a);
        let joint_block = j2 + coupling_kernel(&alpha2, &alpha2);
        let axes = [k.e1, k.e2];

        let mut matrix = Matrix5::zeros();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&body);
        for (j, ej) in axes.iter().enumerate() {
            let column = to_joints * ej;
            let row = from_joints.transpose() * ej;
            for i in 0..3 {
                matrix[(i, 3 + j)] = column[i];
                matrix[(3 + j, i)] = row[i];
            }
            // e·J2·e + |e × α2|² on the diagonal
            for (l, el) in axes.iter().enumerate() {
                matrix[(3 + j, 3 + l)] = ej.dot(&(joint_block * el));
            }
        }

        let secondary_torque = alpha2.cross(&f4);
        let top = -f1 - f2 - a1.cross(&f4) - secondary_torque;
        let joint_load = f2 + secondary_torque;
        let rhs = Vector5::new(
            top.x,
            top.y,
            top.z,
            -joint_load.dot(&k.e1),
            -joint_load.dot(&k.e2),
        );

        CouplingSystem { matrix, rhs }
    }

    /// Total angular momentum in the primary frame, the top three rows of
    /// `S` applied to the generalized rates `[ω1, ψ̇1, ψ̇2]`.
    ///
    /// Constant in the inertial frame, since both joints are torque-free.
    pub fn angular_momentum(&self, y: &GyrostatVector) -> Vector3<f64> {
        let u = generalized_rates(y);
        self.coupling_system(y).matrix.fixed_rows::<3>(0) * u
    }

    /// Rotational kinetic energy `½·uᵀ·S·u` with `u = [ω1, ψ̇1, ψ̇2]`.
    pub fn kinetic_energy(&self, y: &GyrostatVector) -> f64 {
        let u = generalized_rates(y);
        0.5 * u.dot(&(self.coupling_system(y).matrix * u))
    }
}

fn generalized_rates(y: &GyrostatVector) -> Vector5<f64> {
    let s = GyrostatState::from_vector(y);
    Vector5::new(s.omega.x, s.omega.y, s.omega.z, s.psi_rate.x, s.psi_rate.y)
}

impl Default for Gyrostat {
    fn default() -> Self {
        Self::new(GyrostatParams::default())
    }
}

impl Dynamics<GYROSTAT_LEN> for Gyrostat {
    const MODE: Mode = Mode::Gyrostat;

    fn derivatives(&self, _x: f64, y: &SVector<f64, GYROSTAT_LEN>) -> Result<SVector<f64, GYROSTAT_LEN>> {
        let system = self.coupling_system(y);
        let accel = solve(&system.matrix, &system.rhs)?;
        let s = GyrostatState::from_vector(y);

        let rate = GyrostatState {
            omega: accel.fixed_rows::<3>(0).into_owned(),
            quat: quaternion_derivative(&s.omega, &s.quat),
            psi: s.psi_rate,
            psi_rate: Vector2::new(accel[3], accel[4]),
        };
        Ok(rate.to_vector())
    }

    /// Restore the unit-norm attitude quaternion.
    fn finally(&self, y: &mut SVector<f64, GYROSTAT_LEN>) -> Result<()> {
        let mut q: Vector4<f64> = y.fixed_rows::<4>(QUAT).into_owned();
        match renormalize_quaternion(&mut q) {
            Ok(()) => {
                y.fixed_rows_mut::<4>(QUAT).copy_from(&q);
                Ok(())
            }
            Err(SimError::DegenerateRenormalization) => {
                warn!("attitude quaternion collapsed to zero, leaving it unnormalized");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
