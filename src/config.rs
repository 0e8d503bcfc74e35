use nalgebra::Unit;

use crate::errors::{Result, SimError};
use crate::linalg::{Matrix3, Vector3};

// ---------------------------------------------------------------------------
// Gyrostat parameters
// ---------------------------------------------------------------------------

/// Mass properties and joint geometry of a two-body gyrostat, all expressed
/// in the primary body frame at zero joint angles.
///
/// Offsets are mass-weighted (scaled by the square root of the carried mass)
/// so that `K(a, a)` is directly an inertia contribution.
#[derive(Debug, Clone, PartialEq)]
pub struct GyrostatParams {
    pub primary_inertia: Matrix3<f64>,   // I1, kg·m^2
    pub secondary_inertia: Matrix3<f64>, // I2 in its own frame, kg·m^2
    pub joint_axis: Unit<Vector3<f64>>,  // e1, first joint, fixed in the primary
    pub gimbal_axis: Unit<Vector3<f64>>, // second joint, fixed in the gimbal frame
    pub primary_offset: Vector3<f64>,    // a1
    pub secondary_offset: Vector3<f64>,  // a2, in the secondary frame
}

impl Default for GyrostatParams {
    fn default() -> Self {
        Self {
            primary_inertia: Matrix3::from_diagonal(&Vector3::new(38.57, 29.05, 33.96)),
            secondary_inertia: Matrix3::from_diagonal(&Vector3::new(5.549, 1.757, 7.304)),
            joint_axis: Vector3::y_axis(),
            gimbal_axis: Vector3::x_axis(),
            primary_offset: Vector3::new(0.0, 0.5, 0.0),
            secondary_offset: Vector3::new(0.0, 1.175, 0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Gyrostat parameter builder
// ---------------------------------------------------------------------------

pub struct GyrostatParamsBuilder {
    primary_inertia: Matrix3<f64>,
    secondary_inertia: Matrix3<f64>,
    joint_axis: Vector3<f64>,
    gimbal_axis: Vector3<f64>,
    primary_offset: Vector3<f64>,
    secondary_offset: Vector3<f64>,
}

impl GyrostatParamsBuilder {
    pub fn new() -> Self {
        let d = GyrostatParams::default();
        Self {
            primary_inertia: d.primary_inertia,
            secondary_inertia: d.secondary_inertia,
            joint_axis: d.joint_axis.into_inner(),
            gimbal_axis: d.gimbal_axis.into_inner(),
            primary_offset: d.primary_offset,
            secondary_offset: d.secondary_offset,
        }
    }

    pub fn primary_inertia(mut self, v: Matrix3<f64>) -> Self { self.primary_inertia = v; self }
    pub fn secondary_inertia(mut self, v: Matrix3<f64>) -> Self { self.secondary_inertia = v; self }
    pub fn primary_principal(mut self, v: Vector3<f64>) -> Self { self.primary_inertia = Matrix3::from_diagonal(&v); self }
    pub fn secondary_principal(mut self, v: Vector3<f64>) -> Self { self.secondary_inertia = Matrix3::from_diagonal(&v); self }
    pub fn joint_axis(mut self, v: Vector3<f64>) -> Self { self.joint_axis = v; self }
    pub fn gimbal_axis(mut self, v: Vector3<f64>) -> Self { self.gimbal_axis = v; self }
    pub fn primary_offset(mut self, v: Vector3<f64>) -> Self { self.primary_offset = v; self }
    pub fn secondary_offset(mut self, v: Vector3<f64>) -> Self { self.secondary_offset = v; self }

    /// Validate and freeze the parameters. Axes are normalized here.
    pub fn build(self) -> Result<GyrostatParams> {
        check_inertia("primary inertia", &self.primary_inertia)?;
        check_inertia("secondary inertia", &self.secondary_inertia)?;
        check_finite("primary offset", self.primary_offset.iter())?;
        check_finite("secondary offset", self.secondary_offset.iter())?;

        Ok(GyrostatParams {
            primary_inertia: self.primary_inertia,
            secondary_inertia: self.secondary_inertia,
            joint_axis: unit_axis("joint axis", self.joint_axis)?,
            gimbal_axis: unit_axis("gimbal axis", self.gimbal_axis)?,
            primary_offset: self.primary_offset,
            secondary_offset: self.secondary_offset,
        })
    }
}

impl Default for GyrostatParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_finite<'a>(name: &str, mut values: impl Iterator<Item = &'a f64>) -> Result<()> {
    if values.all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SimError::InvalidParameter(format!("{name} has non-finite entries")))
    }
}

fn check_inertia(name: &str, m: &Matrix3<f64>) -> Result<()> {
    check_finite(name, m.iter())?;
    let asymmetry = (m - m.transpose()).abs().max();
    if asymmetry > 1e-9 * m.abs().max().max(1.0) {
        return Err(SimError::InvalidParameter(format!(
            "{name} is not symmetric (max asymmetry {asymmetry:e})"
        )));
    }
    Ok(())
}

fn unit_axis(name: &str, v: Vector3<f64>) -> Result<Unit<Vector3<f64>>> {
    check_finite(name, v.iter())?;
    Unit::try_new(v, 1e-12)
        .ok_or_else(|| SimError::InvalidParameter(format!("{name} has zero length")))
}

// ---------------------------------------------------------------------------
// Orbital parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalParams {
    pub mu: f64, // gravitational parameter of the central body
}

impl Default for OrbitalParams {
    fn default() -> Self {
        Self { mu: 1.0 } // canonical units
    }
}

// ---------------------------------------------------------------------------
// Presets: the reference scenario
// ---------------------------------------------------------------------------

pub mod presets {
    use crate::dynamics::state::{GyrostatState, OrbitalState};
    use crate::linalg::{Vector3, Vector4};
    use nalgebra::Vector2;

    /// Direction in which sunlight travels in the reference scenario.
    pub fn sunlight() -> Vector3<f64> {
        Vector3::new(0.0, -1.0, 0.0)
    }

    /// Radius of the shadow-casting body.
    pub const SHADOW_RADIUS: f64 = 1.0;

    /// End of the reference orbital run (just short of half a revolution).
    pub const ORBIT_END: f64 = 3.1415;
    pub const ORBIT_STEPS: usize = 10_000;

    /// Circular orbit of radius 1 for `mu = 1`.
    pub fn unit_circular_orbit() -> OrbitalState {
        OrbitalState {
            pos: Vector3::new(0.0, 1.0, 0.0),
            vel: Vector3::new(1.0, 0.0, 0.0),
        }
    }

    /// Reference gyrostat run: ten segments of 100 s with 100 steps each.
    pub const GYROSTAT_SEGMENT: f64 = 100.0;
    pub const GYROSTAT_SEGMENTS: usize = 10;
    pub const GYROSTAT_STEPS_PER_SEGMENT: usize = 100;

    /// Slow tumble with both joints turning, attitude at identity.
    pub fn gyrostat_spin_up() -> GyrostatState {
        GyrostatState {
            omega: Vector3::new(0.001, 0.001, 0.001),
            quat: Vector4::new(1.0, 0.0, 0.0, 0.0),
            psi: Vector2::zeros(),
            psi_rate: Vector2::new(0.001, 0.001),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_reference_gyrostat() {
        let built = GyrostatParamsBuilder::new().build().unwrap();
        assert_eq!(built, GyrostatParams::default());
    }

    #[test]
    fn builder_normalizes_axes() {
        let p = GyrostatParamsBuilder::new()
            .joint_axis(Vector3::new(0.0, 0.0, 3.0))
            .build()
            .unwrap();
        assert_eq!(p.joint_axis.into_inner(), Vector3::z());
    }

    #[test]
    fn zero_axis_is_rejected() {
        let err = GyrostatParamsBuilder::new()
            .gimbal_axis(Vector3::zeros())
            .build()
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter(_)));
    }

    #[test]
    fn asymmetric_inertia_is_rejected() {
        let mut i = Matrix3::from_diagonal(&Vector3::new(1.0, 2.0, 3.0));
        i[(0, 1)] = 0.5;
        let err = GyrostatParamsBuilder::new().primary_inertia(i).build().unwrap_err();
        assert!(err.to_string().contains("not symmetric"), "got: {}", err);
    }

    #[test]
    fn non_finite_offset_is_rejected() {
        let err = GyrostatParamsBuilder::new()
            .primary_offset(Vector3::new(0.0, f64::NAN, 0.0))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("primary offset"));
    }
}
