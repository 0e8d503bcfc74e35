use nalgebra::SVector;

use super::state::{OrbitalVector, ORBITAL_LEN, POS, VEL};
use super::{Dynamics, Mode};
use crate::config::OrbitalParams;
use crate::errors::Result;
use crate::linalg::Vector3;
use crate::physics::gravity::point_mass_accel;

// ---------------------------------------------------------------------------
// Two-body point-mass motion
// ---------------------------------------------------------------------------

/// Keplerian motion of a point mass about a central body.
#[derive(Debug, Clone, Copy)]
pub struct Orbital {
    params: OrbitalParams,
}

impl Orbital {
    pub fn new(params: OrbitalParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &OrbitalParams {
        &self.params
    }

    /// Specific orbital energy `v²/2 − mu/r`.
    pub fn specific_energy(&self, y: &OrbitalVector) -> f64 {
        let (pos, vel) = split(y);
        0.5 * vel.norm_squared() - self.params.mu / pos.norm()
    }

    /// Specific angular momentum `r × v`.
    pub fn angular_momentum(&self, y: &OrbitalVector) -> Vector3<f64> {
        let (pos, vel) = split(y);
        pos.cross(&vel)
    }
}

impl Default for Orbital {
    fn default() -> Self {
        Self::new(OrbitalParams::default())
    }
}

fn split(y: &OrbitalVector) -> (Vector3<f64>, Vector3<f64>) {
    (
        y.fixed_rows::<3>(POS).into_owned(),
        y.fixed_rows::<3>(VEL).into_owned(),
    )
}

impl Dynamics<ORBITAL_LEN> for Orbital {
    const MODE: Mode = Mode::Orbital;

    fn derivatives(&self, _x: f64, y: &SVector<f64, ORBITAL_LEN>) -> Result<SVector<f64, ORBITAL_LEN>> {
        let (pos, vel) = split(y);
        let mut f = OrbitalVector::zeros();
        f.fixed_rows_mut::<3>(POS).copy_from(&vel);
        f.fixed_rows_mut::<3>(VEL).copy_from(&point_mass_accel(&pos, self.params.mu));
        Ok(f)
    }
}
