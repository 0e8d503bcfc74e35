use std::fmt;
use std::str::FromStr;

use nalgebra::SVector;

use crate::errors::{Result, SimError};

pub mod gyrostat;
pub mod orbital;
pub mod state;

pub use gyrostat::{CouplingSystem, Gyrostat};
pub use orbital::Orbital;

// ---------------------------------------------------------------------------
// Model selection
// ---------------------------------------------------------------------------

/// The two dynamical regimes the integrator can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Orbital,
    Gyrostat,
}

impl Mode {
    pub fn state_len(self) -> usize {
        match self {
            Mode::Orbital => state::ORBITAL_LEN,
            Mode::Gyrostat => state::GYROSTAT_LEN,
        }
    }

    /// Whether steps in this mode end with quaternion renormalization.
    pub fn renormalizes(self) -> bool {
        matches!(self, Mode::Gyrostat)
    }

    /// Column names of the flat state vector, in slot order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Mode::Orbital => &["pos_x", "pos_y", "pos_z", "vel_x", "vel_y", "vel_z"],
            Mode::Gyrostat => &[
                "omega_x", "omega_y", "omega_z",
                "q0", "q1", "q2", "q3",
                "psi1", "psi2", "psi1_rate", "psi2_rate",
            ],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Orbital => write!(f, "orbital"),
            Mode::Gyrostat => write!(f, "gyrostat"),
        }
    }
}

impl FromStr for Mode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "orbital" => Ok(Mode::Orbital),
            "gyrostat" => Ok(Mode::Gyrostat),
            other => Err(SimError::InvalidParameter(format!("unknown mode '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Equations of motion
// ---------------------------------------------------------------------------

/// A model whose `N`-dimensional state can be advanced by the RK4 stepper.
pub trait Dynamics<const N: usize> {
    const MODE: Mode;

    /// Derivative of the state `y` at independent variable `x`.
    fn derivatives(&self, x: f64, y: &SVector<f64, N>) -> Result<SVector<f64, N>>;

    /// Post-step correction applied after every completed step.
    fn finally(&self, _y: &mut SVector<f64, N>) -> Result<()> {
        Ok(())
    }
}
