pub mod errors;
pub mod linalg;
pub mod kinematics;
pub mod config;
pub mod dynamics;
pub mod physics;
pub mod sim;
pub mod io;

pub use errors::{Result, SimError};

// Flat re-exports for the common entry points
pub mod eclipse {
    pub use crate::physics::eclipse::*;
}

pub mod integrator {
    pub use crate::sim::runner::{integrate, propagate, Sample};
    pub use crate::sim::integrator::rk4_step;
}
