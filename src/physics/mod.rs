pub mod eclipse;
pub mod gravity;

pub use eclipse::{illumination, shadow_distance, Illumination};
pub use gravity::point_mass_accel;
