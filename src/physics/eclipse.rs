use std::fmt;

use crate::linalg::Vector3;

/// Perpendicular distance from `position` to the line through the origin
/// along `direction`.
pub fn shadow_distance(direction: &Vector3<f64>, position: &Vector3<f64>) -> f64 {
    direction.cross(position).norm() / direction.norm()
}

/// Lighting condition of a point relative to a spherical occulting body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Illumination {
    Shadow,
    Sunlit,
}

impl fmt::Display for Illumination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Illumination::Shadow => write!(f, "SHADOW"),
            Illumination::Sunlit => write!(f, "BRIGHT SIDE"),
        }
    }
}

/// Cylindrical shadow test.
///
/// `sunlight` points the way light travels, so the shadow lies on the side
/// where `sunlight · position > 0`. `radius` is the occulting body radius.
pub fn illumination(sunlight: &Vector3<f64>, position: &Vector3<f64>, radius: f64) -> Illumination {
    if shadow_distance(sunlight, position) < radius && sunlight.dot(position) > 0.0 {
        Illumination::Shadow
    } else {
        Illumination::Sunlit
    }
}
