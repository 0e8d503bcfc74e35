use crate::linalg::Vector3;

/// Inverse-square central acceleration `−mu·r/|r|³`.
///
/// No guard at the origin: a zero position yields non-finite components.
pub fn point_mass_accel(pos: &Vector3<f64>, mu: f64) -> Vector3<f64> {
    let r = pos.norm();
    -mu / (r * r * r) * pos
}
