//! Dense fixed-size linear algebra on top of `nalgebra`.
//!
//! Vectors and matrices of dimension 3, 4 and 5 are the `nalgebra` aliases
//! re-exported here; element access, addition, scaling, dot/cross products,
//! norms, transposes and products all come from `nalgebra` directly. This
//! module adds the pieces the dynamics need on top: a determinant-guarded
//! inverse and the parallel-axis coupling kernel.

pub use nalgebra::{Matrix3, Matrix4, Matrix5, Vector3, Vector4, Vector5};

use crate::errors::{Result, SimError};

/// Matrices whose determinant is at most `SINGULAR_EPSILON` times the
/// product of their row norms are refused by [`GuardedInverse`].
pub const SINGULAR_EPSILON: f64 = 1e-12;

// ---------------------------------------------------------------------------
// Guarded inversion
// ---------------------------------------------------------------------------

/// Square-matrix inversion that reports singularity instead of producing
/// garbage entries.
///
/// The test is scale-free: `|det|` is measured against the Hadamard bound
/// `∏ ‖row_i‖`, so the ratio lies in `[0, 1]` whatever the units.
pub trait GuardedInverse: Sized {
    fn guarded_inverse(&self) -> Result<Self>;
}

macro_rules! impl_guarded_inverse {
    ($($mat:ty),*) => {
        $(
            impl GuardedInverse for $mat {
                fn guarded_inverse(&self) -> Result<Self> {
                    let determinant = self.determinant();
                    let bound: f64 = self.row_iter().map(|row| row.norm()).product();
                    if !determinant.is_finite()
                        || bound == 0.0
                        || determinant.abs() <= SINGULAR_EPSILON * bound
                    {
                        return Err(SimError::SingularMatrix { determinant });
                    }
                    self.try_inverse()
                        .ok_or(SimError::SingularMatrix { determinant })
                }
            }
        )*
    };
}

impl_guarded_inverse!(Matrix3<f64>, Matrix4<f64>, Matrix5<f64>);

/// Solve `S·x = v` through the guarded inverse.
pub fn solve(s: &Matrix5<f64>, v: &Vector5<f64>) -> Result<Vector5<f64>> {
    Ok(s.guarded_inverse()? * v)
}

// ---------------------------------------------------------------------------
// Parallel-axis coupling kernel
// ---------------------------------------------------------------------------

/// `K(u, w) = (u·w)·I − w⊗u`, the matrix for which `K(u, w)·x = u × (x × w)`.
///
/// `K(a, a)` is the parallel-axis contribution of a unit point mass at `a`;
/// mixed kernels couple two offsets. `K(u, u)` is symmetric and
/// `K(u, w) = K(w, u)ᵀ`.
pub fn coupling_kernel(u: &Vector3<f64>, w: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::identity() * u.dot(w) - w * u.transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_vectors() -> (Vector3<f64>, Vector3<f64>) {
        (Vector3::new(0.3, -1.2, 2.0), Vector3::new(1.5, 0.4, -0.7))
    }

    #[test]
    fn kernel_of_a_vector_with_itself_is_symmetric() {
        let (u, _) = sample_vectors();
        let k = coupling_kernel(&u, &u);
        assert_relative_eq!(k, k.transpose(), epsilon = 1e-15);
    }

    #[test]
    fn kernel_swaps_into_its_transpose() {
        let (u, w) = sample_vectors();
        assert_relative_eq!(
            coupling_kernel(&u, &w),
            coupling_kernel(&w, &u).transpose(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn kernel_is_a_double_cross_product() {
        let (u, w) = sample_vectors();
        let x = Vector3::new(-0.2, 0.9, 0.5);
        let expected = u.cross(&x.cross(&w));
        assert_relative_eq!(coupling_kernel(&u, &w) * x, expected, epsilon = 1e-14);
    }

    #[test]
    fn kernel_matches_explicit_entries() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        let k = coupling_kernel(&a, &b);
        // diagonal: sum of the two other products
        assert_eq!(k[(0, 0)], a.y * b.y + a.z * b.z);
        assert_eq!(k[(1, 1)], a.x * b.x + a.z * b.z);
        assert_eq!(k[(2, 2)], a.x * b.x + a.y * b.y);
        // off-diagonal: -a[col] * b[row]
        assert_eq!(k[(0, 1)], -a.y * b.x);
        assert_eq!(k[(2, 0)], -a.x * b.z);
        assert_eq!(k[(1, 2)], -a.z * b.y);
    }

    #[test]
    fn inverse_of_well_conditioned_5x5() {
        let mut s = Matrix5::<f64>::identity() * 4.0;
        s[(0, 4)] = 1.0;
        s[(4, 0)] = 1.0;
        s[(2, 3)] = -0.5;
        s[(3, 2)] = -0.5;
        let inv = s.guarded_inverse().unwrap();
        assert_relative_eq!(s * inv, Matrix5::identity(), epsilon = 1e-14);
    }

    #[test]
    fn singular_matrix_is_refused() {
        let mut s = Matrix5::<f64>::identity();
        // duplicate a row
        let row = s.row(1).into_owned();
        s.set_row(3, &row);
        match s.guarded_inverse() {
            Err(SimError::SingularMatrix { determinant }) => assert!(determinant.abs() < 1e-12),
            other => panic!("expected SingularMatrix, got {:?}", other),
        }
        assert!(Matrix3::<f64>::zeros().guarded_inverse().is_err());
    }

    #[test]
    fn small_scale_matrix_is_not_singular() {
        // det = 1e-20, but the matrix is perfectly conditioned
        let s = Matrix5::<f64>::identity() * 1e-4;
        let inv = s.guarded_inverse().unwrap();
        assert_relative_eq!(s * inv, Matrix5::identity(), epsilon = 1e-12);
    }

    #[test]
    fn nearly_dependent_rows_are_refused() {
        // third row almost parallel to the second: |det| / ∏‖row‖ = 1e-15
        let s = Matrix3::new(
            1e6, 0.0, 0.0,
            0.0, 1e6, 0.0,
            0.0, 1e6, 1e-9,
        );
        assert!(matches!(s.guarded_inverse(), Err(SimError::SingularMatrix { .. })));
    }

    #[test]
    fn solve_recovers_known_solution() {
        let s = Matrix5::from_diagonal(&Vector5::new(2.0, 3.0, 4.0, 5.0, 6.0));
        let x = Vector5::new(1.0, -1.0, 0.5, 2.0, -3.0);
        let v = s * x;
        assert_relative_eq!(solve(&s, &v).unwrap(), x, epsilon = 1e-14);
    }

    #[test]
    fn cross_product_is_orthogonal() {
        let (u, w) = sample_vectors();
        let c = u.cross(&w);
        assert!(c.dot(&u).abs() < 1e-14);
        assert!(c.dot(&w).abs() < 1e-14);
        assert!((c.norm() - (u.norm() * w.norm() * u.angle(&w).sin())).abs() < 1e-12);
    }
}
