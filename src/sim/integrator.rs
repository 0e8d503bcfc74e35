use nalgebra::SVector;

use crate::dynamics::Dynamics;
use crate::errors::Result;

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta step
// ---------------------------------------------------------------------------

/// Single RK4 step: advance `y` in place from `x` to `x + h`.
///
/// Stage vectors live on the stack. If any stage evaluation fails, `y` is
/// left as it was. After the update the model's post-step correction runs.
pub fn rk4_step<D, const N: usize>(dynamics: &D, x: f64, h: f64, y: &mut SVector<f64, N>) -> Result<()>
where
    D: Dynamics<N>,
{
    let half = 0.5 * h;
    let k1 = dynamics.derivatives(x, y)? * h;
    let k2 = dynamics.derivatives(x + half, &(*y + k1 * 0.5))? * h;
    let k3 = dynamics.derivatives(x + half, &(*y + k2 * 0.5))? * h;
    let k4 = dynamics.derivatives(x + h, &(*y + k3))? * h;

    *y += (k1 + k2 * 2.0 + k3 * 2.0 + k4) / 6.0;
    dynamics.finally(y)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::{Gyrostat, Mode};
    use crate::dynamics::state::{GyrostatVector, QUAT};
    use crate::config::presets;
    use crate::errors::SimError;
    use nalgebra::Vector2;

    /// Harmonic oscillator y'' = -y, exact solution (cos x, -sin x).
    struct Oscillator;

    impl Dynamics<2> for Oscillator {
        const MODE: Mode = Mode::Orbital;

        fn derivatives(&self, _x: f64, y: &SVector<f64, 2>) -> Result<SVector<f64, 2>> {
            Ok(Vector2::new(y[1], -y[0]))
        }
    }

    /// y' = x³: RK4 (Simpson in x) integrates it exactly.
    struct Cubic;

    impl Dynamics<1> for Cubic {
        const MODE: Mode = Mode::Orbital;

        fn derivatives(&self, x: f64, _y: &SVector<f64, 1>) -> Result<SVector<f64, 1>> {
            Ok(SVector::<f64, 1>::new(x * x * x))
        }
    }

    /// Always fails, to check that a failed step leaves the state alone.
    struct Broken;

    impl Dynamics<1> for Broken {
        const MODE: Mode = Mode::Orbital;

        fn derivatives(&self, _x: f64, _y: &SVector<f64, 1>) -> Result<SVector<f64, 1>> {
            Err(SimError::SingularMatrix { determinant: 0.0 })
        }
    }

    fn oscillator_error(steps: usize) -> f64 {
        let span = 1.0;
        let h = span / steps as f64;
        let mut y = Vector2::new(1.0, 0.0);
        for i in 0..steps {
            rk4_step(&Oscillator, i as f64 * h, h, &mut y).unwrap();
        }
        (y - Vector2::new(span.cos(), -span.sin())).norm()
    }

    #[test]
    fn polynomial_in_x_is_exact() {
        let mut y = SVector::<f64, 1>::new(0.0);
        rk4_step(&Cubic, 1.0, 1.0, &mut y).unwrap();
        // ∫₁² x³ dx = 15/4
        assert!((y[0] - 3.75).abs() < 1e-15, "got {}", y[0]);
    }

    #[test]
    fn fourth_order_convergence() {
        let coarse = oscillator_error(10);
        let fine = oscillator_error(20);
        let ratio = coarse / fine;
        assert!(
            ratio > 13.0 && ratio < 19.0,
            "halving h should cut the error ~16x, got {:.2} ({:.3e} -> {:.3e})",
            ratio, coarse, fine
        );
    }

    #[test]
    fn single_step_local_error_is_fifth_order() {
        let local = |h: f64| {
            let mut y = Vector2::new(1.0, 0.0);
            rk4_step(&Oscillator, 0.0, h, &mut y).unwrap();
            (y - Vector2::new(h.cos(), -h.sin())).norm()
        };
        let ratio = local(0.1) / local(0.05);
        assert!(ratio > 28.0 && ratio < 36.0, "local error ratio {:.2}", ratio);
    }

    #[test]
    fn failed_step_leaves_state_untouched() {
        let mut y = SVector::<f64, 1>::new(42.0);
        assert!(rk4_step(&Broken, 0.0, 0.1, &mut y).is_err());
        assert_eq!(y[0], 42.0);
    }

    #[test]
    fn gyrostat_step_ends_on_unit_quaternion() {
        let model = Gyrostat::default();
        let mut y: GyrostatVector = presets::gyrostat_spin_up().to_vector();
        y[0] = 0.3; // fast enough to drift without correction
        for i in 0..50 {
            rk4_step(&model, i as f64, 1.0, &mut y).unwrap();
            let norm = y.fixed_rows::<4>(QUAT).norm();
            assert!((norm - 1.0).abs() < 1e-12, "step {}: |q| = {}", i, norm);
        }
    }
}
