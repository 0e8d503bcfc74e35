use log::{debug, trace};
use nalgebra::SVector;

use crate::dynamics::Dynamics;
use crate::errors::{Result, SimError};
use super::integrator::rk4_step;

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

fn check_bound(x: f64) -> Result<()> {
    if x.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidState { index: None, value: x })
    }
}

fn check_state<const N: usize>(y: &SVector<f64, N>) -> Result<()> {
    match y.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(SimError::InvalidState { index: Some(i), value: y[i] }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Fixed-step integration over an interval
// ---------------------------------------------------------------------------

/// Advance `y` from `x0` to `x1` in `steps` equal RK4 steps.
///
/// Step `i` starts at `x0 + i·h`. Inputs are checked before the first
/// evaluation; an error in the middle of a run leaves `y` at the last
/// completed step.
pub fn integrate<D, const N: usize>(
    dynamics: &D,
    x0: f64,
    x1: f64,
    steps: usize,
    y: &mut SVector<f64, N>,
) -> Result<()>
where
    D: Dynamics<N>,
{
    check_bound(x0)?;
    check_bound(x1)?;
    check_state(y)?;
    if steps == 0 {
        return Err(SimError::InvalidStepCount);
    }

    let h = (x1 - x0) / steps as f64;
    debug!(
        "{} run: [{}, {}] in {} steps (h = {:e}, renormalize = {})",
        D::MODE, x0, x1, steps, h, D::MODE.renormalizes()
    );

    for i in 0..steps {
        let x = x0 + i as f64 * h;
        rk4_step(dynamics, x, h, y)?;
        trace!("step {} at x = {}: {:?}", i, x + h, y.as_slice());
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Segmented propagation with recording
// ---------------------------------------------------------------------------

/// State recorded at a segment boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<const N: usize> {
    pub x: f64,
    pub state: SVector<f64, N>,
}

/// Run `segments` consecutive calls to [`integrate`], each spanning
/// `segment` with `steps_per_segment` steps, and record the state after
/// each call. The first sample is the initial state at `x0`.
pub fn propagate<D, const N: usize>(
    dynamics: &D,
    x0: f64,
    segment: f64,
    segments: usize,
    steps_per_segment: usize,
    y: &mut SVector<f64, N>,
) -> Result<Vec<Sample<N>>>
where
    D: Dynamics<N>,
{
    check_bound(segment)?;
    let mut samples = Vec::with_capacity(segments + 1);
    samples.push(Sample { x: x0, state: *y });

    let mut x = x0;
    for k in 0..segments {
        let next = x0 + (k + 1) as f64 * segment;
        integrate(dynamics, x, next, steps_per_segment, y)?;
        x = next;
        samples.push(Sample { x, state: *y });
    }

    Ok(samples)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
