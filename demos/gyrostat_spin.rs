use nalgebra::{Vector2, Vector3, Vector4};

use gyrostat_sim::config::GyrostatParamsBuilder;
use gyrostat_sim::dynamics::state::GyrostatState;
use gyrostat_sim::dynamics::Gyrostat;
use gyrostat_sim::integrator::propagate;
use gyrostat_sim::Result;

/// A gyrostat with a tilted gimbal and no mass offsets, spun up on both
/// joints. Without offsets the total angular momentum and kinetic energy are
/// conserved, so their drift measures the integration error.
fn run() -> Result<()> {
    let params = GyrostatParamsBuilder::new()
        .primary_principal(Vector3::new(120.0, 100.0, 80.0))
        .secondary_principal(Vector3::new(4.0, 6.0, 5.0))
        .gimbal_axis(Vector3::new(1.0, 0.0, 1.0))
        .primary_offset(Vector3::zeros())
        .secondary_offset(Vector3::zeros())
        .build()?;
    let model = Gyrostat::new(params);

    let mut y = GyrostatState {
        omega: Vector3::new(0.01, 0.05, -0.02),
        quat: Vector4::new(1.0, 0.0, 0.0, 0.0),
        psi: Vector2::zeros(),
        psi_rate: Vector2::new(0.5, -0.3),
    }
    .to_vector();

    let h0 = model.angular_momentum(&y).norm();
    let t0 = model.kinetic_energy(&y);

    let samples = propagate(&model, 0.0, 20.0, 15, 400, &mut y)?;

    println!("  {:>6}  {:>9}  {:>9}  {:>12}  {:>12}", "t (s)", "psi1", "psi2", "dH/H", "dT/T");
    println!("  {}", "─".repeat(56));
    for s in &samples {
        let g = GyrostatState::from_vector(&s.state);
        let dh = (model.angular_momentum(&s.state).norm() - h0) / h0;
        let dt = (model.kinetic_energy(&s.state) - t0) / t0;
        println!(
            "  {:>6.1}  {:>9.4}  {:>9.4}  {:>12.3e}  {:>12.3e}",
            s.x, g.psi.x, g.psi.y, dh, dt
        );
    }

    let end = GyrostatState::from_vector(&y);
    println!();
    println!("  final attitude: {}", end.attitude());
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("gyrostat demo failed: {e}");
        std::process::exit(1);
    }
}
