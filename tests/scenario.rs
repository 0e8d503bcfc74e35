use gyrostat_sim::config::presets;
use gyrostat_sim::dynamics::state::{GyrostatState, OrbitalState};
use gyrostat_sim::dynamics::{Gyrostat, Mode, Orbital};
use gyrostat_sim::eclipse::{illumination, Illumination};
use gyrostat_sim::integrator::{integrate, propagate};
use gyrostat_sim::io::csv::write_trajectory;

#[test]
fn orbital_scenario_ends_in_shadow() {
    let mut y = presets::unit_circular_orbit().to_vector();
    integrate(&Orbital::default(), 0.0, presets::ORBIT_END, presets::ORBIT_STEPS, &mut y).unwrap();
    let end = OrbitalState::from_vector(&y);

    assert!((end.radius() - 1.0).abs() < 1e-3);
    assert!(end.pos.y < -0.99, "should be near (0, -1, 0), got {:?}", end.pos);
    let light = illumination(&presets::sunlight(), &end.pos, presets::SHADOW_RADIUS);
    assert_eq!(light, Illumination::Shadow);
    assert_eq!(light.to_string(), "SHADOW");
}

#[test]
fn gyrostat_scenario_records_and_exports() {
    let mut y = presets::gyrostat_spin_up().to_vector();
    let samples = propagate(
        &Gyrostat::default(),
        0.0,
        presets::GYROSTAT_SEGMENT,
        presets::GYROSTAT_SEGMENTS,
        presets::GYROSTAT_STEPS_PER_SEGMENT,
        &mut y,
    )
    .unwrap();

    for s in &samples {
        let g = GyrostatState::from_vector(&s.state);
        // DCM of a unit quaternion is orthonormal
        let dcm = g.dcm();
        let residual = (dcm * dcm.transpose() - nalgebra::Matrix3::identity()).norm();
        assert!(residual < 1e-10, "DCM not orthonormal at x = {}: {}", s.x, residual);
    }

    // joints spun up at 0.001 rad/s have turned ~0.1 rad after the first segment
    let first = GyrostatState::from_vector(&samples[1].state);
    assert!(first.psi.x > 0.05 && first.psi.y > 0.05, "psi = {:?}", first.psi);
    assert_eq!(samples.last().unwrap().state, y);

    let mut buf = Vec::new();
    write_trajectory(&mut buf, Mode::Gyrostat, &samples).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().count(), samples.len() + 1);
    assert!(text.starts_with("x,omega_x,omega_y,omega_z,q0,q1,q2,q3,psi1,psi2,psi1_rate,psi2_rate\n"));
}
