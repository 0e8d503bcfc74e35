use gyrostat_sim::config::presets;
use gyrostat_sim::dynamics::state::OrbitalState;
use gyrostat_sim::dynamics::Orbital;
use gyrostat_sim::eclipse::{illumination, shadow_distance, Illumination};
use gyrostat_sim::integrator::propagate;

/// Walk once around the unit circular orbit and report where it enters and
/// leaves the cylindrical shadow.
fn main() {
    let model = Orbital::default();
    let sun = presets::sunlight();
    let period = 2.0 * std::f64::consts::PI;
    let points = 72;

    let mut y = presets::unit_circular_orbit().to_vector();
    let samples = match propagate(&model, 0.0, period / points as f64, points, 100, &mut y) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("propagation failed: {e}");
            std::process::exit(1);
        }
    };

    println!("  {:>7}  {:>9}  {:>9}  {:>9}  {:>12}", "t", "x", "y", "axis dist", "lighting");
    println!("  {}", "─".repeat(54));

    let mut previous = None;
    for s in &samples {
        let state = OrbitalState::from_vector(&s.state);
        let light = illumination(&sun, &state.pos, presets::SHADOW_RADIUS);
        let marker = match (previous, light) {
            (Some(Illumination::Sunlit), Illumination::Shadow) => "  <- enters shadow",
            (Some(Illumination::Shadow), Illumination::Sunlit) => "  <- exits shadow",
            _ => "",
        };
        println!(
            "  {:>7.3}  {:>9.5}  {:>9.5}  {:>9.5}  {:>12}{}",
            s.x,
            state.pos.x,
            state.pos.y,
            shadow_distance(&sun, &state.pos),
            light.to_string(),
            marker
        );
        previous = Some(light);
    }

    let shadowed = samples
        .iter()
        .filter(|s| {
            let pos = OrbitalState::from_vector(&s.state).pos;
            illumination(&sun, &pos, presets::SHADOW_RADIUS) == Illumination::Shadow
        })
        .count();
    println!();
    println!("  {} of {} samples in shadow", shadowed, samples.len());
}
