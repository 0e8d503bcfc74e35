use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use log::{error, info};

use gyrostat_sim::config::presets;
use gyrostat_sim::dynamics::state::{GyrostatState, OrbitalState};
use gyrostat_sim::dynamics::{Gyrostat, Mode, Orbital};
use gyrostat_sim::eclipse::illumination;
use gyrostat_sim::integrator::{integrate, propagate};
use gyrostat_sim::io::csv::write_trajectory_file;
use gyrostat_sim::SimError;

const USAGE: &str = "usage: gyrostat-sim [orbital|gyrostat|all] [--csv PATH]";

/// Orbital runs are recorded at this many evenly spaced points.
const ORBIT_RECORD_SEGMENTS: usize = 100;

struct Args {
    modes: Vec<Mode>,
    csv: Option<PathBuf>,
}

fn parse_args() -> Result<Args, SimError> {
    let mut modes = vec![Mode::Orbital, Mode::Gyrostat];
    let mut csv = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--csv" => {
                let path = args
                    .next()
                    .ok_or_else(|| SimError::InvalidParameter("--csv needs a path".into()))?;
                csv = Some(PathBuf::from(path));
            }
            "all" => modes = vec![Mode::Orbital, Mode::Gyrostat],
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            other => modes = vec![other.parse()?],
        }
    }

    Ok(Args { modes, csv })
}

/// With several scenarios in one run, each CSV gets the mode name appended.
fn csv_path(base: &Path, mode: Mode, several: bool) -> PathBuf {
    if !several {
        return base.to_path_buf();
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("trajectory");
    let ext = base.extension().and_then(|s| s.to_str()).unwrap_or("csv");
    base.with_file_name(format!("{stem}_{mode}.{ext}"))
}

fn write_csv<const N: usize>(
    path: &Path,
    mode: Mode,
    samples: &[gyrostat_sim::integrator::Sample<N>],
) -> io::Result<()> {
    write_trajectory_file(path, mode, samples)
        .map_err(|e| io::Error::new(e.kind(), format!("cannot write {}: {e}", path.display())))?;
    info!("wrote {} {} samples to {}", samples.len(), mode, path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

fn run_orbital(csv: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let model = Orbital::default();
    let mut y = presets::unit_circular_orbit().to_vector();
    integrate(&model, 0.0, presets::ORBIT_END, presets::ORBIT_STEPS, &mut y)?;
    let end = OrbitalState::from_vector(&y);

    println!("  Orbital propagation");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  mu = {}   x in [0, {}]   {} steps",
        model.params().mu, presets::ORBIT_END, presets::ORBIT_STEPS
    );
    println!();
    for v in y.iter() {
        println!("  {:>14.9}", v);
    }
    println!();
    println!("  |r| = {:.9}   energy = {:.9}", end.radius(), model.specific_energy(&y));
    println!(
        "  {}",
        illumination(&presets::sunlight(), &end.pos, presets::SHADOW_RADIUS)
    );
    println!();

    if let Some(path) = csv {
        let mut y = presets::unit_circular_orbit().to_vector();
        let segment = presets::ORBIT_END / ORBIT_RECORD_SEGMENTS as f64;
        let samples = propagate(
            &model,
            0.0,
            segment,
            ORBIT_RECORD_SEGMENTS,
            presets::ORBIT_STEPS / ORBIT_RECORD_SEGMENTS,
            &mut y,
        )?;
        write_csv(path, Mode::Orbital, &samples)?;
    }
    Ok(())
}

fn run_gyrostat(csv: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let model = Gyrostat::default();
    let mut y = presets::gyrostat_spin_up().to_vector();
    let samples = propagate(
        &model,
        0.0,
        presets::GYROSTAT_SEGMENT,
        presets::GYROSTAT_SEGMENTS,
        presets::GYROSTAT_STEPS_PER_SEGMENT,
        &mut y,
    )?;

    println!("  Gyrostat attitude propagation");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>10}  {:>10}  {:>10}  {:>9}  {:>9}  {:>9}  {:>9}  {:>8}  {:>8}",
        "x (s)", "wx", "wy", "wz", "q0", "q1", "q2", "q3", "psi1", "psi2"
    );
    println!("  {}", "─".repeat(104));

    for s in samples.iter().skip(1) {
        let g = GyrostatState::from_vector(&s.state);
        println!(
            "  {:>7.1}  {:>10.6}  {:>10.6}  {:>10.6}  {:>9.6}  {:>9.6}  {:>9.6}  {:>9.6}  {:>8.4}  {:>8.4}",
            s.x, g.omega.x, g.omega.y, g.omega.z,
            g.quat[0], g.quat[1], g.quat[2], g.quat[3],
            g.psi.x, g.psi.y
        );
        let dcm = g.dcm();
        for r in 0..3 {
            println!(
                "  {:>7}  [{:>10.6} {:>10.6} {:>10.6}]",
                "", dcm[(r, 0)], dcm[(r, 1)], dcm[(r, 2)]
            );
        }
    }
    println!();

    if let Some(path) = csv {
        write_csv(path, Mode::Gyrostat, &samples)?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let several = args.modes.len() > 1;
    for &mode in &args.modes {
        let csv = args.csv.as_deref().map(|p| csv_path(p, mode, several));
        match mode {
            Mode::Orbital => run_orbital(csv.as_deref())?,
            Mode::Gyrostat => run_gyrostat(csv.as_deref())?,
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            error!("{e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    println!();
    println!("====================================================================");
    println!("  GYROSTAT SIMULATION");
    println!("====================================================================");
    println!();

    if let Err(e) = run(&args) {
        error!("simulation failed: {e}");
        process::exit(1);
    }

    println!("====================================================================");
    println!();
}
