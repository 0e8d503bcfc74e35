use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};
use nalgebra::SVector;

use gyrostat_sim::config::presets;
use gyrostat_sim::dynamics::state::{GyrostatVector, OrbitalVector, PSI1, PSI2, QUAT};
use gyrostat_sim::dynamics::{Gyrostat, Orbital};
use gyrostat_sim::eclipse::illumination;
use gyrostat_sim::integrator::{propagate, Sample};
use gyrostat_sim::Result;

// Finer recording than the console driver, same step sizes.
const ORBIT_POINTS: usize = 200;
const GYROSTAT_POINTS: usize = 500;

fn simulate() -> Result<SimViz> {
    let mut y = presets::unit_circular_orbit().to_vector();
    let orbit = propagate(
        &Orbital::default(),
        0.0,
        presets::ORBIT_END / ORBIT_POINTS as f64,
        ORBIT_POINTS,
        presets::ORBIT_STEPS / ORBIT_POINTS,
        &mut y,
    )?;

    let span = presets::GYROSTAT_SEGMENT * presets::GYROSTAT_SEGMENTS as f64;
    let total_steps = presets::GYROSTAT_STEPS_PER_SEGMENT * presets::GYROSTAT_SEGMENTS;
    let mut y = presets::gyrostat_spin_up().to_vector();
    let attitude = propagate(
        &Gyrostat::default(),
        0.0,
        span / GYROSTAT_POINTS as f64,
        GYROSTAT_POINTS,
        total_steps / GYROSTAT_POINTS,
        &mut y,
    )?;

    Ok(SimViz { orbit, attitude })
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = match simulate() {
        Ok(app) => app,
        Err(e) => {
            log::error!("simulation failed: {e}");
            std::process::exit(1);
        }
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Gyrostat Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

struct SimViz {
    orbit: Vec<Sample<6>>,
    attitude: Vec<Sample<11>>,
}

fn series<const N: usize>(samples: &[Sample<N>], f: impl Fn(&SVector<f64, N>) -> f64) -> PlotPoints<'static> {
    samples.iter().map(|s| [s.x, f(&s.state)]).collect()
}

impl eframe::App for SimViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Orbit and gyrostat attitude");
            let end: Option<&OrbitalVector> = self.orbit.last().map(|s| &s.state);
            let verdict = end
                .map(|y| {
                    let pos = y.fixed_rows::<3>(0).into_owned();
                    illumination(&presets::sunlight(), &pos, presets::SHADOW_RADIUS).to_string()
                })
                .unwrap_or_default();
            let q_end: Option<&GyrostatVector> = self.attitude.last().map(|s| &s.state);
            ui.label(format!(
                "Orbit end: {}  |  |q| at end: {:.12}  |  Attitude span: {:.0} s",
                verdict,
                q_end.map_or(0.0, |y| y.fixed_rows::<4>(QUAT).norm()),
                self.attitude.last().map_or(0.0, |s| s.x),
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // Orbit in the xy plane
                ui.vertical(|ui| {
                    ui.label("Orbit (xy)");
                    let points: PlotPoints = self.orbit.iter()
                        .map(|s| [s.state[0], s.state[1]])
                        .collect();
                    Plot::new("orbit")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("x")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Orbit", points));
                        });
                });

                // Quaternion components
                ui.vertical(|ui| {
                    ui.label("Attitude quaternion");
                    Plot::new("quaternion")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            for (i, name) in ["q0", "q1", "q2", "q3"].into_iter().enumerate() {
                                plot_ui.line(Line::new(name, series(&self.attitude, |y| y[QUAT + i])));
                            }
                        });
                });
            });

            ui.horizontal(|ui| {
                // Joint angles
                ui.vertical(|ui| {
                    ui.label("Joint angles (deg)");
                    Plot::new("joints")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("psi1", series(&self.attitude, |y| y[PSI1].to_degrees())));
                            plot_ui.line(Line::new("psi2", series(&self.attitude, |y| y[PSI2].to_degrees())));
                        });
                });

                // Quaternion norm deviation
                ui.vertical(|ui| {
                    ui.label("|q| - 1");
                    Plot::new("norm")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new(
                                "norm",
                                series(&self.attitude, |y| y.fixed_rows::<4>(QUAT).norm() - 1.0),
                            ));
                        });
                });
            });
        });
    }
}
