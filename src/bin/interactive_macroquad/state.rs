use freefall_rust::core::experiment::{
    BALL_COUNT, BallSpec, CelestialBody, ExperimentConfig, ExperimentRun, MotionKind,
    run_experiment,
};
use freefall_rust::core::playback::{MarkerSchedule, Playback};
use freefall_rust::core::window::PlotWindow;
use tracing::warn;

/// Sidebar widget values; macroquad sliders work on `f32`.
pub(crate) struct ControlValues {
    pub(crate) body_idx: usize,
    pub(crate) motion_idx: usize,
    pub(crate) air_resistance: bool,
    pub(crate) masses_kg: [f32; BALL_COUNT],
    pub(crate) velocities_mps: [f32; BALL_COUNT],
    pub(crate) height_m: f32,
    pub(crate) marker_interval_s: f32,
}

impl ControlValues {
    pub(crate) fn from_config(config: &ExperimentConfig) -> Self {
        Self {
            body_idx: CelestialBody::ALL
                .iter()
                .position(|b| *b == config.body)
                .unwrap_or(0),
            motion_idx: MotionKind::ALL
                .iter()
                .position(|m| *m == config.motion)
                .unwrap_or(0),
            air_resistance: config.air_resistance,
            masses_kg: config.balls.map(|b| b.mass_kg as f32),
            velocities_mps: config.balls.map(|b| b.horizontal_velocity_mps as f32),
            height_m: config.initial_height_m as f32,
            marker_interval_s: config.marker_interval_s as f32,
        }
    }

    pub(crate) fn to_config(&self) -> ExperimentConfig {
        let mut config = ExperimentConfig {
            body: CelestialBody::ALL[self.body_idx.min(CelestialBody::ALL.len() - 1)],
            motion: MotionKind::ALL[self.motion_idx.min(MotionKind::ALL.len() - 1)],
            air_resistance: self.air_resistance,
            initial_height_m: f64::from(self.height_m),
            marker_interval_s: f64::from(self.marker_interval_s),
            ..ExperimentConfig::default()
        };
        for ball in 0..BALL_COUNT {
            config.balls[ball] = BallSpec {
                mass_kg: f64::from(self.masses_kg[ball]),
                horizontal_velocity_mps: f64::from(self.velocities_mps[ball]),
            };
        }
        config.clamp_to_ui_ranges();
        config
    }
}

pub(crate) struct AppRuntime {
    pub(crate) controls: ControlValues,
    pub(crate) run: Option<ExperimentRun>,
    pub(crate) playback: Playback,
    pub(crate) markers: MarkerSchedule,
    pub(crate) sim_speed: f32,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new() -> Self {
        let config = ExperimentConfig::default();
        Self {
            controls: ControlValues::from_config(&config),
            run: None,
            playback: Playback::new(0, config.time_step_s),
            markers: MarkerSchedule::new(config.marker_interval_s, config.time_step_s),
            sim_speed: 1.0,
            status_line: "Press Run to start the simulation".to_string(),
        }
    }

    pub(crate) fn start_run(&mut self) {
        let config = self.controls.to_config();
        match run_experiment(&config) {
            Ok(run) => {
                self.playback = Playback::new(run.frame_count(), config.time_step_s);
                self.markers = MarkerSchedule::new(config.marker_interval_s, config.time_step_s);
                self.status_line = format!(
                    "{} on {}: markers every {:.2} s",
                    config.motion.name(),
                    config.body,
                    config.marker_interval_s
                );
                self.run = Some(run);
            }
            Err(err) => {
                warn!(%err, "run rejected");
                self.status_line = format!("Cannot run: {err}");
                self.run = None;
            }
        }
    }

    pub(crate) fn restart(&mut self) {
        self.playback.restart();
        self.status_line = "Restarted".to_string();
    }

    pub(crate) fn toggle_pause(&mut self) {
        if self.run.is_none() {
            return;
        }
        self.playback.toggle_pause();
        self.status_line = if self.playback.is_paused() {
            "Paused".to_string()
        } else {
            "Resumed".to_string()
        };
    }

    /// Plot bounds for the current run, or for an idle drop from the sidebar height.
    pub(crate) fn window(&self) -> PlotWindow {
        match &self.run {
            Some(run) => run.window,
            None => PlotWindow::for_trajectories(&[], f64::from(self.controls.height_m)),
        }
    }
}
