use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};
use tracing::info;

use crate::core::error::SimulationError;
use crate::core::motion::{
    DEFAULT_DRAG_COEFFICIENT, DEFAULT_MAX_TIME_S, DEFAULT_TIME_STEP_S, EARTH_GRAVITY_MPS2,
    MOON_GRAVITY_MPS2, SimulationConfig, Trajectory, simulate,
};
use crate::core::window::PlotWindow;

pub const BALL_COUNT: usize = 2;

pub const MASS_RANGE_KG: (f64, f64) = (0.1, 10.0);
pub const HEIGHT_RANGE_M: (f64, f64) = (5.0, 100.0);
pub const HORIZONTAL_VELOCITY_RANGE_MPS: (f64, f64) = (0.0, 20.0);
pub const MARKER_INTERVAL_RANGE_S: (f64, f64) = (0.05, 1.0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CelestialBody {
    #[default]
    Earth,
    Moon,
}

impl CelestialBody {
    pub const ALL: [Self; 2] = [Self::Earth, Self::Moon];

    pub fn gravity_mps2(self) -> f64 {
        match self {
            Self::Earth => EARTH_GRAVITY_MPS2,
            Self::Moon => MOON_GRAVITY_MPS2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Earth => "Earth",
            Self::Moon => "Moon",
        }
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionKind {
    #[default]
    FreeFall,
    HorizontalLaunch,
}

impl MotionKind {
    pub const ALL: [Self; 2] = [Self::FreeFall, Self::HorizontalLaunch];

    pub fn name(self) -> &'static str {
        match self {
            Self::FreeFall => "Free fall",
            Self::HorizontalLaunch => "Horizontal launch",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSpec {
    pub mass_kg: f64,
    pub horizontal_velocity_mps: f64,
}

impl Default for BallSpec {
    fn default() -> Self {
        Self {
            mass_kg: 1.0,
            horizontal_velocity_mps: 0.0,
        }
    }
}

/// Everything needed to run the two-ball comparison.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub body: CelestialBody,
    pub air_resistance: bool,
    pub motion: MotionKind,
    pub initial_height_m: f64,
    pub marker_interval_s: f64,
    pub drag_coefficient: f64,
    pub time_step_s: f64,
    pub max_time_s: f64,
    // Kept last so TOML output places the `[[balls]]` tables after plain keys.
    #[serde(deserialize_with = "deserialize_balls")]
    pub balls: [BallSpec; BALL_COUNT],
}

/// Accepts up to `BALL_COUNT` `[[balls]]` tables; balls left out keep their default spec.
fn deserialize_balls<'de, D>(deserializer: D) -> Result<[BallSpec; BALL_COUNT], D::Error>
where
    D: Deserializer<'de>,
{
    let given = Vec::<BallSpec>::deserialize(deserializer)?;
    if given.len() > BALL_COUNT {
        return Err(de::Error::invalid_length(given.len(), &"at most 2 [[balls]] tables"));
    }
    let mut balls = ExperimentConfig::default().balls;
    for (slot, spec) in balls.iter_mut().zip(given) {
        *slot = spec;
    }
    Ok(balls)
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            body: CelestialBody::Earth,
            air_resistance: false,
            motion: MotionKind::FreeFall,
            initial_height_m: 20.0,
            marker_interval_s: 0.2,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            time_step_s: DEFAULT_TIME_STEP_S,
            max_time_s: DEFAULT_MAX_TIME_S,
            balls: [
                BallSpec {
                    mass_kg: 1.0,
                    horizontal_velocity_mps: 0.0,
                },
                BallSpec {
                    mass_kg: 2.0,
                    horizontal_velocity_mps: 0.0,
                },
            ],
        }
    }
}

impl ExperimentConfig {
    /// Per-ball integrator input. Free fall ignores the configured horizontal velocity.
    pub fn simulation_config(&self, ball: usize) -> SimulationConfig {
        let spec = self.balls[ball];
        let horizontal_velocity_mps = match self.motion {
            MotionKind::FreeFall => 0.0,
            MotionKind::HorizontalLaunch => spec.horizontal_velocity_mps,
        };
        SimulationConfig {
            mass_kg: spec.mass_kg,
            gravity_mps2: self.body.gravity_mps2(),
            air_resistance: self.air_resistance,
            drag_coefficient: self.drag_coefficient,
            initial_height_m: self.initial_height_m,
            horizontal_velocity_mps,
            time_step_s: self.time_step_s,
            max_time_s: self.max_time_s,
        }
    }

    pub fn clamp_to_ui_ranges(&mut self) {
        for ball in &mut self.balls {
            ball.mass_kg = ball.mass_kg.clamp(MASS_RANGE_KG.0, MASS_RANGE_KG.1);
            ball.horizontal_velocity_mps = ball
                .horizontal_velocity_mps
                .clamp(HORIZONTAL_VELOCITY_RANGE_MPS.0, HORIZONTAL_VELOCITY_RANGE_MPS.1);
        }
        self.initial_height_m = self
            .initial_height_m
            .clamp(HEIGHT_RANGE_M.0, HEIGHT_RANGE_M.1);
        self.marker_interval_s = self
            .marker_interval_s
            .clamp(MARKER_INTERVAL_RANGE_S.0, MARKER_INTERVAL_RANGE_S.1);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landing {
    pub index: usize,
    pub time_s: f64,
    pub distance_m: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentRun {
    pub config: ExperimentConfig,
    pub trajectories: [Trajectory; BALL_COUNT],
    pub window: PlotWindow,
}

impl ExperimentRun {
    pub fn landing(&self, ball: usize) -> Option<Landing> {
        let trajectory = &self.trajectories[ball];
        let index = trajectory.touchdown_index()?;
        let sample = trajectory.get(index)?;
        Some(Landing {
            index,
            time_s: sample.t,
            distance_m: sample.x,
        })
    }

    /// Frames to animate; both trajectories share the same time grid.
    pub fn frame_count(&self) -> usize {
        self.trajectories
            .iter()
            .map(Trajectory::len)
            .max()
            .unwrap_or(0)
    }
}

pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentRun, SimulationError> {
    let first = simulate(&config.simulation_config(0))?;
    let second = simulate(&config.simulation_config(1))?;
    let window = PlotWindow::for_trajectories(&[&first, &second], config.initial_height_m);

    info!(
        body = %config.body,
        gravity = config.body.gravity_mps2(),
        air_resistance = config.air_resistance,
        frames = first.len(),
        "experiment simulated"
    );

    Ok(ExperimentRun {
        config: *config,
        trajectories: [first, second],
        window,
    })
}
