use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{ConfigViolation, SimulationError};

pub const EARTH_GRAVITY_MPS2: f64 = 9.8;
pub const MOON_GRAVITY_MPS2: f64 = 1.6;
pub const DEFAULT_DRAG_COEFFICIENT: f64 = 0.05;
pub const DEFAULT_TIME_STEP_S: f64 = 0.05;
pub const DEFAULT_MAX_TIME_S: f64 = 5.0;
/// Upper bound on `floor(max_time / time_step)`.
pub const MAX_SAMPLES: usize = 10_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub mass_kg: f64,
    pub gravity_mps2: f64,
    pub air_resistance: bool,
    pub drag_coefficient: f64,
    pub initial_height_m: f64,
    pub horizontal_velocity_mps: f64,
    pub time_step_s: f64,
    pub max_time_s: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mass_kg: 1.0,
            gravity_mps2: EARTH_GRAVITY_MPS2,
            air_resistance: false,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            initial_height_m: 20.0,
            horizontal_velocity_mps: 0.0,
            time_step_s: DEFAULT_TIME_STEP_S,
            max_time_s: DEFAULT_MAX_TIME_S,
        }
    }
}

impl SimulationConfig {
    /// Checks the constraints `simulate` relies on. NaN and infinity count as invalid durations.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.time_step_s > 0.0 && self.time_step_s.is_finite()) {
            return Err(ConfigViolation::NonPositiveTimeStep(self.time_step_s).into());
        }
        if !(self.max_time_s > 0.0 && self.max_time_s.is_finite()) {
            return Err(ConfigViolation::NonPositiveMaxTime(self.max_time_s).into());
        }
        let ratio = (self.max_time_s / self.time_step_s).floor();
        if ratio > MAX_SAMPLES as f64 {
            return Err(ConfigViolation::TooManySamples(ratio).into());
        }
        if self.air_resistance && !(self.mass_kg > 0.0) {
            return Err(ConfigViolation::NonPositiveMass(self.mass_kg).into());
        }
        Ok(())
    }

    pub fn sample_count(&self) -> usize {
        (self.max_time_s / self.time_step_s).floor() as usize
    }

    fn vertical_acceleration(&self, vertical_velocity: f64) -> f64 {
        let mut ay = -self.gravity_mps2;
        if self.air_resistance {
            ay -= (self.drag_coefficient / self.mass_kg) * vertical_velocity * vertical_velocity.abs();
        }
        ay
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Falling,
    Grounded,
}

/// Integrator state for one ball between two samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallState {
    pub x: f64,
    pub y: f64,
    pub vertical_velocity: f64,
}

impl FallState {
    pub fn launch(config: &SimulationConfig) -> Self {
        Self {
            x: 0.0,
            y: config.initial_height_m,
            vertical_velocity: 0.0,
        }
    }

    /// One explicit Euler step. Velocity is updated before position.
    pub fn advance(&mut self, config: &SimulationConfig) -> StepOutcome {
        let dt = config.time_step_s;
        let ay = config.vertical_acceleration(self.vertical_velocity);
        self.vertical_velocity += ay * dt;
        self.y += self.vertical_velocity * dt;
        self.x += config.horizontal_velocity_mps * dt;

        // Only crossing below the ground lands; a ball at exactly zero keeps moving.
        if self.y < 0.0 {
            self.y = 0.0;
            return StepOutcome::Grounded;
        }
        StepOutcome::Falling
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
    touchdown_index: Option<usize>,
}

impl Trajectory {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        self.samples.get(index).copied()
    }

    pub fn last(&self) -> Option<Sample> {
        self.samples.last().copied()
    }

    /// Index of the step that crossed the ground, if it happened within `max_time`.
    pub fn touchdown_index(&self) -> Option<usize> {
        self.touchdown_index
    }

    pub fn touchdown(&self) -> Option<Sample> {
        self.touchdown_index.and_then(|i| self.get(i))
    }

    pub fn max_x(&self) -> f64 {
        self.samples.iter().fold(0.0f64, |acc, s| acc.max(s.x))
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.y)
    }
}

pub fn simulate(config: &SimulationConfig) -> Result<Trajectory, SimulationError> {
    config.validate()?;

    let count = config.sample_count();
    let dt = config.time_step_s;
    let mut samples = Vec::with_capacity(count);
    if count == 0 {
        return Ok(Trajectory {
            samples,
            touchdown_index: None,
        });
    }

    let mut state = FallState::launch(config);
    samples.push(Sample {
        t: 0.0,
        x: state.x,
        y: state.y,
    });

    let mut touchdown_index = None;
    for i in 1..count {
        let outcome = state.advance(config);
        samples.push(Sample {
            t: i as f64 * dt,
            x: state.x,
            y: state.y,
        });
        if outcome == StepOutcome::Grounded {
            touchdown_index = Some(i);
            break;
        }
    }

    // Grounded balls stay where they landed for the rest of the run.
    let frozen_x = state.x;
    for i in samples.len()..count {
        samples.push(Sample {
            t: i as f64 * dt,
            x: frozen_x,
            y: 0.0,
        });
    }

    match touchdown_index {
        Some(i) => debug!(index = i, t = i as f64 * dt, x = frozen_x, "ball reached the ground"),
        None => debug!(samples = count, "ball still airborne at end of run"),
    }

    Ok(Trajectory {
        samples,
        touchdown_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn earth_drop(height_m: f64) -> SimulationConfig {
        SimulationConfig {
            initial_height_m: height_m,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn earth_drop_from_twenty_meters_lands_near_two_seconds() {
        let trajectory = simulate(&earth_drop(20.0)).expect("simulation should succeed");

        assert_eq!(trajectory.len(), 100);
        let index = trajectory.touchdown_index().expect("ball should land");
        assert!((39..=41).contains(&index), "touchdown index {index}");
        let landing = trajectory.touchdown().expect("touchdown sample");
        assert_close(landing.t, (2.0f64 * 20.0 / 9.8).sqrt(), 0.06);
        assert_eq!(landing.y, 0.0);
    }

    #[test]
    fn moon_drop_does_not_land_within_five_seconds() {
        let config = SimulationConfig {
            gravity_mps2: MOON_GRAVITY_MPS2,
            ..earth_drop(20.0)
        };
        let trajectory = simulate(&config).expect("simulation should succeed");

        assert!(trajectory.touchdown_index().is_none());
        let last = trajectory.last().expect("non-empty trajectory");
        assert!(last.y > 0.0, "last height {}", last.y);
    }

    #[test]
    fn first_sample_is_unclamped_initial_height() {
        let trajectory = simulate(&earth_drop(0.0)).expect("simulation should succeed");

        let first = trajectory.get(0).expect("first sample");
        assert_eq!(first, Sample { t: 0.0, x: 0.0, y: 0.0 });
        assert_eq!(trajectory.touchdown_index(), Some(1));
    }

    #[test]
    fn horizontal_position_matches_closed_form_before_touchdown() {
        let config = SimulationConfig {
            horizontal_velocity_mps: 5.0,
            ..earth_drop(20.0)
        };
        let trajectory = simulate(&config).expect("simulation should succeed");
        let touchdown = trajectory.touchdown_index().expect("ball should land");

        for sample in &trajectory.samples()[..=touchdown] {
            assert_close(sample.x, 5.0 * sample.t, 1e-9);
        }
    }

    #[test]
    fn grounded_ball_is_frozen_in_place() {
        let config = SimulationConfig {
            horizontal_velocity_mps: 3.0,
            ..earth_drop(5.0)
        };
        let trajectory = simulate(&config).expect("simulation should succeed");
        let touchdown = trajectory.touchdown().expect("ball should land");
        let index = trajectory.touchdown_index().expect("index");

        for sample in &trajectory.samples()[index..] {
            assert_eq!(sample.y, 0.0);
            assert_eq!(sample.x, touchdown.x);
        }
    }

    #[test]
    fn time_points_are_multiples_of_the_step() {
        let trajectory = simulate(&earth_drop(1.0)).expect("simulation should succeed");
        for (i, sample) in trajectory.samples().iter().enumerate() {
            assert_eq!(sample.t, i as f64 * 0.05);
        }
    }

    #[test]
    fn air_resistance_delays_touchdown() {
        let plain = simulate(&SimulationConfig {
            mass_kg: 0.1,
            ..earth_drop(50.0)
        })
        .expect("simulation should succeed");
        let dragged = simulate(&SimulationConfig {
            mass_kg: 0.1,
            air_resistance: true,
            ..earth_drop(50.0)
        })
        .expect("simulation should succeed");

        let plain_index = plain.touchdown_index().expect("plain ball lands");
        assert!(
            dragged
                .touchdown_index()
                .is_none_or(|index| index > plain_index)
        );
    }

    #[test]
    fn mass_is_irrelevant_without_drag() {
        let light = simulate(&SimulationConfig {
            mass_kg: 0.1,
            ..earth_drop(20.0)
        })
        .expect("simulation should succeed");
        let heavy = simulate(&SimulationConfig {
            mass_kg: 10.0,
            ..earth_drop(20.0)
        })
        .expect("simulation should succeed");

        assert_eq!(light, heavy);
    }

    #[test]
    fn zero_gravity_floats_forever() {
        let config = SimulationConfig {
            gravity_mps2: 0.0,
            horizontal_velocity_mps: 1.0,
            ..earth_drop(10.0)
        };
        let trajectory = simulate(&config).expect("simulation should succeed");

        assert!(trajectory.touchdown_index().is_none());
        assert!(trajectory.ys().all(|y| y == 10.0));
    }

    #[test]
    fn zero_gravity_at_ground_level_never_lands() {
        let config = SimulationConfig {
            gravity_mps2: 0.0,
            horizontal_velocity_mps: 5.0,
            ..earth_drop(0.0)
        };
        let trajectory = simulate(&config).expect("simulation should succeed");

        assert!(trajectory.touchdown_index().is_none());
        assert!(trajectory.ys().all(|y| y == 0.0));
        for sample in trajectory.samples() {
            assert_close(sample.x, 5.0 * sample.t, 1e-9);
        }
        let last = trajectory.last().expect("non-empty trajectory");
        assert_close(last.t, 4.95, 1e-9);
        assert_close(last.x, 24.75, 1e-9);
    }

    #[test]
    fn step_larger_than_duration_yields_at_most_one_sample() {
        let config = SimulationConfig {
            time_step_s: 2.0,
            max_time_s: 1.0,
            ..earth_drop(20.0)
        };
        let trajectory = simulate(&config).expect("degenerate step is not an error");
        assert!(trajectory.len() <= 1);
    }

    #[test]
    fn rejects_non_positive_time_step() {
        let err = simulate(&SimulationConfig {
            time_step_s: 0.0,
            ..earth_drop(20.0)
        })
        .expect_err("zero step should fail");
        assert_eq!(
            err,
            SimulationError::InvalidConfiguration(ConfigViolation::NonPositiveTimeStep(0.0))
        );

        let err = simulate(&SimulationConfig {
            time_step_s: f64::NAN,
            ..earth_drop(20.0)
        })
        .expect_err("NaN step should fail");
        assert!(err.to_string().contains("time step"));
    }

    #[test]
    fn rejects_non_positive_max_time() {
        let err = simulate(&SimulationConfig {
            max_time_s: -1.0,
            ..earth_drop(20.0)
        })
        .expect_err("negative duration should fail");
        assert!(matches!(
            err,
            SimulationError::InvalidConfiguration(ConfigViolation::NonPositiveMaxTime(_))
        ));
    }

    #[test]
    fn rejects_unbounded_durations() {
        let err = simulate(&SimulationConfig {
            max_time_s: f64::INFINITY,
            ..earth_drop(20.0)
        })
        .expect_err("infinite duration should fail");
        assert_eq!(
            err,
            SimulationError::InvalidConfiguration(ConfigViolation::NonPositiveMaxTime(
                f64::INFINITY
            ))
        );

        let err = simulate(&SimulationConfig {
            time_step_s: f64::INFINITY,
            ..earth_drop(20.0)
        })
        .expect_err("infinite step should fail");
        assert!(matches!(
            err,
            SimulationError::InvalidConfiguration(ConfigViolation::NonPositiveTimeStep(_))
        ));

        let err = simulate(&SimulationConfig {
            time_step_s: 1e-3,
            max_time_s: 1e12,
            ..earth_drop(20.0)
        })
        .expect_err("oversized run should fail");
        assert!(matches!(
            err,
            SimulationError::InvalidConfiguration(ConfigViolation::TooManySamples(_))
        ));
        assert!(err.to_string().contains("samples"));
    }

    #[test]
    fn rejects_massless_ball_only_when_drag_is_enabled() {
        let massless = SimulationConfig {
            mass_kg: 0.0,
            ..earth_drop(20.0)
        };
        assert!(simulate(&massless).is_ok());

        let err = simulate(&SimulationConfig {
            air_resistance: true,
            ..massless
        })
        .expect_err("massless ball with drag should fail");
        assert!(matches!(
            err,
            SimulationError::InvalidConfiguration(ConfigViolation::NonPositiveMass(_))
        ));
    }

    #[test]
    fn advance_reports_ground_contact() {
        let config = earth_drop(0.05);
        let mut state = FallState::launch(&config);

        assert_eq!(state.advance(&config), StepOutcome::Falling);
        assert_eq!(state.advance(&config), StepOutcome::Grounded);
        assert_eq!(state.y, 0.0);
        assert!(state.vertical_velocity < 0.0);
    }
}
