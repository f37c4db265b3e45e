use std::path::PathBuf;

use thiserror::Error;

/// A constraint on [`SimulationConfig`](crate::core::motion::SimulationConfig) that was not met.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigViolation {
    #[error("time step must be positive and finite, got {0}")]
    NonPositiveTimeStep(f64),
    #[error("max time must be positive and finite, got {0}")]
    NonPositiveMaxTime(f64),
    #[error("run would need {0} samples, more than the limit of {limit}", limit = crate::core::motion::MAX_SAMPLES)]
    TooManySamples(f64),
    #[error("mass must be positive when air resistance is enabled, got {0}")]
    NonPositiveMass(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigViolation),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("ball {ball}: {source}")]
    Invalid {
        ball: usize,
        #[source]
        source: SimulationError,
    },
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("nothing to plot: both trajectories are empty")]
    Empty,
    #[error("chart rendering failed: {0}")]
    Backend(String),
}
