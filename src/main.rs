use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use freefall_rust::core::chart::render_chart;
use freefall_rust::core::experiment::{
    BALL_COUNT, CelestialBody, ExperimentConfig, ExperimentRun, MotionKind, run_experiment,
};
use freefall_rust::core::playback::MarkerSchedule;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BodyArg {
    Earth,
    Moon,
}

impl From<BodyArg> for CelestialBody {
    fn from(arg: BodyArg) -> Self {
        match arg {
            BodyArg::Earth => Self::Earth,
            BodyArg::Moon => Self::Moon,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MotionArg {
    FreeFall,
    Horizontal,
}

impl From<MotionArg> for MotionKind {
    fn from(arg: MotionArg) -> Self {
        match arg {
            MotionArg::FreeFall => Self::FreeFall,
            MotionArg::Horizontal => Self::HorizontalLaunch,
        }
    }
}

/// Drop two balls side by side and report when and where they land.
#[derive(Debug, Parser)]
#[command(name = "freefall_rust", version)]
struct Cli {
    /// TOML experiment file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    body: Option<BodyArg>,
    #[arg(long, overrides_with = "no_air_resistance")]
    air_resistance: bool,
    /// Turn drag off even when the config file enables it.
    #[arg(long, overrides_with = "air_resistance")]
    no_air_resistance: bool,
    #[arg(long, value_enum)]
    motion: Option<MotionArg>,
    #[arg(long, value_name = "KG")]
    mass1: Option<f64>,
    #[arg(long, value_name = "KG")]
    mass2: Option<f64>,
    #[arg(long, value_name = "M")]
    height: Option<f64>,
    #[arg(long, value_name = "M/S")]
    vx1: Option<f64>,
    #[arg(long, value_name = "M/S")]
    vx2: Option<f64>,
    #[arg(long, value_name = "S")]
    marker_interval: Option<f64>,
    #[arg(long, value_name = "S")]
    time_step: Option<f64>,
    #[arg(long, value_name = "S")]
    max_time: Option<f64>,
    /// Print both balls' positions at every marker interval.
    #[arg(long)]
    markers: bool,
    /// Write a chart of the final frame (.svg or .png). Defaults to a timestamped SVG.
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    chart: Option<Option<PathBuf>>,
}

impl Cli {
    fn experiment_config(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load(path)?,
            None => ExperimentConfig::default(),
        };

        if let Some(body) = self.body {
            config.body = body.into();
        }
        if self.air_resistance {
            config.air_resistance = true;
        } else if self.no_air_resistance {
            config.air_resistance = false;
        }
        if let Some(motion) = self.motion {
            config.motion = motion.into();
        }
        let masses = [self.mass1, self.mass2];
        let velocities = [self.vx1, self.vx2];
        for ball in 0..BALL_COUNT {
            if let Some(mass) = masses[ball] {
                config.balls[ball].mass_kg = mass;
            }
            if let Some(vx) = velocities[ball] {
                config.balls[ball].horizontal_velocity_mps = vx;
            }
        }
        if let Some(height) = self.height {
            config.initial_height_m = height;
        }
        if let Some(interval) = self.marker_interval {
            config.marker_interval_s = interval;
        }
        if let Some(dt) = self.time_step {
            config.time_step_s = dt;
        }
        if let Some(t_max) = self.max_time {
            config.max_time_s = t_max;
        }

        if config.motion == MotionKind::FreeFall
            && config.balls.iter().any(|b| b.horizontal_velocity_mps != 0.0)
        {
            warn!("free fall ignores horizontal velocities; use --motion horizontal");
        }
        Ok(config)
    }
}

fn default_chart_path() -> PathBuf {
    PathBuf::from(
        chrono::Local::now()
            .format("freefall_%Y%m%d_%H%M%S.svg")
            .to_string(),
    )
}

fn summary_lines(run: &ExperimentRun) -> Vec<String> {
    let config = &run.config;
    let mut lines = vec![format!(
        "Body: {} (g = {:.1} m/s^2) | {} | air resistance {}",
        config.body,
        config.body.gravity_mps2(),
        config.motion.name(),
        if config.air_resistance { "on" } else { "off" }
    )];

    for ball in 0..BALL_COUNT {
        let spec = config.balls[ball];
        let line = match run.landing(ball) {
            Some(landing) => format!(
                "Ball {} ({} kg): landed at t = {:.2} s, x = {:.2} m",
                ball + 1,
                spec.mass_kg,
                landing.time_s,
                landing.distance_m
            ),
            None => {
                let height = run.trajectories[ball].last().map_or(0.0, |s| s.y);
                format!(
                    "Ball {} ({} kg): still airborne after {:.2} s at {:.2} m",
                    ball + 1,
                    spec.mass_kg,
                    config.max_time_s,
                    height
                )
            }
        };
        lines.push(line);
    }
    lines
}

fn marker_lines(run: &ExperimentRun) -> Vec<String> {
    let schedule = MarkerSchedule::new(run.config.marker_interval_s, run.config.time_step_s);
    let [first, second] = &run.trajectories;
    schedule
        .marker_indices(run.frame_count())
        .filter_map(|i| Some((first.get(i)?, second.get(i)?)))
        .map(|(a, b)| {
            format!(
                "t = {:5.2} s | ball 1 ({:7.3}, {:7.3}) | ball 2 ({:7.3}, {:7.3})",
                a.t, a.x, a.y, b.x, b.y
            )
        })
        .collect()
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.experiment_config()?;
    let run = run_experiment(&config).context("simulation rejected the configuration")?;

    for line in summary_lines(&run) {
        println!("{line}");
    }

    if cli.markers {
        println!();
        for line in marker_lines(&run) {
            println!("{line}");
        }
    }

    if let Some(path) = cli.chart {
        let path = path.unwrap_or_else(default_chart_path);
        render_chart(&run, &path)
            .with_context(|| format!("could not write chart to {}", path.display()))?;
        println!("\nChart written to {}", path.display());
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
