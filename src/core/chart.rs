use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::info;

use crate::core::error::ChartError;
use crate::core::experiment::ExperimentRun;
use crate::core::playback::MarkerSchedule;

pub const CHART_SIZE_PX: (u32, u32) = (800, 800);

const BALL_COLORS: [RGBColor; 2] = [RED, BLUE];
const BALL_RADIUS_PX: i32 = 10;
const MARKER_RADIUS_PX: i32 = 5;

/// Writes the final animation frame as a chart; `.svg` paths get vector output, anything else a bitmap.
pub fn render_chart(run: &ExperimentRun, path: &Path) -> Result<(), ChartError> {
    if run.frame_count() == 0 {
        return Err(ChartError::Empty);
    }

    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(path, CHART_SIZE_PX).into_drawing_area();
        draw_run(&root, run).map_err(backend_error)?;
    } else {
        let root = BitMapBackend::new(path, CHART_SIZE_PX).into_drawing_area();
        draw_run(&root, run).map_err(backend_error)?;
    }

    info!(path = %path.display(), "chart written");
    Ok(())
}

fn backend_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Backend(err.to_string())
}

fn draw_run<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    run: &ExperimentRun,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let config = &run.config;
    let window = run.window;
    let schedule = MarkerSchedule::new(config.marker_interval_s, config.time_step_s);

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption(
            format!(
                "{} on {} (g = {:.1} m/s^2)",
                config.motion.name(),
                config.body.name(),
                config.body.gravity_mps2()
            ),
            ("sans-serif", 24),
        )
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d(window.x_min..window.x_max, window.y_min..window.y_max)?;

    chart
        .configure_mesh()
        .x_desc("x position (m)")
        .y_desc("height (m)")
        .draw()?;

    for (ball, trajectory) in run.trajectories.iter().enumerate() {
        let color = BALL_COLORS[ball % BALL_COLORS.len()];
        let label = format!("Ball {} ({} kg)", ball + 1, config.balls[ball].mass_kg);

        chart
            .draw_series(LineSeries::new(
                trajectory.samples().iter().map(|s| (s.x, s.y)),
                color.mix(0.5).stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| Circle::new((x + 10, y), MARKER_RADIUS_PX, color.filled()));

        chart.draw_series(
            schedule
                .marker_indices(trajectory.len())
                .filter_map(|i| trajectory.get(i))
                .map(|s| Circle::new((s.x, s.y), MARKER_RADIUS_PX, color.mix(0.7).filled())),
        )?;

        if let Some(last) = trajectory.last() {
            chart.draw_series(std::iter::once(Circle::new(
                (last.x, last.y),
                BALL_RADIUS_PX,
                color.filled(),
            )))?;
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
