use crate::core::motion::Trajectory;

const X_MARGIN_M: f64 = 1.0;
const Y_HEADROOM_M: f64 = 2.0;

/// Data-space bounds of the trajectory plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotWindow {
    /// One meter of margin on both sides of the widest trail, two meters above the drop height.
    pub fn for_trajectories(trajectories: &[&Trajectory], initial_height_m: f64) -> Self {
        let max_x = trajectories
            .iter()
            .map(|t| t.max_x())
            .fold(0.0f64, f64::max);
        Self {
            x_min: -X_MARGIN_M,
            x_max: max_x + X_MARGIN_M,
            y_min: 0.0,
            y_max: initial_height_m.max(0.0) + Y_HEADROOM_M,
        }
    }

    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min).max(f64::EPSILON)
    }

    pub fn height(&self) -> f64 {
        (self.y_max - self.y_min).max(f64::EPSILON)
    }

    /// Maps a world point into a screen rectangle whose y axis grows downward.
    pub fn to_screen(
        &self,
        (x, y): (f64, f64),
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
    ) -> (f64, f64) {
        let plot_w = (right - left).max(1.0);
        let plot_h = (bottom - top).max(1.0);
        let sx = left + ((x - self.x_min) / self.width()) * plot_w;
        let sy = bottom - ((y - self.y_min) / self.height()) * plot_h;
        (sx, sy)
    }
}
