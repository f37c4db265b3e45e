use macroquad::prelude::*;

use freefall_rust::core::motion::Trajectory;
use freefall_rust::core::playback::MarkerSchedule;
use freefall_rust::core::window::PlotWindow;

use crate::constants::{BALL_RADIUS_PX, MARKER_RADIUS_PX, X_GRID_LINES, Y_GRID_LINES};

/// Screen rectangle the plot is drawn into.
#[derive(Clone, Copy)]
pub(crate) struct PlotArea {
    pub(crate) left: f32,
    pub(crate) right: f32,
    pub(crate) top: f32,
    pub(crate) bottom: f32,
}

impl PlotArea {
    pub(crate) fn to_screen(&self, window: &PlotWindow, x: f64, y: f64) -> Vec2 {
        let (sx, sy) = window.to_screen(
            (x, y),
            f64::from(self.left),
            f64::from(self.right),
            f64::from(self.top),
            f64::from(self.bottom),
        );
        vec2(sx as f32, sy as f32)
    }
}

fn format_axis_value(value: f64, span: f64) -> String {
    if span >= 100.0 {
        format!("{value:.0}")
    } else if span >= 10.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_grid(area: PlotArea, color: Color) {
    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = area.left + t * (area.right - area.left);
        draw_line(x, area.top, x, area.bottom, 1.0, color);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = area.bottom - t * (area.bottom - area.top);
        draw_line(area.left, y, area.right, y, 1.0, color);
    }
    draw_line(area.left, area.bottom, area.right, area.bottom, 2.0, DARKGRAY);
    draw_line(area.left, area.top, area.left, area.bottom, 2.0, DARKGRAY);
}

pub(crate) fn draw_axis_tick_labels(area: PlotArea, window: &PlotWindow, font: Option<&Font>) {
    let label_color = Color::from_rgba(105, 113, 124, 255);
    let tick_font_size: u16 = 16;

    for i in 0..=X_GRID_LINES {
        let t = i as f64 / X_GRID_LINES as f64;
        let x = area.left + t as f32 * (area.right - area.left);
        let label = format_axis_value(window.x_min + t * window.width(), window.width());
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            x - (size.width * 0.5),
            area.bottom + 22.0,
            tick_font_size,
            label_color,
            font,
        );
    }

    for i in 0..=Y_GRID_LINES {
        let t = i as f64 / Y_GRID_LINES as f64;
        let y = area.bottom - t as f32 * (area.bottom - area.top);
        let label = format_axis_value(window.y_min + t * window.height(), window.height());
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            (area.left - 8.0) - size.width,
            y + (size.height * 0.35),
            tick_font_size,
            label_color,
            font,
        );
    }

    draw_ui_text(
        "x position (m)",
        area.right - 130.0,
        area.bottom + 48.0,
        18,
        label_color,
        font,
    );
    draw_ui_text("Height (m)", area.left + 10.0, area.top - 8.0, 18, label_color, font);
}

/// Dashed trail through every sample up to and including `frame`.
pub(crate) fn draw_trail(
    trajectory: &Trajectory,
    frame: usize,
    window: &PlotWindow,
    area: PlotArea,
    color: Color,
) {
    let samples = trajectory.samples();
    if samples.len() < 2 {
        return;
    }
    let end = frame.min(samples.len() - 1);
    let faded = Color::new(color.r, color.g, color.b, 0.5);
    for (i, pair) in samples[..=end].windows(2).enumerate() {
        if i % 2 == 1 {
            continue;
        }
        let a = area.to_screen(window, pair[0].x, pair[0].y);
        let b = area.to_screen(window, pair[1].x, pair[1].y);
        draw_line(a.x, a.y, b.x, b.y, 2.0, faded);
    }
}

pub(crate) fn draw_markers(
    trajectory: &Trajectory,
    schedule: &MarkerSchedule,
    frame: usize,
    window: &PlotWindow,
    area: PlotArea,
    color: Color,
) {
    let faded = Color::new(color.r, color.g, color.b, 0.7);
    for sample in schedule
        .markers_through(frame)
        .filter_map(|i| trajectory.get(i))
    {
        let p = area.to_screen(window, sample.x, sample.y);
        draw_circle(p.x, p.y, MARKER_RADIUS_PX, faded);
    }
}

pub(crate) fn draw_ball(position: Vec2, color: Color) {
    draw_circle(position.x, position.y, BALL_RADIUS_PX, color);
    draw_circle_lines(position.x, position.y, BALL_RADIUS_PX, 2.0, DARKGRAY);
}
