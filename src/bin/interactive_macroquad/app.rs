use macroquad::prelude::*;
use tracing::warn;

use crate::constants::{
    BALL_COLORS, BOTTOM_MARGIN, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, LEFT_MARGIN,
    MSAA_SAMPLES, RIGHT_MARGIN, TOP_MARGIN, UI_FONT_PATH,
};
use crate::controls::{apply_actions, draw_control_panel, hotkey_actions};
use crate::hud::draw_hud;
use crate::render::{
    PlotArea, draw_axis_tick_labels, draw_ball, draw_grid, draw_markers, draw_trail,
};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Free Fall Lab".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("could not load '{UI_FONT_PATH}': {err}, falling back to default font");
            None
        }
    };

    let mut state = AppRuntime::new();

    loop {
        let frame_dt = get_frame_time();
        let screen_w = screen_width();
        let screen_h = screen_height();

        let area = PlotArea {
            left: LEFT_MARGIN,
            right: screen_w - RIGHT_MARGIN,
            top: TOP_MARGIN,
            bottom: screen_h - BOTTOM_MARGIN,
        };

        let actions = hotkey_actions().merge(draw_control_panel(&mut state));
        apply_actions(&mut state, actions);

        let frame = state
            .playback
            .advance(f64::from(frame_dt), f64::from(state.sim_speed));
        let window = state.window();

        clear_background(Color::from_rgba(250, 251, 253, 255));
        draw_grid(area, Color::from_rgba(227, 231, 236, 255));
        draw_axis_tick_labels(area, &window, ui_font.as_ref());

        match &state.run {
            Some(run) => {
                for (ball, trajectory) in run.trajectories.iter().enumerate() {
                    let color = BALL_COLORS[ball];
                    draw_trail(trajectory, frame, &window, area, color);
                    draw_markers(trajectory, &state.markers, frame, &window, area, color);
                    if let Some(sample) = trajectory.get(frame) {
                        draw_ball(area.to_screen(&window, sample.x, sample.y), color);
                    }
                }
            }
            None => {
                // Idle preview: both balls waiting at the drop height.
                let start = area.to_screen(&window, 0.0, f64::from(state.controls.height_m));
                for color in BALL_COLORS {
                    draw_ball(start, color);
                }
            }
        }

        draw_hud(&state, area.left, screen_h, ui_font.as_ref());

        next_frame().await;
    }
}
