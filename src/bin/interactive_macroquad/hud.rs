use macroquad::prelude::*;

use freefall_rust::core::experiment::BALL_COUNT;

use crate::constants::{BALL_COLORS, TITLE_Y};
use crate::controls::playback_text;
use crate::render::draw_ui_text;
use crate::state::AppRuntime;

pub(crate) fn draw_hud(state: &AppRuntime, left: f32, screen_h: f32, font: Option<&Font>) {
    draw_header_block(state, left, font);
    draw_status_block(state, left, screen_h, font);
}

fn draw_header_block(state: &AppRuntime, left: f32, font: Option<&Font>) {
    let header_color = Color::from_rgba(30, 30, 35, 255);
    draw_ui_text(
        "Free Fall / Horizontal Launch Simulator",
        18.0,
        TITLE_Y,
        30,
        header_color,
        font,
    );

    let Some(run) = &state.run else {
        return;
    };
    let config = &run.config;
    draw_ui_text(
        &format!(
            "{}: g = {:.1} m/s^2 | {} | air resistance {}",
            config.body,
            config.body.gravity_mps2(),
            config.motion.name(),
            if config.air_resistance { "on" } else { "off" }
        ),
        left,
        TITLE_Y + 34.0,
        22,
        DARKGRAY,
        font,
    );
}

fn draw_status_block(state: &AppRuntime, left: f32, screen_h: f32, font: Option<&Font>) {
    let frame = state.playback.frame();
    draw_ui_text(
        &format!(
            "t = {:.2} s | Speed x{:.2} | State: {}",
            state.playback.elapsed_s(),
            state.sim_speed,
            playback_text(state)
        ),
        left,
        screen_h - 14.0,
        20,
        BLUE,
        font,
    );
    draw_ui_text(&state.status_line, left, screen_h - 100.0, 18, DARKGRAY, font);

    let Some(run) = &state.run else {
        return;
    };
    for ball in 0..BALL_COUNT {
        let Some(sample) = run.trajectories[ball].get(frame) else {
            continue;
        };
        let landed = run
            .landing(ball)
            .filter(|landing| landing.index <= frame)
            .map_or(String::new(), |landing| {
                format!(" | landed at {:.2} s", landing.time_s)
            });
        draw_ui_text(
            &format!(
                "Ball {} ({:.1} kg): x = {:.2} m, height = {:.2} m{}",
                ball + 1,
                run.config.balls[ball].mass_kg,
                sample.x,
                sample.y,
                landed
            ),
            left,
            screen_h - 70.0 + ball as f32 * 26.0,
            22,
            BALL_COLORS[ball],
            font,
        );
    }
}
