use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use freefall_rust::core::experiment::{
    CelestialBody, HEIGHT_RANGE_M, HORIZONTAL_VELOCITY_RANGE_MPS, MARKER_INTERVAL_RANGE_S,
    MASS_RANGE_KG, MotionKind,
};

use crate::constants::PANEL_WIDTH;
use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) run: bool,
    pub(crate) pause: bool,
    pub(crate) restart: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            run: self.run || other.run,
            pause: self.pause || other.pause,
            restart: self.restart || other.restart,
        }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        run: is_key_pressed(KeyCode::Enter),
        pause: is_key_pressed(KeyCode::Space),
        restart: is_key_pressed(KeyCode::R),
    }
}

fn range_f32((lo, hi): (f64, f64)) -> std::ops::Range<f32> {
    lo as f32..hi as f32
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let body_names = CelestialBody::ALL.map(CelestialBody::name);
    let motion_names = MotionKind::ALL.map(MotionKind::name);
    let horizontal =
        MotionKind::ALL.get(state.controls.motion_idx) == Some(&MotionKind::HorizontalLaunch);

    let mut actions = FrameActions::default();
    widgets::Window::new(hash!(), vec2(18.0, 100.0), vec2(PANEL_WIDTH, 470.0))
        .label("Experiment Setup")
        .ui(&mut *root_ui(), |ui| {
            let controls = &mut state.controls;
            ui.combo_box(hash!(), "Body", &body_names, &mut controls.body_idx);
            ui.checkbox(hash!(), "Air resistance", &mut controls.air_resistance);
            ui.combo_box(hash!(), "Motion", &motion_names, &mut controls.motion_idx);
            ui.separator();
            ui.slider(
                hash!(),
                "Ball 1 mass (kg)",
                range_f32(MASS_RANGE_KG),
                &mut controls.masses_kg[0],
            );
            ui.slider(
                hash!(),
                "Ball 2 mass (kg)",
                range_f32(MASS_RANGE_KG),
                &mut controls.masses_kg[1],
            );
            ui.slider(
                hash!(),
                "Initial height (m)",
                range_f32(HEIGHT_RANGE_M),
                &mut controls.height_m,
            );
            if horizontal {
                ui.slider(
                    hash!(),
                    "Ball 1 vx (m/s)",
                    range_f32(HORIZONTAL_VELOCITY_RANGE_MPS),
                    &mut controls.velocities_mps[0],
                );
                ui.slider(
                    hash!(),
                    "Ball 2 vx (m/s)",
                    range_f32(HORIZONTAL_VELOCITY_RANGE_MPS),
                    &mut controls.velocities_mps[1],
                );
            }
            ui.slider(
                hash!(),
                "Marker interval (s)",
                range_f32(MARKER_INTERVAL_RANGE_S),
                &mut controls.marker_interval_s,
            );
            ui.separator();
            ui.slider(hash!(), "Playback speed", 0.25..4.0, &mut state.sim_speed);
            ui.separator();
            if ui.button(None, "Run (Enter)") {
                actions.run = true;
            }
            if ui.button(None, "Pause / Resume (Space)") {
                actions.pause = true;
            }
            if ui.button(None, "Restart (R)") {
                actions.restart = true;
            }
        });

    actions
}

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if actions.run {
        state.start_run();
    }
    if actions.pause {
        state.toggle_pause();
    }
    if actions.restart && state.run.is_some() {
        state.restart();
    }
}

pub(crate) fn playback_text(state: &AppRuntime) -> &'static str {
    if state.run.is_none() {
        "Idle"
    } else if state.playback.is_paused() {
        "Paused"
    } else if state.playback.is_finished() {
        "Finished"
    } else {
        "Playing"
    }
}
