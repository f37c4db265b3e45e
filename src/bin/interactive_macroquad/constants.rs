use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1600;
pub const INITIAL_WINDOW_HEIGHT: i32 = 1000;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const PANEL_WIDTH: f32 = 380.0;
pub const LEFT_MARGIN: f32 = PANEL_WIDTH + 90.0;
pub const RIGHT_MARGIN: f32 = 40.0;
pub const TOP_MARGIN: f32 = 120.0;
pub const BOTTOM_MARGIN: f32 = 130.0;

pub const TITLE_Y: f32 = 46.0;
pub const X_GRID_LINES: usize = 10;
pub const Y_GRID_LINES: usize = 8;

pub const BALL_RADIUS_PX: f32 = 15.0;
pub const MARKER_RADIUS_PX: f32 = 8.0;
pub const BALL_COLORS: [Color; 2] = [
    Color::new(0.90, 0.22, 0.21, 1.0),
    Color::new(0.16, 0.38, 0.92, 1.0),
];
