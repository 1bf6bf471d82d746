use macroquad::prelude::*;

pub const MSAA_SAMPLES: i32 = 4;

pub const BACKGROUND: Color = Color::new(0.05, 0.06, 0.08, 1.0);
pub const ERROR_COLOR: Color = Color::new(1.0, 0.35, 0.35, 1.0);

pub const LINE_THICKNESS: f32 = 2.0;
pub const POINT_RADIUS: f32 = 4.0;

pub const SELECTOR_POS: Vec2 = Vec2::new(10.0, 10.0);
pub const SELECTOR_SIZE: Vec2 = Vec2::new(240.0, 110.0);
pub const PANEL_POS: Vec2 = Vec2::new(10.0, 130.0);
pub const PANEL_SIZE: Vec2 = Vec2::new(340.0, 420.0);

pub const INTENSITY_UNIFORM: &str = "intensity";
