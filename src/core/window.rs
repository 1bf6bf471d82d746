use macroquad::math::{Vec2, vec2};

pub const DISTANCE_TO_HEIGHT_RATIO: f32 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f32 = 0.06;
const Y_PADDING_RATIO: f32 = 0.10;

/// Axis spans for a chart that shows everything up to `raw_max_x`/`raw_max_y`
/// with a fixed x:y ratio.
pub fn fixed_ratio_axis_window(raw_max_x: f32, raw_max_y: f32) -> (f32, f32) {
    let raw_x_span = raw_max_x.max(1.0);
    let raw_y_span = raw_max_y.max(1.0);
    let x_pad = raw_x_span * X_PADDING_RATIO;
    let y_pad = raw_y_span * Y_PADDING_RATIO;

    let mut x_span = (raw_max_x + x_pad).max(1.0);
    let mut y_span = (raw_max_y + y_pad).max(1.0);

    if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
        x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
    } else {
        y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
    }

    (x_span, y_span)
}

/// Orthographic world window mapped onto a screen rectangle, y up in world
/// space and y down on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldView {
    pub min: Vec2,
    pub max: Vec2,
    pub screen_w: f32,
    pub screen_h: f32,
}

impl WorldView {
    /// The scene window both simulations are drawn in.
    pub const SCENE_MIN: Vec2 = Vec2::new(-15.0, -5.0);
    pub const SCENE_MAX: Vec2 = Vec2::new(15.0, 25.0);

    pub fn scene(screen_w: f32, screen_h: f32) -> Self {
        Self {
            min: Self::SCENE_MIN,
            max: Self::SCENE_MAX,
            screen_w,
            screen_h,
        }
    }

    fn span(&self) -> Vec2 {
        vec2(
            (self.max.x - self.min.x).max(1e-6),
            (self.max.y - self.min.y).max(1e-6),
        )
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let span = self.span();
        let x = ((world.x - self.min.x) / span.x) * self.screen_w;
        let y = self.screen_h - ((world.y - self.min.y) / span.y) * self.screen_h;
        vec2(x, y)
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let span = self.span();
        let x = self.min.x + (screen.x / self.screen_w.max(1.0)) * span.x;
        let y = self.min.y + ((self.screen_h - screen.y) / self.screen_h.max(1.0)) * span.y;
        vec2(x, y)
    }
}
