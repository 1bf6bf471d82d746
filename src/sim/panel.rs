use std::ops::RangeInclusive;

use macroquad::color::Color;

pub const HEADING_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);
pub const HIT_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const MISS_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const REFRACTION_COLOR: Color = Color::new(0.0, 1.0, 1.0, 1.0);
pub const REFLECTION_COLOR: Color = Color::new(1.0, 0.5, 0.0, 1.0);

/// Bounds of a user-editable control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub min: f32,
    pub max: f32,
}

impl Variable {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn range(&self) -> RangeInclusive<f32> {
        self.min..=self.max
    }

    /// Non-finite values land on `min`.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.min
        }
    }
}

pub const CANNON_ANGLE_DEG: Variable = Variable::new(0.0, 90.0);
pub const LAUNCH_SPEED: Variable = Variable::new(0.0, 50.0);
pub const TARGET_DISTANCE: Variable = Variable::new(0.0, 25.0);
pub const INCIDENT_ANGLE_DEG: Variable = Variable::new(0.0, 90.0);
pub const REFRACTIVE_INDEX: Variable = Variable::new(1.0, 2.0);

/// Immediate-mode control overlay. Called every frame; widgets report
/// whether the user interacted with them this frame.
pub trait ControlPanel {
    fn text(&mut self, text: &str);

    fn colored_text(&mut self, color: Color, text: &str);

    fn heading(&mut self, text: &str) {
        self.colored_text(HEADING_COLOR, text);
    }

    fn separator(&mut self);

    /// Returns true when `value` was edited.
    fn slider(&mut self, label: &str, range: RangeInclusive<f32>, value: &mut f32) -> bool;

    fn button(&mut self, label: &str) -> bool;

    /// Returns true when `value` was toggled.
    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool;
}
