use macroquad::prelude::*;

use physics_visualizer::sim::{FrameInput, SimulationKind};

/// Keyboard actions polled once per frame.
#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) reset: bool,
    pub(crate) switch_to: Option<SimulationKind>,
    pub(crate) quit: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            reset: self.reset || other.reset,
            switch_to: other.switch_to.or(self.switch_to),
            quit: self.quit || other.quit,
        }
    }

    pub(crate) fn frame_input(&self) -> FrameInput {
        FrameInput { reset: self.reset }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    let switch_to = if is_key_pressed(KeyCode::Key1) {
        Some(SimulationKind::Projectile)
    } else if is_key_pressed(KeyCode::Key2) {
        Some(SimulationKind::Refraction)
    } else {
        None
    };
    FrameActions {
        reset: is_key_pressed(KeyCode::R),
        switch_to,
        quit: is_key_pressed(KeyCode::Escape),
    }
}
