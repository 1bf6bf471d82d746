//! Simulation contract and its two variants.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::{Result, SimError};

pub mod graphics;
pub mod host;
pub mod panel;
pub mod projectile;
pub mod refraction;

#[cfg(test)]
pub(crate) mod testing;

use graphics::Graphics;
use panel::ControlPanel;

pub use host::SimulationHost;
pub use projectile::ProjectileSimulation;
pub use refraction::RefractionSimulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationKind {
    Projectile,
    Refraction,
}

impl SimulationKind {
    pub const ALL: [SimulationKind; 2] = [SimulationKind::Projectile, SimulationKind::Refraction];

    pub fn title(&self) -> &'static str {
        match self {
            SimulationKind::Projectile => "Projectile Motion",
            SimulationKind::Refraction => "Light Refraction",
        }
    }

    pub fn shader_stem(&self) -> &'static str {
        match self {
            SimulationKind::Projectile => "projectile",
            SimulationKind::Refraction => "refraction",
        }
    }
}

/// Input events gathered by the host for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub reset: bool,
}

/// Lifecycle every simulation variant follows.
///
/// `initialize` runs once before any frame. The host then calls
/// `handle_input` followed by `render_frame` once per displayed frame, and
/// finally `teardown`, which must also be safe after a failed `initialize`.
pub trait Simulation {
    fn kind(&self) -> SimulationKind;

    /// Acquires shaders and buffers and enters the starting state. On error
    /// nothing stays allocated.
    fn initialize(&mut self, gfx: &mut dyn Graphics) -> Result<()>;

    /// Advances physics by `elapsed_s` if active, draws the scene and the
    /// control panel. Negative or non-finite `elapsed_s` is rejected.
    fn render_frame(
        &mut self,
        elapsed_s: f32,
        gfx: &mut dyn Graphics,
        panel: &mut dyn ControlPanel,
    ) -> Result<()>;

    fn handle_input(&mut self, input: &FrameInput);

    /// Releases every GPU resource this instance holds. Idempotent.
    fn teardown(&mut self, gfx: &mut dyn Graphics);
}

pub fn create(kind: SimulationKind, config: &SimConfig) -> Box<dyn Simulation> {
    let (vertex, fragment) = config.shader_paths(kind);
    match kind {
        SimulationKind::Projectile => Box::new(ProjectileSimulation::new(
            config.projectile,
            vertex,
            fragment,
            config.export_dir.clone(),
        )),
        SimulationKind::Refraction => Box::new(RefractionSimulation::new(
            config.refraction,
            vertex,
            fragment,
            config.export_dir.clone(),
        )),
    }
}

pub(crate) fn validate_elapsed(elapsed_s: f32) -> Result<f32> {
    if !elapsed_s.is_finite() || elapsed_s < 0.0 {
        return Err(SimError::InvalidElapsed(elapsed_s));
    }
    Ok(elapsed_s)
}
