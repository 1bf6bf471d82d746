//! Owns the active simulation and drives its lifecycle.

use crate::config::SimConfig;
use crate::error::Result;
use crate::sim::graphics::Graphics;
use crate::sim::panel::ControlPanel;
use crate::sim::{self, FrameInput, Simulation, SimulationKind};

pub struct SimulationHost {
    config: SimConfig,
    active: Option<Box<dyn Simulation>>,
}

impl SimulationHost {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    pub fn active_kind(&self) -> Option<SimulationKind> {
        self.active.as_ref().map(|sim| sim.kind())
    }

    /// Tears down whatever is running and starts a fresh `kind`.
    ///
    /// If the new instance fails to initialize it is torn down too and no
    /// simulation is left active.
    pub fn switch_to(&mut self, kind: SimulationKind, gfx: &mut dyn Graphics) -> Result<()> {
        self.shutdown(gfx);

        let mut simulation = sim::create(kind, &self.config);
        if let Err(err) = simulation.initialize(gfx) {
            simulation.teardown(gfx);
            log::warn!("Could not start {}: {err}", kind.title());
            return Err(err);
        }
        log::info!("Switched to {}", kind.title());
        self.active = Some(simulation);
        Ok(())
    }

    /// Forwards input, then renders one frame of the active simulation. Does
    /// nothing while no simulation is active.
    pub fn frame(
        &mut self,
        elapsed_s: f32,
        input: &FrameInput,
        gfx: &mut dyn Graphics,
        panel: &mut dyn ControlPanel,
    ) -> Result<()> {
        let Some(simulation) = self.active.as_mut() else {
            return Ok(());
        };
        simulation.handle_input(input);
        simulation.render_frame(elapsed_s, gfx, panel)
    }

    pub fn shutdown(&mut self, gfx: &mut dyn Graphics) {
        if let Some(mut simulation) = self.active.take() {
            simulation.teardown(gfx);
            log::debug!("Stopped {}", simulation.kind().title());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testing::{FakeGraphics, Failure, ScriptedPanel};

    #[test]
    fn frame_without_simulation_does_nothing() {
        let mut host = SimulationHost::new(SimConfig::default());
        let mut gfx = FakeGraphics::new();
        let mut panel = ScriptedPanel::new();
        host.frame(0.016, &FrameInput::default(), &mut gfx, &mut panel)
            .expect("idle host accepts frames");
        assert!(gfx.draws.is_empty());
        assert!(panel.lines.is_empty());
    }

    #[test]
    fn switching_releases_previous_resources() {
        let mut host = SimulationHost::new(SimConfig::default());
        let mut gfx = FakeGraphics::new();

        host.switch_to(SimulationKind::Projectile, &mut gfx)
            .expect("projectile starts");
        assert_eq!(host.active_kind(), Some(SimulationKind::Projectile));
        assert_eq!(gfx.live_programs(), 1);
        assert_eq!(gfx.live_buffers(), 3);

        host.switch_to(SimulationKind::Refraction, &mut gfx)
            .expect("refraction starts");
        assert_eq!(host.active_kind(), Some(SimulationKind::Refraction));
        assert_eq!(gfx.live_programs(), 1);
        assert_eq!(gfx.live_buffers(), 2);

        host.shutdown(&mut gfx);
        host.shutdown(&mut gfx);
        assert_eq!(host.active_kind(), None);
        assert_eq!(gfx.live_programs(), 0);
        assert_eq!(gfx.live_buffers(), 0);
        assert_eq!(gfx.double_releases(), 0);
    }

    #[test]
    fn failed_start_leaves_nothing_running() {
        let mut host = SimulationHost::new(SimConfig::default());
        let mut gfx = FakeGraphics::new();
        host.switch_to(SimulationKind::Projectile, &mut gfx)
            .expect("projectile starts");

        let mut broken = FakeGraphics::new().failing(Failure::Link);
        host.shutdown(&mut gfx);
        let err = host
            .switch_to(SimulationKind::Refraction, &mut broken)
            .expect_err("link fails");
        assert!(err.is_resource_init());
        assert_eq!(host.active_kind(), None);
        assert_eq!(broken.live_programs(), 0);
        assert_eq!(broken.live_buffers(), 0);

        broken.heal();
        host.switch_to(SimulationKind::Refraction, &mut broken)
            .expect("retry after fixing shaders");
        assert_eq!(host.active_kind(), Some(SimulationKind::Refraction));
    }

    #[test]
    fn missing_shader_surfaces_as_resource_error() {
        let mut host = SimulationHost::new(SimConfig::default());
        let mut gfx = FakeGraphics::new().failing(Failure::Missing);
        let err = host
            .switch_to(SimulationKind::Projectile, &mut gfx)
            .expect_err("shader file missing");
        assert!(err.to_string().contains("projectile.vert"));
        assert_eq!(gfx.live_programs(), 0);
    }

    #[test]
    fn frames_forward_reset_input() {
        let mut host = SimulationHost::new(SimConfig::default());
        let mut gfx = FakeGraphics::new();
        host.switch_to(SimulationKind::Projectile, &mut gfx)
            .expect("projectile starts");

        let mut panel = ScriptedPanel::new().press("Fire Cannon!");
        host.frame(0.0, &FrameInput::default(), &mut gfx, &mut panel)
            .expect("frame");
        let mut panel = ScriptedPanel::new();
        host.frame(0.1, &FrameInput::default(), &mut gfx, &mut panel)
            .expect("frame");
        assert!(panel.contains("Cannon Angle: 45.0 deg"));

        let mut panel = ScriptedPanel::new();
        host.frame(0.1, &FrameInput { reset: true }, &mut gfx, &mut panel)
            .expect("frame");
        assert!(panel.sliders_seen.iter().any(|label| label == "Cannon Angle"));
    }
}
