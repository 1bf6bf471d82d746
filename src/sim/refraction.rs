//! A light ray crossing a flat interface between two media.
//!
//! Nothing is integrated over time: the outgoing rays are
//! rebuilt from the incident rays and the current optical parameters every
//! frame.

use std::path::PathBuf;

use chrono::Local;
use macroquad::color::Color;
use macroquad::math::{Vec2, vec2};

use crate::config::RefractionConfig;
use crate::core::optics::{self, Interaction, LightRay};
use crate::core::plot::{self, RaySegment};
use crate::error::{Result, SimError};
use crate::sim::graphics::{DrawCall, GpuResources, Graphics, Primitive};
use crate::sim::panel::{
    ControlPanel, INCIDENT_ANGLE_DEG, REFLECTION_COLOR, REFRACTION_COLOR, REFRACTIVE_INDEX,
};
use crate::sim::{FrameInput, Simulation, SimulationKind, validate_elapsed};

pub const RAY_ORIGIN: Vec2 = Vec2::new(0.0, 5.0);

const INTERFACE_HALF_WIDTH: f32 = 10.0;
const OUTGOING_RAY_LENGTH: f32 = 10.0;

const RAY_BUFFER: usize = 0;
const INTERFACE_BUFFER: usize = 1;
const BUFFER_COUNT: usize = 2;

const INTERFACE_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const INCIDENT_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);
const OUTGOING_COLOR: Color = Color::new(0.0, 1.0, 1.0, 1.0);

/// Outgoing rays plus the interaction of the last one traced.
type Traced = (Vec<LightRay>, Option<Interaction>);

/// Traces every ray without touching any run state; fails on the first ray
/// parallel to the interface.
fn trace_all(rays: &[LightRay], angle_deg: f32, n1: f32, n2: f32) -> Result<Traced> {
    let mut outgoing = Vec::with_capacity(rays.len());
    let mut last = None;
    for ray in rays {
        let (out, interaction) = optics::trace(ray, angle_deg, n1, n2)?;
        outgoing.push(out);
        last = Some(interaction);
    }
    Ok((outgoing, last))
}

#[derive(Clone, Debug, PartialEq)]
pub struct RefractionRun {
    incident_rays: Vec<LightRay>,
    refracted_rays: Vec<LightRay>,
    incident_angle_deg: f32,
    n1: f32,
    n2: f32,
    refraction_angle_deg: f32,
    reflection_angle_deg: f32,
}

impl RefractionRun {
    pub fn new(config: RefractionConfig) -> Self {
        let mut run = Self {
            incident_rays: Vec::new(),
            refracted_rays: Vec::new(),
            incident_angle_deg: INCIDENT_ANGLE_DEG.clamp(config.incident_angle_deg),
            n1: REFRACTIVE_INDEX.clamp(config.n1),
            n2: REFRACTIVE_INDEX.clamp(config.n2),
            refraction_angle_deg: 0.0,
            reflection_angle_deg: 0.0,
        };
        run.reset();
        run
    }

    /// Re-seeds the single incident ray for the current angle and clears the
    /// outgoing rays.
    pub fn reset(&mut self) {
        self.incident_rays = vec![LightRay::incident(RAY_ORIGIN, self.incident_angle_deg)];
        self.refracted_rays.clear();
        self.refraction_angle_deg = 0.0;
        self.reflection_angle_deg = 0.0;
    }

    /// Rebuilds every outgoing ray. Either all rays are traced or, on a ray
    /// parallel to the interface, nothing changes.
    pub fn recompute(&mut self) -> Result<()> {
        let traced = trace_all(&self.incident_rays, self.incident_angle_deg, self.n1, self.n2)?;
        self.commit(traced);
        Ok(())
    }

    fn commit(&mut self, (outgoing, last): Traced) {
        self.refracted_rays = outgoing;
        match last {
            Some(interaction) => {
                self.refraction_angle_deg = interaction.refraction_angle_deg();
                self.reflection_angle_deg = interaction.reflection_angle_deg();
            }
            None => {
                self.refraction_angle_deg = 0.0;
                self.reflection_angle_deg = 0.0;
            }
        }
    }

    /// Changes the incidence angle, re-seeds the incident ray and recomputes
    /// straight away. A rejected angle leaves the run untouched.
    pub fn set_incident_angle(&mut self, angle_deg: f32) -> Result<()> {
        let angle_deg = INCIDENT_ANGLE_DEG.clamp(angle_deg);
        let rays = vec![LightRay::incident(RAY_ORIGIN, angle_deg)];
        let traced = trace_all(&rays, angle_deg, self.n1, self.n2)?;
        self.incident_angle_deg = angle_deg;
        self.incident_rays = rays;
        self.commit(traced);
        Ok(())
    }

    /// Takes effect on the next recomputation.
    pub fn set_indices(&mut self, n1: f32, n2: f32) {
        self.n1 = REFRACTIVE_INDEX.clamp(n1);
        self.n2 = REFRACTIVE_INDEX.clamp(n2);
    }

    /// Replaces the incident rays only if every one of them can be traced.
    pub fn set_incident_rays(&mut self, rays: Vec<LightRay>) -> Result<()> {
        let traced = trace_all(&rays, self.incident_angle_deg, self.n1, self.n2)?;
        self.incident_rays = rays;
        self.commit(traced);
        Ok(())
    }

    pub fn critical_angle_deg(&self) -> f32 {
        optics::critical_angle_deg(self.n1, self.n2)
    }

    pub fn is_total_internal_reflection(&self) -> bool {
        self.refraction_angle_deg < 0.0
    }

    pub fn incident_rays(&self) -> &[LightRay] {
        &self.incident_rays
    }

    pub fn refracted_rays(&self) -> &[LightRay] {
        &self.refracted_rays
    }

    pub fn incident_angle_deg(&self) -> f32 {
        self.incident_angle_deg
    }

    pub fn n1(&self) -> f32 {
        self.n1
    }

    pub fn n2(&self) -> f32 {
        self.n2
    }

    /// `-1` when the last ray was totally internally reflected.
    pub fn refraction_angle_deg(&self) -> f32 {
        self.refraction_angle_deg
    }

    /// `-1` when the last ray was refracted.
    pub fn reflection_angle_deg(&self) -> f32 {
        self.reflection_angle_deg
    }

    /// Incident rays end at the interface; outgoing rays start there and run
    /// for a fixed length.
    pub fn segments(&self) -> Vec<RaySegment> {
        let incident = self.incident_rays.iter().map(|ray| {
            let end = optics::intersect_interface(ray)
                .unwrap_or_else(|_| ray.point_at(OUTGOING_RAY_LENGTH));
            (ray.origin, end, ray.intensity)
        });
        let outgoing = self
            .refracted_rays
            .iter()
            .map(|ray| (ray.origin, ray.point_at(OUTGOING_RAY_LENGTH), ray.intensity));
        incident.chain(outgoing).collect()
    }
}

pub fn interface_vertices() -> [Vec2; 2] {
    [
        vec2(-INTERFACE_HALF_WIDTH, 0.0),
        vec2(INTERFACE_HALF_WIDTH, 0.0),
    ]
}

/// Two vertices per segment, incident rays first.
pub fn ray_vertices(run: &RefractionRun) -> Vec<Vec2> {
    run.segments()
        .into_iter()
        .flat_map(|(start, end, _)| [start, end])
        .collect()
}

pub struct RefractionSimulation {
    run: RefractionRun,
    vertex_shader: PathBuf,
    fragment_shader: PathBuf,
    export_dir: PathBuf,
    resources: Option<GpuResources>,
    show_critical_angle: bool,
    rejection: Option<String>,
    export_status: Option<String>,
}

impl RefractionSimulation {
    pub fn new(
        config: RefractionConfig,
        vertex_shader: PathBuf,
        fragment_shader: PathBuf,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            run: RefractionRun::new(config),
            vertex_shader,
            fragment_shader,
            export_dir,
            resources: None,
            show_critical_angle: false,
            rejection: None,
            export_status: None,
        }
    }

    pub fn run(&self) -> &RefractionRun {
        &self.run
    }

    pub fn run_mut(&mut self) -> &mut RefractionRun {
        &mut self.run
    }

    pub fn rejection(&self) -> Option<&str> {
        self.rejection.as_deref()
    }

    fn reset(&mut self) {
        self.run.reset();
        self.rejection = None;
        self.export_status = None;
        log::debug!("Refraction simulation reset");
    }

    fn record(&mut self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => {
                self.rejection = None;
                Ok(())
            }
            Err(err @ SimError::RayParallelToInterface { .. }) => {
                let message = err.to_string();
                if self.rejection.as_deref() != Some(message.as_str()) {
                    log::warn!("Refraction not recomputed: {message}");
                }
                self.rejection = Some(message);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn draw_scene(&self, gfx: &mut dyn Graphics) -> Result<()> {
        let Some(resources) = self.resources.as_ref() else {
            return Err(SimError::NotInitialized);
        };
        let (Some(program), Some(rays), Some(interface)) = (
            resources.program(),
            resources.buffer(RAY_BUFFER),
            resources.buffer(INTERFACE_BUFFER),
        ) else {
            return Err(SimError::NotInitialized);
        };

        gfx.upload(rays, &ray_vertices(&self.run));

        gfx.draw(&DrawCall::new(
            program,
            interface,
            Primitive::Lines,
            0..2,
            INTERFACE_COLOR,
        ));

        let incident_vertices = self.run.incident_rays().len() * 2;
        gfx.draw(&DrawCall::new(
            program,
            rays,
            Primitive::Lines,
            0..incident_vertices,
            INCIDENT_COLOR,
        ));
        for (i, ray) in self.run.refracted_rays().iter().enumerate() {
            let first = incident_vertices + i * 2;
            gfx.draw(
                &DrawCall::new(program, rays, Primitive::Lines, first..first + 2, OUTGOING_COLOR)
                    .with_intensity(ray.intensity),
            );
        }
        Ok(())
    }

    fn draw_panel(&mut self, panel: &mut dyn ControlPanel) -> Result<()> {
        panel.heading("SIMULATION PARAMETERS");
        panel.separator();

        let mut angle = self.run.incident_angle_deg();
        if panel.slider("Incident Angle", INCIDENT_ANGLE_DEG.range(), &mut angle) {
            let outcome = self.run.set_incident_angle(angle);
            self.record(outcome)?;
        }

        let (mut n1, mut n2) = (self.run.n1(), self.run.n2());
        let n1_changed = panel.slider("n1 (Medium 1)", REFRACTIVE_INDEX.range(), &mut n1);
        let n2_changed = panel.slider("n2 (Medium 2)", REFRACTIVE_INDEX.range(), &mut n2);
        if n1_changed || n2_changed {
            self.run.set_indices(n1, n2);
        }

        panel.heading(&format!(
            "Angle of incidence: {:.1}",
            self.run.incident_angle_deg()
        ));
        if self.run.is_total_internal_reflection() {
            panel.colored_text(
                REFLECTION_COLOR,
                &format!(
                    "Total Internal Reflection: {:.1}°",
                    self.run.incident_angle_deg()
                ),
            );
        } else {
            panel.colored_text(
                REFRACTION_COLOR,
                &format!(
                    "Angle of refraction: {:.1}°",
                    self.run.refraction_angle_deg()
                ),
            );
        }
        if let Some(rejection) = &self.rejection {
            panel.colored_text(REFLECTION_COLOR, rejection);
        }

        if panel.button("Reset Simulation") {
            self.reset();
        }

        panel.checkbox("Show Critical Angle", &mut self.show_critical_angle);
        if self.show_critical_angle {
            panel.text(&format!(
                "Critical Angle: {:.2} degrees",
                self.run.critical_angle_deg()
            ));
        }

        if panel.button("Export Diagram") {
            self.export_diagram();
        }
        if let Some(status) = &self.export_status {
            panel.text(status);
        }
        Ok(())
    }

    fn export_diagram(&mut self) {
        let file_name = format!("refraction-{}.svg", Local::now().format("%Y%m%d-%H%M%S"));
        let path = self.export_dir.join(file_name);
        let status = match plot::export_ray_diagram(&path, &self.run.segments()) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                log::warn!("Ray diagram export failed: {err}");
                format!("Export failed: {err}")
            }
        };
        self.export_status = Some(status);
    }
}

impl Simulation for RefractionSimulation {
    fn kind(&self) -> SimulationKind {
        SimulationKind::Refraction
    }

    fn initialize(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        if self.resources.is_some() {
            return Err(SimError::AlreadyInitialized);
        }
        let resources = GpuResources::acquire(
            gfx,
            &self.vertex_shader,
            &self.fragment_shader,
            BUFFER_COUNT,
        )?;
        if let Some(interface) = resources.buffer(INTERFACE_BUFFER) {
            gfx.upload(interface, &interface_vertices());
        }
        self.resources = Some(resources);
        self.reset();
        log::info!("Refraction simulation initialized");
        Ok(())
    }

    fn render_frame(
        &mut self,
        elapsed_s: f32,
        gfx: &mut dyn Graphics,
        panel: &mut dyn ControlPanel,
    ) -> Result<()> {
        validate_elapsed(elapsed_s)?;
        if self.resources.is_none() {
            return Err(SimError::NotInitialized);
        }

        let outcome = self.run.recompute();
        self.record(outcome)?;
        self.draw_scene(gfx)?;
        self.draw_panel(panel)
    }

    fn handle_input(&mut self, input: &FrameInput) {
        if input.reset {
            self.reset();
        }
    }

    fn teardown(&mut self, gfx: &mut dyn Graphics) {
        if let Some(mut resources) = self.resources.take() {
            resources.release(gfx);
            log::info!("Refraction simulation torn down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::optics::ANGLE_NOT_APPLICABLE;
    use crate::sim::testing::{FakeGraphics, Failure, ScriptedPanel};
    use proptest::prelude::*;

    fn assert_close(actual: f32, expected: f32, tolerance: f32) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn run_with(angle: f32, n1: f32, n2: f32) -> RefractionRun {
        RefractionRun::new(RefractionConfig {
            incident_angle_deg: angle,
            n1,
            n2,
        })
    }

    fn simulation(config: RefractionConfig) -> RefractionSimulation {
        RefractionSimulation::new(
            config,
            PathBuf::from("refraction.vert"),
            PathBuf::from("refraction.frag"),
            std::env::temp_dir(),
        )
    }

    fn downward_ray(x: f32, angle_deg: f32) -> LightRay {
        LightRay::incident(vec2(x, 5.0), angle_deg)
    }

    #[test]
    fn reset_seeds_one_incident_ray() {
        let run = run_with(45.0, 1.0, 1.33);
        assert_eq!(run.incident_rays().len(), 1);
        assert_eq!(run.incident_rays()[0].origin, RAY_ORIGIN);
        assert!(run.refracted_rays().is_empty());
    }

    #[test]
    fn air_to_water_refracts() {
        let mut run = run_with(30.0, 1.0, 1.33);
        run.recompute().expect("recompute");
        let expected = (30f32.to_radians().sin() / 1.33).asin().to_degrees();
        assert_close(run.refraction_angle_deg(), expected, 1e-4);
        assert_eq!(run.reflection_angle_deg(), ANGLE_NOT_APPLICABLE);
        assert_close(run.refracted_rays()[0].intensity, 0.8, 1e-6);
        assert!(!run.is_total_internal_reflection());
    }

    #[test]
    fn water_to_air_past_critical_angle_reflects() {
        let mut run = run_with(60.0, 1.33, 1.0);
        assert!(60.0 > run.critical_angle_deg());
        run.recompute().expect("recompute");
        assert_eq!(run.refraction_angle_deg(), ANGLE_NOT_APPLICABLE);
        assert_eq!(run.reflection_angle_deg(), 120.0);
        assert!(run.is_total_internal_reflection());
        assert!(run.refracted_rays()[0].direction.y > 0.0);
    }

    #[test]
    fn changing_angle_recomputes_immediately() {
        let mut run = run_with(10.0, 1.0, 1.33);
        run.set_incident_angle(30.0).expect("valid angle");
        assert_eq!(run.incident_angle_deg(), 30.0);
        assert_eq!(run.refracted_rays().len(), 1);
        assert_close(run.refraction_angle_deg(), 22.08, 0.01);
    }

    #[test]
    fn index_change_waits_for_next_recompute() {
        let mut run = run_with(60.0, 1.0, 1.33);
        run.recompute().expect("recompute");
        run.set_indices(1.33, 1.0);
        assert!(!run.is_total_internal_reflection());
        run.recompute().expect("recompute");
        assert!(run.is_total_internal_reflection());
    }

    #[test]
    fn grazing_ray_is_rejected_and_previous_output_kept() {
        let mut run = run_with(30.0, 1.0, 1.33);
        run.recompute().expect("recompute");
        let before_rays = run.refracted_rays().to_vec();
        let before_angle = run.refraction_angle_deg();

        let err = run.set_incident_angle(90.0).expect_err("ray parallel to interface");
        assert!(matches!(err, SimError::RayParallelToInterface { .. }));
        assert_eq!(run.incident_angle_deg(), 30.0);
        assert_eq!(run.incident_rays(), &[LightRay::incident(RAY_ORIGIN, 30.0)]);
        assert_eq!(run.refracted_rays(), before_rays.as_slice());
        assert_eq!(run.refraction_angle_deg(), before_angle);
        assert!(!run.refraction_angle_deg().is_nan());
    }

    #[test]
    fn rejected_batch_leaves_inputs_and_outputs_paired() {
        let mut run = run_with(30.0, 1.0, 1.33);
        run.recompute().expect("recompute");
        let before = run.clone();

        let flat = LightRay {
            origin: vec2(2.0, 5.0),
            direction: vec2(1.0, 0.0),
            intensity: 1.0,
        };
        let batch = vec![downward_ray(0.0, 30.0), downward_ray(1.0, 30.0), flat];
        let err = run.set_incident_rays(batch).expect_err("flat ray in batch");
        assert!(matches!(err, SimError::RayParallelToInterface { .. }));
        assert_eq!(run.incident_rays().len(), run.refracted_rays().len());
        assert_eq!(run, before);
    }

    #[test]
    fn output_matches_input_count() {
        let mut run = run_with(30.0, 1.0, 1.33);

        run.set_incident_rays(Vec::new()).expect("no rays");
        assert!(run.refracted_rays().is_empty());

        run.set_incident_rays(vec![downward_ray(0.0, 30.0)])
            .expect("one ray");
        assert_eq!(run.refracted_rays().len(), 1);

        let many: Vec<_> = (0..7).map(|i| downward_ray(i as f32 - 3.0, 30.0)).collect();
        run.set_incident_rays(many).expect("many rays");
        assert_eq!(run.refracted_rays().len(), 7);
        for (incident, out) in run.incident_rays().iter().zip(run.refracted_rays()) {
            assert_close(out.origin.y, 0.0, 1e-5);
            assert_close(out.intensity, incident.intensity * 0.8, 1e-6);
        }
    }

    #[test]
    fn ray_vertices_pair_up_segments() {
        let mut run = run_with(45.0, 1.0, 1.33);
        run.recompute().expect("recompute");
        let vertices = ray_vertices(&run);
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0], RAY_ORIGIN);
        assert_close(vertices[1].y, 0.0, 1e-5);
        assert_eq!(vertices[1], vertices[2]);
        assert_close(vertices[2].distance(vertices[3]), OUTGOING_RAY_LENGTH, 1e-4);
    }

    #[test]
    fn reset_twice_matches_reset_once() {
        let mut run = run_with(60.0, 1.33, 1.0);
        run.recompute().expect("recompute");
        run.reset();
        let once = run.clone();
        run.reset();
        assert_eq!(run, once);
    }

    #[test]
    fn frames_recompute_and_draw() {
        let mut sim = simulation(RefractionConfig::default());
        let mut gfx = FakeGraphics::new();
        sim.initialize(&mut gfx).expect("init");

        let mut panel = ScriptedPanel::new();
        sim.render_frame(0.0, &mut gfx, &mut panel).expect("frame");
        assert_eq!(sim.run().refracted_rays().len(), 1);
        assert!(panel.contains("Angle of refraction"));
        assert_eq!(
            gfx.draws
                .iter()
                .filter(|d| d.primitive == Primitive::Lines)
                .count(),
            3
        );
        assert!(gfx.draws.iter().any(|d| (d.intensity - 0.8).abs() < 1e-6));
    }

    #[test]
    fn slider_edits_apply_through_panel() {
        let mut sim = simulation(RefractionConfig::default());
        let mut gfx = FakeGraphics::new();
        sim.initialize(&mut gfx).expect("init");

        let mut panel = ScriptedPanel::new()
            .set_slider("n1 (Medium 1)", 1.33)
            .set_slider("n2 (Medium 2)", 1.0);
        sim.render_frame(0.016, &mut gfx, &mut panel).expect("frame");
        let mut panel = ScriptedPanel::new().set_slider("Incident Angle", 60.0);
        sim.render_frame(0.016, &mut gfx, &mut panel).expect("frame");

        assert!(sim.run().is_total_internal_reflection());
        assert!(panel.contains("Total Internal Reflection"));
    }

    #[test]
    fn grazing_angle_shows_rejection_instead_of_failing_frame() {
        let mut sim = simulation(RefractionConfig {
            incident_angle_deg: 90.0,
            ..RefractionConfig::default()
        });
        let mut gfx = FakeGraphics::new();
        sim.initialize(&mut gfx).expect("init");

        let mut panel = ScriptedPanel::new();
        sim.render_frame(0.016, &mut gfx, &mut panel).expect("frame still renders");
        assert!(sim.rejection().is_some());
        assert!(panel.contains("parallel to the interface"));

        let mut panel = ScriptedPanel::new().set_slider("Incident Angle", 45.0);
        sim.render_frame(0.016, &mut gfx, &mut panel).expect("frame");
        assert!(sim.rejection().is_none());
    }

    #[test]
    fn critical_angle_checkbox_reveals_value() {
        let mut sim = simulation(RefractionConfig {
            n1: 1.33,
            n2: 1.0,
            ..RefractionConfig::default()
        });
        let mut gfx = FakeGraphics::new();
        sim.initialize(&mut gfx).expect("init");

        let mut panel = ScriptedPanel::new();
        sim.render_frame(0.016, &mut gfx, &mut panel).expect("frame");
        assert!(!panel.contains("Critical Angle:"));

        let mut panel = ScriptedPanel::new().toggle("Show Critical Angle");
        sim.render_frame(0.016, &mut gfx, &mut panel).expect("frame");
        assert!(panel.contains("Critical Angle: 48.75 degrees"));
    }

    #[test]
    fn negative_elapsed_is_rejected() {
        let mut sim = simulation(RefractionConfig::default());
        let mut gfx = FakeGraphics::new();
        sim.initialize(&mut gfx).expect("init");
        let mut panel = ScriptedPanel::new();
        assert!(matches!(
            sim.render_frame(-1.0, &mut gfx, &mut panel),
            Err(SimError::InvalidElapsed(_))
        ));
        assert!(gfx.draws.is_empty());
    }

    #[test]
    fn failed_initialize_then_teardown_is_safe() {
        let mut sim = simulation(RefractionConfig::default());
        let mut gfx = FakeGraphics::new().failing(Failure::BufferAfter(1));
        assert!(sim.initialize(&mut gfx).is_err());
        sim.teardown(&mut gfx);
        assert_eq!(gfx.live_programs(), 0);
        assert_eq!(gfx.live_buffers(), 0);
        assert_eq!(gfx.double_releases(), 0);
    }

    #[test]
    fn reset_key_reseeds_ray() {
        let mut sim = simulation(RefractionConfig::default());
        let mut gfx = FakeGraphics::new();
        sim.initialize(&mut gfx).expect("init");
        sim.run_mut()
            .set_incident_rays(vec![downward_ray(1.0, 30.0), downward_ray(2.0, 30.0)])
            .expect("rays");
        sim.handle_input(&FrameInput { reset: true });
        assert_eq!(sim.run().incident_rays().len(), 1);
        assert!(sim.run().refracted_rays().is_empty());
    }

    proptest! {
        #[test]
        fn every_recompute_pairs_rays(
            angle in 0.0f32..89.0,
            n1 in 1.0f32..2.0,
            n2 in 1.0f32..2.0,
            xs in proptest::collection::vec(-5.0f32..5.0, 0..12),
        ) {
            let mut run = run_with(angle, n1, n2);
            let rays: Vec<_> = xs.iter().map(|x| downward_ray(*x, angle)).collect();
            run.set_incident_rays(rays).expect("downward rays hit the interface");
            prop_assert_eq!(run.refracted_rays().len(), run.incident_rays().len());

            let tir = n1 / n2 * angle.to_radians().sin() > 1.0;
            if !run.incident_rays().is_empty() {
                prop_assert_eq!(run.is_total_internal_reflection(), tir);
                if tir {
                    prop_assert_eq!(run.reflection_angle_deg(), 180.0 - angle);
                } else {
                    prop_assert_eq!(run.reflection_angle_deg(), ANGLE_NOT_APPLICABLE);
                }
            }
        }
    }
}
