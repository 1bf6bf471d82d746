//! Cannon shot at a target on flat ground.
//!
//! [`ProjectileRun`] is the window-free state machine
//! (`Idle -> Running -> Completed`, back to `Idle` on reset);
//! [`ProjectileSimulation`] wraps it with drawing and controls.

use std::path::PathBuf;

use chrono::Local;
use macroquad::color::Color;
use macroquad::math::{Affine2, Vec2, vec2};

use crate::config::ProjectileConfig;
use crate::core::ballistics::{
    LaunchInputs, Score, flight_time_and_range, position_at_time, score, velocity_components,
};
use crate::core::plot;
use crate::error::{Result, SimError};
use crate::sim::graphics::{DrawCall, GpuResources, Graphics, Primitive};
use crate::sim::panel::{
    CANNON_ANGLE_DEG, ControlPanel, HIT_COLOR, LAUNCH_SPEED, MISS_COLOR, TARGET_DISTANCE,
};
use crate::sim::{FrameInput, Simulation, SimulationKind, validate_elapsed};

pub const LAUNCH_ORIGIN: Vec2 = Vec2::new(-10.0, 0.0);

const TARGET_RADIUS: f32 = 0.5;
const TARGET_SEGMENTS: usize = 32;
const CANNON_SCALE: f32 = 2.0;

const PATH_BUFFER: usize = 0;
const CANNON_BUFFER: usize = 1;
const TARGET_BUFFER: usize = 2;
const BUFFER_COUNT: usize = 3;

const BARREL_COLOR: Color = Color::new(0.4, 0.4, 0.4, 1.0);
const BASE_COLOR: Color = Color::new(0.6, 0.3, 0.1, 1.0);
const TARGET_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
const PATH_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);
const GROUND_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub start_position: Vec2,
    pub position: Vec2,
    pub velocity: Vec2,
    pub time: f32,
}

impl Projectile {
    fn at_rest(origin: Vec2) -> Self {
        Self {
            start_position: origin,
            position: origin,
            velocity: Vec2::ZERO,
            time: 0.0,
        }
    }

    fn advance(&mut self, elapsed_s: f32) {
        self.time += elapsed_s;
        self.position = position_at_time(self.start_position, self.velocity, self.time);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not running; nothing advanced.
    Skipped,
    Flying,
    Landed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileRun {
    projectile: Projectile,
    phase: Phase,
    cannon_angle_deg: f32,
    launch_speed: f32,
    target_distance: f32,
    target: Vec2,
    max_height: f32,
    total_distance: f32,
    current_height: f32,
    distance_from_target: f32,
    path_points: Vec<Vec2>,
}

impl ProjectileRun {
    pub fn new(config: ProjectileConfig) -> Self {
        let mut run = Self {
            projectile: Projectile::at_rest(LAUNCH_ORIGIN),
            phase: Phase::Idle,
            cannon_angle_deg: CANNON_ANGLE_DEG.clamp(config.cannon_angle_deg),
            launch_speed: LAUNCH_SPEED.clamp(config.launch_speed),
            target_distance: TARGET_DISTANCE.clamp(config.target_distance),
            target: LAUNCH_ORIGIN,
            max_height: 0.0,
            total_distance: 0.0,
            current_height: 0.0,
            distance_from_target: 0.0,
            path_points: Vec::new(),
        };
        run.reset();
        run
    }

    /// Back to `Idle` at the launch origin, keeping the current controls.
    pub fn reset(&mut self) {
        self.projectile = Projectile::at_rest(LAUNCH_ORIGIN);
        self.target = self.target_for(self.target_distance);
        self.path_points.clear();
        self.path_points.push(self.projectile.position);
        self.phase = Phase::Idle;
        self.max_height = 0.0;
        self.total_distance = 0.0;
        self.current_height = 0.0;
        self.distance_from_target = 0.0;
    }

    /// Launches with the current angle and speed. Only valid from `Idle`.
    pub fn fire(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.projectile.velocity = velocity_components(self.launch_inputs());
        self.projectile.time = 0.0;
        self.target = self.target_for(self.target_distance);
        self.phase = Phase::Running;
        log::info!(
            "Fired at {:.1} deg, {:.1} m/s toward target at x={:.2}",
            self.cannon_angle_deg,
            self.launch_speed,
            self.target.x
        );
        true
    }

    /// One physics step. Every running step appends exactly one path point;
    /// the first step at or below ground completes the run.
    pub fn step(&mut self, elapsed_s: f32) -> Result<StepOutcome> {
        let elapsed_s = validate_elapsed(elapsed_s)?;
        if self.phase != Phase::Running {
            return Ok(StepOutcome::Skipped);
        }

        self.projectile.advance(elapsed_s);
        self.current_height = self.projectile.position.y;
        self.max_height = self.max_height.max(self.current_height);
        self.path_points.push(self.projectile.position);

        if self.projectile.position.y > 0.0 {
            return Ok(StepOutcome::Flying);
        }

        self.phase = Phase::Completed;
        self.total_distance = self.projectile.position.x - self.projectile.start_position.x;
        self.distance_from_target = (self.projectile.position.x - self.target.x).abs();
        let result = score(self.distance_from_target);
        log::info!(
            "Landed after {:.2}s, {:.2} m downrange, {:.2} m from target ({}, {:.2} points)",
            self.projectile.time,
            self.total_distance,
            self.distance_from_target,
            if result.hit { "hit" } else { "miss" },
            result.points
        );
        Ok(StepOutcome::Landed)
    }

    pub fn set_cannon_angle(&mut self, angle_deg: f32) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.cannon_angle_deg = CANNON_ANGLE_DEG.clamp(angle_deg);
        true
    }

    pub fn set_launch_speed(&mut self, speed: f32) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.launch_speed = LAUNCH_SPEED.clamp(speed);
        true
    }

    pub fn set_target_distance(&mut self, distance: f32) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.target_distance = TARGET_DISTANCE.clamp(distance);
        self.target = self.target_for(self.target_distance);
        true
    }

    fn target_for(&self, distance: f32) -> Vec2 {
        vec2(self.projectile.start_position.x + distance, 0.0)
    }

    fn launch_inputs(&self) -> LaunchInputs {
        LaunchInputs {
            angle_deg: self.cannon_angle_deg,
            speed_mps: self.launch_speed,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn cannon_angle_deg(&self) -> f32 {
        self.cannon_angle_deg
    }

    pub fn launch_speed(&self) -> f32 {
        self.launch_speed
    }

    pub fn target_distance(&self) -> f32 {
        self.target_distance
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    pub fn total_distance(&self) -> f32 {
        self.total_distance
    }

    pub fn current_height(&self) -> f32 {
        self.current_height
    }

    pub fn distance_from_target(&self) -> f32 {
        self.distance_from_target
    }

    pub fn path_points(&self) -> &[Vec2] {
        &self.path_points
    }

    /// Only meaningful once the shell has landed.
    pub fn score(&self) -> Option<Score> {
        self.is_completed().then(|| score(self.distance_from_target))
    }

    /// Range on flat ground for the current controls.
    pub fn predicted_range(&self) -> f32 {
        flight_time_and_range(self.launch_inputs()).map_or(0.0, |(_, range)| range)
    }
}

/// Barrel (first four) then base (last four), both drawn as fans.
pub fn cannon_vertices() -> [Vec2; 8] {
    [
        vec2(-0.1, 0.1) * CANNON_SCALE,
        vec2(0.5, 0.1) * CANNON_SCALE,
        vec2(0.5, -0.1) * CANNON_SCALE,
        vec2(-0.1, -0.1) * CANNON_SCALE,
        vec2(-0.3, -0.15) * CANNON_SCALE,
        vec2(0.0, -0.15) * CANNON_SCALE,
        vec2(0.0, 0.15) * CANNON_SCALE,
        vec2(-0.3, 0.15) * CANNON_SCALE,
    ]
}

pub fn target_vertices() -> Vec<Vec2> {
    (0..TARGET_SEGMENTS)
        .map(|i| {
            let angle = (360.0 * i as f32 / TARGET_SEGMENTS as f32).to_radians();
            vec2(TARGET_RADIUS * angle.cos(), TARGET_RADIUS * angle.sin())
        })
        .collect()
}

/// The flight path followed by a two-vertex ground segment at launch height.
pub fn path_vertices(run: &ProjectileRun) -> Vec<Vec2> {
    let points = run.path_points();
    let ground_y = run.projectile().start_position.y;
    let mut vertices = Vec::with_capacity(points.len() + 2);
    vertices.extend_from_slice(points);
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        vertices.push(vec2(first.x, ground_y));
        vertices.push(vec2(last.x, ground_y));
    }
    vertices
}

pub struct ProjectileSimulation {
    run: ProjectileRun,
    vertex_shader: PathBuf,
    fragment_shader: PathBuf,
    export_dir: PathBuf,
    resources: Option<GpuResources>,
    export_status: Option<String>,
}

impl ProjectileSimulation {
    pub fn new(
        config: ProjectileConfig,
        vertex_shader: PathBuf,
        fragment_shader: PathBuf,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            run: ProjectileRun::new(config),
            vertex_shader,
            fragment_shader,
            export_dir,
            resources: None,
            export_status: None,
        }
    }

    pub fn run(&self) -> &ProjectileRun {
        &self.run
    }

    pub fn run_mut(&mut self) -> &mut ProjectileRun {
        &mut self.run
    }

    fn reset(&mut self) {
        self.run.reset();
        self.export_status = None;
        log::debug!("Projectile simulation reset");
    }

    fn draw_scene(&self, gfx: &mut dyn Graphics) -> Result<()> {
        let Some(resources) = self.resources.as_ref() else {
            return Err(SimError::NotInitialized);
        };
        let (Some(program), Some(path), Some(cannon), Some(target)) = (
            resources.program(),
            resources.buffer(PATH_BUFFER),
            resources.buffer(CANNON_BUFFER),
            resources.buffer(TARGET_BUFFER),
        ) else {
            return Err(SimError::NotInitialized);
        };

        let vertices = path_vertices(&self.run);
        gfx.upload(path, &vertices);

        let origin = self.run.projectile().start_position;
        let cannon_model =
            Affine2::from_angle_translation(self.run.cannon_angle_deg().to_radians(), origin);
        gfx.draw(
            &DrawCall::new(program, cannon, Primitive::TriangleFan, 0..4, BARREL_COLOR)
                .with_model(cannon_model),
        );
        gfx.draw(
            &DrawCall::new(program, cannon, Primitive::TriangleFan, 4..8, BASE_COLOR)
                .with_model(cannon_model),
        );

        gfx.draw(
            &DrawCall::new(program, target, Primitive::LineLoop, 0..TARGET_SEGMENTS, TARGET_COLOR)
                .with_model(Affine2::from_translation(self.run.target())),
        );

        let path_len = self.run.path_points().len();
        gfx.draw(&DrawCall::new(
            program,
            path,
            Primitive::LineStrip,
            0..path_len,
            PATH_COLOR,
        ));
        if path_len > 0 {
            gfx.draw(&DrawCall::new(
                program,
                path,
                Primitive::Points,
                path_len - 1..path_len,
                PATH_COLOR,
            ));
            gfx.draw(&DrawCall::new(
                program,
                path,
                Primitive::Lines,
                path_len..path_len + 2,
                GROUND_COLOR,
            ));
        }
        Ok(())
    }

    fn draw_panel(&mut self, panel: &mut dyn ControlPanel) {
        panel.heading("INITIAL CONDITIONS");
        panel.separator();

        match self.run.phase() {
            Phase::Idle => {
                let mut angle = self.run.cannon_angle_deg();
                if panel.slider("Cannon Angle", CANNON_ANGLE_DEG.range(), &mut angle) {
                    self.run.set_cannon_angle(angle);
                }
                let mut speed = self.run.launch_speed();
                if panel.slider("Launch Speed", LAUNCH_SPEED.range(), &mut speed) {
                    self.run.set_launch_speed(speed);
                }
                let mut distance = self.run.target_distance();
                if panel.slider("Target Distance", TARGET_DISTANCE.range(), &mut distance) {
                    self.run.set_target_distance(distance);
                }
                if panel.button("Fire Cannon!") {
                    self.run.fire();
                }
            }
            Phase::Running => {
                panel.text(&format!("Cannon Angle: {:.1} deg", self.run.cannon_angle_deg()));
                panel.text(&format!("Launch Speed: {:.1} m/s", self.run.launch_speed()));
                panel.text(&format!("Target Distance: {:.1} m", self.run.target_distance()));
            }
            Phase::Completed => {
                panel.text("Simulation completed! Press Reset to start new simulation.");
                if let Some(result) = self.run.score() {
                    if result.hit {
                        panel.colored_text(
                            HIT_COLOR,
                            &format!("Target Hit, Your point {:.2}", result.points),
                        );
                    } else {
                        panel.colored_text(
                            MISS_COLOR,
                            &format!("Target Missed, Your point {:.2}", result.points),
                        );
                    }
                }
                panel.text(&format!(
                    "Distance from Target: {:.2} m",
                    self.run.distance_from_target()
                ));
            }
        }

        panel.separator();
        panel.heading("STATISTICS");
        let projectile = self.run.projectile();
        panel.text(&format!("Current Height: {:.2} m", self.run.current_height()));
        panel.text(&format!("Max Height: {:.2} m", self.run.max_height()));
        panel.text(&format!("Total Distance: {:.2} m", self.run.total_distance()));
        panel.text(&format!(
            "Current Velocity: ({:.2}, {:.2}) m/s",
            projectile.velocity.x, projectile.velocity.y
        ));
        panel.text(&format!("Flight Time: {:.2} s", projectile.time));
        panel.text(&format!("Predicted Range: {:.2} m", self.run.predicted_range()));

        panel.separator();
        panel.heading("CONTROLS");
        if panel.button("Reset Simulation") {
            self.reset();
        }
        if self.run.is_completed() && panel.button("Export Plot") {
            self.export_plot();
        }
        if let Some(status) = &self.export_status {
            panel.text(status);
        }
    }

    fn export_plot(&mut self) {
        let file_name = format!("trajectory-{}.svg", Local::now().format("%Y%m%d-%H%M%S"));
        let path = self.export_dir.join(file_name);
        let status = match plot::export_trajectory(
            &path,
            self.run.path_points(),
            self.run.projectile().start_position,
            self.run.target().x,
        ) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                log::warn!("Trajectory export failed: {err}");
                format!("Export failed: {err}")
            }
        };
        self.export_status = Some(status);
    }
}

impl Simulation for ProjectileSimulation {
    fn kind(&self) -> SimulationKind {
        SimulationKind::Projectile
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
        if let (Some(cannon), Some(target)) = (
            resources.buffer(CANNON_BUFFER),
            resources.buffer(TARGET_BUFFER),
        ) {
            gfx.upload(cannon, &cannon_vertices());
            gfx.upload(target, &target_vertices());
        }
        self.resources = Some(resources);
        self.reset();
        log::info!("Projectile simulation initialized");
        Ok(())
    }

    fn render_frame(
        &mut self,
        elapsed_s: f32,
        gfx: &mut dyn Graphics,
        panel: &mut dyn ControlPanel,
    ) -> Result<()> {
        let elapsed_s = validate_elapsed(elapsed_s)?;
        if self.resources.is_none() {
            return Err(SimError::NotInitialized);
        }

        self.run.step(elapsed_s)?;
        self.draw_scene(gfx)?;
        self.draw_panel(panel);
        Ok(())
    }

    fn handle_input(&mut self, input: &FrameInput) {
        if input.reset {
            self.reset();
        }
    }

    fn teardown(&mut self, gfx: &mut dyn Graphics) {
        if let Some(mut resources) = self.resources.take() {
            resources.release(gfx);
            log::info!("Projectile simulation torn down");
        }
    }
}
