//! Recording fakes for the graphics and panel collaborators.

use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use macroquad::color::Color;
use macroquad::math::Vec2;

use crate::error::{ResourceInitError, ShaderStage};
use crate::sim::graphics::{BufferHandle, DrawCall, Graphics, ProgramHandle};
use crate::sim::panel::ControlPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Missing,
    Compile,
    Link,
    /// The n-th buffer allocation (0-based) and every later one fails.
    BufferAfter(usize),
}

#[derive(Debug, Default)]
pub struct FakeGraphics {
    next_id: u32,
    failure: Option<Failure>,
    allocations: usize,
    programs: HashSet<u32>,
    buffers: HashMap<u32, Vec<Vec2>>,
    double_releases: usize,
    pub draws: Vec<DrawCall>,
}

impl FakeGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn heal(&mut self) {
        self.failure = None;
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn double_releases(&self) -> usize {
        self.double_releases
    }

    pub fn contents(&self, buffer: BufferHandle) -> &[Vec2] {
        self.buffers.get(&buffer.0).map_or(&[], Vec::as_slice)
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Graphics for FakeGraphics {
    fn compile_program(
        &mut self,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<ProgramHandle, ResourceInitError> {
        match self.failure {
            Some(Failure::Missing) => Err(ResourceInitError::ShaderSource {
                path: vertex_path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            }),
            Some(Failure::Compile) => Err(ResourceInitError::ShaderCompile {
                stage: ShaderStage::Fragment,
                path: PathBuf::from(fragment_path),
                log: "syntax error".to_string(),
            }),
            Some(Failure::Link) => Err(ResourceInitError::ShaderLink {
                log: "varying mismatch".to_string(),
            }),
            _ => {
                let id = self.next();
                self.programs.insert(id);
                Ok(ProgramHandle(id))
            }
        }
    }

    fn release_program(&mut self, program: ProgramHandle) {
        if !self.programs.remove(&program.0) {
            self.double_releases += 1;
        }
    }

    fn allocate_buffer(&mut self) -> Result<BufferHandle, ResourceInitError> {
        let index = self.allocations;
        self.allocations += 1;
        if let Some(Failure::BufferAfter(n)) = self.failure {
            if index >= n {
                return Err(ResourceInitError::BufferAllocation(
                    "out of memory".to_string(),
                ));
            }
        }
        let id = self.next();
        self.buffers.insert(id, Vec::new());
        Ok(BufferHandle(id))
    }

    fn upload(&mut self, buffer: BufferHandle, points: &[Vec2]) {
        if let Some(data) = self.buffers.get_mut(&buffer.0) {
            data.clear();
            data.extend_from_slice(points);
        }
    }

    fn release_buffer(&mut self, buffer: BufferHandle) {
        if self.buffers.remove(&buffer.0).is_none() {
            self.double_releases += 1;
        }
    }

    fn draw(&mut self, call: &DrawCall) {
        self.draws.push(*call);
    }
}

/// Panel that records every line of text and answers widgets from a script.
#[derive(Debug, Default)]
pub struct ScriptedPanel {
    pub lines: Vec<String>,
    pub sliders_seen: Vec<String>,
    pub buttons_seen: Vec<String>,
    slider_values: HashMap<String, f32>,
    presses: HashSet<String>,
    toggles: HashSet<String>,
}

impl ScriptedPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_slider(mut self, label: &str, value: f32) -> Self {
        self.slider_values.insert(label.to_string(), value);
        self
    }

    pub fn press(mut self, label: &str) -> Self {
        self.presses.insert(label.to_string());
        self
    }

    pub fn toggle(mut self, label: &str) -> Self {
        self.toggles.insert(label.to_string());
        self
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl ControlPanel for ScriptedPanel {
    fn text(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn colored_text(&mut self, _color: Color, text: &str) {
        self.lines.push(text.to_string());
    }

    fn separator(&mut self) {}

    fn slider(&mut self, label: &str, range: RangeInclusive<f32>, value: &mut f32) -> bool {
        self.sliders_seen.push(label.to_string());
        match self.slider_values.get(label) {
            Some(v) => {
                *value = v.clamp(*range.start(), *range.end());
                true
            }
            None => false,
        }
    }

    fn button(&mut self, label: &str) -> bool {
        self.buttons_seen.push(label.to_string());
        self.presses.contains(label)
    }

    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
        if self.toggles.contains(label) {
            *value = !*value;
            true
        } else {
            false
        }
    }
}
