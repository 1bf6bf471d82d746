//! Shader loading and vertex buffers as seen by a simulation.
//!
//! The simulations only ever hold opaque handles; the windowed binary backs
//! them with macroquad materials, tests with a recording fake.

use std::ops::Range;
use std::path::Path;

use macroquad::color::Color;
use macroquad::math::{Affine2, Vec2};

use crate::error::ResourceInitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Independent segments, two vertices each.
    Lines,
    LineStrip,
    LineLoop,
    TriangleFan,
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub program: ProgramHandle,
    pub buffer: BufferHandle,
    pub primitive: Primitive,
    /// Vertex range within the buffer.
    pub first: usize,
    pub count: usize,
    pub color: Color,
    pub intensity: f32,
    /// World transform applied to every vertex.
    pub model: Affine2,
}

impl DrawCall {
    pub fn new(
        program: ProgramHandle,
        buffer: BufferHandle,
        primitive: Primitive,
        vertices: Range<usize>,
        color: Color,
    ) -> Self {
        Self {
            program,
            buffer,
            primitive,
            first: vertices.start,
            count: vertices.end.saturating_sub(vertices.start),
            color,
            intensity: 1.0,
            model: Affine2::IDENTITY,
        }
    }

    pub fn with_model(mut self, model: Affine2) -> Self {
        self.model = model;
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }
}

pub trait Graphics {
    /// Reads and compiles both stages and links them. On failure no program
    /// handle exists.
    fn compile_program(
        &mut self,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<ProgramHandle, ResourceInitError>;

    fn release_program(&mut self, program: ProgramHandle);

    fn allocate_buffer(&mut self) -> Result<BufferHandle, ResourceInitError>;

    /// Replaces the buffer contents with `points`.
    fn upload(&mut self, buffer: BufferHandle, points: &[Vec2]);

    fn release_buffer(&mut self, buffer: BufferHandle);

    fn draw(&mut self, call: &DrawCall);
}

/// One shader program plus a fixed number of vertex buffers, owned by a
/// single simulation instance.
#[derive(Debug)]
pub struct GpuResources {
    program: Option<ProgramHandle>,
    buffers: Vec<BufferHandle>,
}

impl GpuResources {
    /// All-or-nothing: if any step fails, whatever was already acquired is
    /// released before the error is returned.
    pub fn acquire(
        gfx: &mut dyn Graphics,
        vertex_path: &Path,
        fragment_path: &Path,
        buffer_count: usize,
    ) -> Result<Self, ResourceInitError> {
        let program = gfx.compile_program(vertex_path, fragment_path)?;
        let mut resources = Self {
            program: Some(program),
            buffers: Vec::with_capacity(buffer_count),
        };

        for _ in 0..buffer_count {
            match gfx.allocate_buffer() {
                Ok(buffer) => resources.buffers.push(buffer),
                Err(err) => {
                    resources.release(gfx);
                    return Err(err);
                }
            }
        }

        log::debug!(
            "Acquired program {:?} and {} buffer(s)",
            program,
            resources.buffers.len()
        );
        Ok(resources)
    }

    pub fn program(&self) -> Option<ProgramHandle> {
        self.program
    }

    pub fn buffer(&self, index: usize) -> Option<BufferHandle> {
        self.buffers.get(index).copied()
    }

    pub fn is_released(&self) -> bool {
        self.program.is_none() && self.buffers.is_empty()
    }

    pub fn release(&mut self, gfx: &mut dyn Graphics) {
        let buffer_count = self.buffers.len();
        for buffer in self.buffers.drain(..) {
            gfx.release_buffer(buffer);
        }
        if let Some(program) = self.program.take() {
            gfx.release_program(program);
            log::debug!("Released program {:?} and {buffer_count} buffer(s)", program);
        }
    }
}
