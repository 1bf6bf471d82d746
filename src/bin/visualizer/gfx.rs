use std::collections::HashMap;
use std::path::Path;

use macroquad::miniquad::{ShaderError, ShaderType};
use macroquad::prelude::*;

use physics_visualizer::ResourceInitError;
use physics_visualizer::core::window::WorldView;
use physics_visualizer::error::ShaderStage;
use physics_visualizer::sim::graphics::{
    BufferHandle, DrawCall, Graphics, Primitive, ProgramHandle,
};

use crate::constants::{INTENSITY_UNIFORM, LINE_THICKNESS, POINT_RADIUS};

/// Shader programs become macroquad materials; vertex buffers stay on the
/// CPU and are drawn as shapes through the world view each frame.
pub(crate) struct MacroquadGraphics {
    next_id: u32,
    materials: HashMap<u32, Material>,
    buffers: HashMap<u32, Vec<Vec2>>,
    view: WorldView,
}

impl MacroquadGraphics {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            materials: HashMap::new(),
            buffers: HashMap::new(),
            view: WorldView::scene(screen_width(), screen_height()),
        }
    }

    /// Refit the world window to the current screen size.
    pub(crate) fn set_view(&mut self, view: WorldView) {
        self.view = view;
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

fn read_source(path: &Path) -> Result<String, ResourceInitError> {
    std::fs::read_to_string(path).map_err(|source| ResourceInitError::ShaderSource {
        path: path.to_path_buf(),
        source,
    })
}

fn shader_error(
    err: macroquad::Error,
    vertex_path: &Path,
    fragment_path: &Path,
) -> ResourceInitError {
    match err {
        macroquad::Error::ShaderError(ShaderError::LinkError(log)) => {
            ResourceInitError::ShaderLink { log }
        }
        macroquad::Error::ShaderError(ShaderError::CompilationError {
            shader_type,
            error_message,
        }) => {
            let (stage, path) = match shader_type {
                ShaderType::Vertex => (ShaderStage::Vertex, vertex_path),
                ShaderType::Fragment => (ShaderStage::Fragment, fragment_path),
            };
            ResourceInitError::ShaderCompile {
                stage,
                path: path.to_path_buf(),
                log: error_message,
            }
        }
        other => ResourceInitError::ShaderLink {
            log: format!("{other:?}"),
        },
    }
}

/// Screen-space line segments for the line primitives.
pub(crate) fn segments(primitive: Primitive, points: &[Vec2]) -> Vec<(Vec2, Vec2)> {
    match primitive {
        Primitive::Lines => points.chunks_exact(2).map(|p| (p[0], p[1])).collect(),
        Primitive::LineStrip => points.windows(2).map(|p| (p[0], p[1])).collect(),
        Primitive::LineLoop => {
            let mut lines: Vec<_> = points.windows(2).map(|p| (p[0], p[1])).collect();
            if let [first, .., last] = points {
                if points.len() > 2 {
                    lines.push((*last, *first));
                }
            }
            lines
        }
        Primitive::TriangleFan | Primitive::Points => Vec::new(),
    }
}

pub(crate) fn fan_triangles(points: &[Vec2]) -> Vec<[Vec2; 3]> {
    match points.split_first() {
        Some((hub, rest)) => rest.windows(2).map(|p| [*hub, p[0], p[1]]).collect(),
        None => Vec::new(),
    }
}

impl Graphics for MacroquadGraphics {
    fn compile_program(
        &mut self,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<ProgramHandle, ResourceInitError> {
        let vertex = read_source(vertex_path)?;
        let fragment = read_source(fragment_path)?;

        let material = load_material(
            ShaderSource::Glsl {
                vertex: &vertex,
                fragment: &fragment,
            },
            MaterialParams {
                uniforms: vec![UniformDesc::new(INTENSITY_UNIFORM, UniformType::Float1)],
                ..Default::default()
            },
        )
        .map_err(|err| shader_error(err, vertex_path, fragment_path))?;

        let id = self.next();
        self.materials.insert(id, material);
        log::debug!(
            "Compiled {} + {} as program {id}",
            vertex_path.display(),
            fragment_path.display()
        );
        Ok(ProgramHandle(id))
    }

    fn release_program(&mut self, program: ProgramHandle) {
        if self.materials.remove(&program.0).is_none() {
            log::warn!("Program {} released twice", program.0);
        }
    }

    fn allocate_buffer(&mut self) -> Result<BufferHandle, ResourceInitError> {
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
            log::warn!("Buffer {} released twice", buffer.0);
        }
    }

    fn draw(&mut self, call: &DrawCall) {
        let Some(points) = self.buffers.get(&call.buffer.0) else {
            return;
        };
        let end = (call.first + call.count).min(points.len());
        let start = call.first.min(end);
        let screen: Vec<Vec2> = points[start..end]
            .iter()
            .map(|p| self.view.world_to_screen(call.model.transform_point2(*p)))
            .collect();

        let Some(material) = self.materials.get(&call.program.0) else {
            return;
        };
        material.set_uniform(INTENSITY_UNIFORM, call.intensity);
        gl_use_material(material);

        match call.primitive {
            Primitive::TriangleFan => {
                for [a, b, c] in fan_triangles(&screen) {
                    draw_triangle(a, b, c, call.color);
                }
            }
            Primitive::Points => {
                for p in &screen {
                    draw_circle(p.x, p.y, POINT_RADIUS, call.color);
                }
            }
            line_primitive => {
                for (a, b) in segments(line_primitive, &screen) {
                    draw_line(a.x, a.y, b.x, b.y, LINE_THICKNESS, call.color);
                }
            }
        }

        gl_use_default_material();
    }
}
