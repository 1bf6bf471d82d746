//! Error types for the simulation core and its binaries.

use std::fmt;
use std::path::PathBuf;

use macroquad::math::Vec2;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failures while acquiring the GPU resources a simulation needs.
///
/// Any of these is fatal to the instance being initialised; nothing it
/// allocated before the failure survives.
#[derive(Debug, Error)]
pub enum ResourceInitError {
    #[error("failed to read shader source {}: {source}", path.display())]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader compilation failed ({}): {log}", path.display())]
    ShaderCompile {
        stage: ShaderStage,
        path: PathBuf,
        log: String,
    },

    #[error("shader program link failed: {log}")]
    ShaderLink { log: String },

    #[error("vertex buffer allocation failed: {0}")]
    BufferAllocation(String),
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    ResourceInit(#[from] ResourceInitError),

    #[error("simulation is already initialized")]
    AlreadyInitialized,

    #[error("simulation has not been initialized")]
    NotInitialized,

    #[error("elapsed time must be finite and non-negative, got {0}")]
    InvalidElapsed(f32),

    #[error("ray direction ({:.3}, {:.3}) is parallel to the interface", .direction.x, .direction.y)]
    RayParallelToInterface { direction: Vec2 },

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("plot export failed: {0}")]
    Plot(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SimError {
    pub fn is_resource_init(&self) -> bool {
        matches!(self, SimError::ResourceInit(_))
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_message_carries_log_text() {
        let err = ResourceInitError::ShaderCompile {
            stage: ShaderStage::Fragment,
            path: PathBuf::from("assets/shaders/projectile.frag"),
            log: "0:3: syntax error".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("fragment shader compilation failed"));
        assert!(msg.contains("projectile.frag"));
        assert!(msg.contains("0:3: syntax error"));
    }

    #[test]
    fn resource_errors_convert_into_sim_errors() {
        let err: SimError = ResourceInitError::ShaderLink {
            log: "missing main".to_string(),
        }
        .into();
        assert!(err.is_resource_init());
        assert!(!SimError::NotInitialized.is_resource_init());
    }
}
