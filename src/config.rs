//! Start-up configuration
//!
//! Read once from a JSON file; every field is optional and falls back to the
//! built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sim::SimulationKind;

pub const DEFAULT_CONFIG_FILE: &str = "physics_visualizer.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Physics Visualizer".to_string(),
        }
    }
}

/// Initial controls of the projectile simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub cannon_angle_deg: f32,
    pub launch_speed: f32,
    pub target_distance: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            cannon_angle_deg: 45.0,
            launch_speed: 20.0,
            target_distance: 15.0,
        }
    }
}

/// Initial controls of the refraction simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefractionConfig {
    pub incident_angle_deg: f32,
    pub n1: f32,
    pub n2: f32,
}

impl Default for RefractionConfig {
    fn default() -> Self {
        Self {
            incident_angle_deg: 45.0,
            n1: 1.0,
            n2: 1.33,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Directory holding `<simulation>.vert` / `<simulation>.frag`
    pub shader_dir: PathBuf,
    /// Where exported plots are written
    pub export_dir: PathBuf,
    pub window: WindowConfig,
    pub initial_simulation: SimulationKind,
    pub projectile: ProjectileConfig,
    pub refraction: RefractionConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            shader_dir: PathBuf::from("assets/shaders"),
            export_dir: PathBuf::from("."),
            window: WindowConfig::default(),
            initial_simulation: SimulationKind::Projectile,
            projectile: ProjectileConfig::default(),
            refraction: RefractionConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Missing file means defaults; unreadable or malformed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Ignoring config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn shader_paths(&self, kind: SimulationKind) -> (PathBuf, PathBuf) {
        let stem = kind.shader_stem();
        (
            self.shader_dir.join(format!("{stem}.vert")),
            self.shader_dir.join(format!("{stem}.frag")),
        )
    }
}
