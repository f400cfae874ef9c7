//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants live here:
//! - World units, angle units (65536 per turn) and raw Q16.16 units are named
//! - Defaults reproduce the reference watch face
//! - Everything except recording can be loaded from a TOML file

mod camera;
mod render;
mod world;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// Re-export all types
pub use camera::CameraParams;
pub use render::{ModeDefaults, RecordingConfig, RenderConfig};
pub use world::{PhysicsParams, WorldParams};

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sensor-driven session. When false (recording), the camera uses a fixed
    /// view point and the bouncing mode starts with a launch velocity.
    pub interactive: bool,

    pub world: WorldParams,
    pub physics: PhysicsParams,
    pub camera: CameraParams,
    pub render: RenderConfig,
    pub modes: ModeDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interactive: true,
            world: WorldParams::default(),
            physics: PhysicsParams::default(),
            camera: CameraParams::default(),
            render: RenderConfig::default(),
            modes: ModeDefaults::default(),
        }
    }
}

impl Config {
    /// Load a TOML config file. Missing sections keep their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration (grid size, screen size, shift ranges)
    pub fn validate(&self) -> Result<(), AppError> {
        if self.world.grid_lines < 2 {
            return Err(AppError::ConfigInvalid(format!(
                "grid_lines must be at least 2, got {}",
                self.world.grid_lines
            )));
        }
        if self.world.grid_scale <= 0.0 || self.world.grid_scale > 64.0 {
            return Err(AppError::ConfigInvalid(format!(
                "grid_scale must be in (0, 64], got {}",
                self.world.grid_scale
            )));
        }
        if self.render.screen_width == 0 || self.render.screen_height == 0 {
            return Err(AppError::ConfigInvalid(format!(
                "screen must not be empty, got {}x{}",
                self.render.screen_width, self.render.screen_height
            )));
        }
        if self.world.visibility_iterations > 15 {
            return Err(AppError::ConfigInvalid(format!(
                "visibility_iterations must be at most 15, got {}",
                self.world.visibility_iterations
            )));
        }
        if self.physics.drag_shift == 0 || self.physics.drag_shift > 31 {
            return Err(AppError::ConfigInvalid(format!(
                "drag_shift must be in 1..=31, got {}",
                self.physics.drag_shift
            )));
        }
        if self.physics.inertia_shift > 31 {
            return Err(AppError::ConfigInvalid(format!(
                "inertia_shift must be at most 31, got {}",
                self.physics.inertia_shift
            )));
        }
        if self.camera.sampler_capacity == 0 {
            return Err(AppError::ConfigInvalid(
                "sampler_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
