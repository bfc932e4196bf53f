//! Viewer Configuration
//!
//! All settings of the avatar viewer in one serde structure. Every field has
//! a default, so a JSON file only needs to name what it overrides:
//!
//! ```json
//! {
//!     "model_path": "assets/avatar.glb",
//!     "placement": { "avatar_height": 7.0 }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Top-level viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Model file, relative to the working directory.
    pub model_path: PathBuf,
    /// Idle-motion cadence in milliseconds.
    pub tick_interval_ms: u64,
    pub placement: PlacementConfig,
    pub camera: CameraConfig,
    pub lights: LightingConfig,
    pub orbit: OrbitConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Myth Avatar".into(),
            width: 1280,
            height: 720,
            model_path: PathBuf::from("avatar.glb"),
            tick_interval_ms: 1000,
            placement: PlacementConfig::default(),
            camera: CameraConfig::default(),
            lights: LightingConfig::default(),
            orbit: OrbitConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded viewer config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Idle-motion period; at least one millisecond.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Static placement of the whole model.
///
/// The root is lowered by a quarter of `avatar_height`, so taller avatars sit
/// lower in frame and the lower body drops out of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub avatar_height: f32,
    pub offset_x: f32,
    pub offset_z: f32,
    pub model_scale: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            avatar_height: 6.0,
            offset_x: 0.0,
            offset_z: 0.2,
            model_scale: 1.5,
        }
    }
}

impl PlacementConfig {
    /// Root position: `(offset_x, -avatar_height / 4, offset_z)`.
    #[must_use]
    pub fn root_position(&self) -> glam::Vec3 {
        glam::Vec3::new(self.offset_x, -self.avatar_height / 4.0, self.offset_z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 1.5, 3.0],
            fov: 50.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient: f32,
    pub directional: PositionedLight,
    pub point: PositionedLight,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: 0.8,
            directional: PositionedLight {
                position: [5.0, 5.0, 5.0],
                intensity: 2.0,
                cast_shadows: true,
            },
            point: PositionedLight {
                position: [-5.0, 5.0, -5.0],
                intensity: 0.5,
                cast_shadows: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedLight {
    pub position: [f32; 3],
    pub intensity: f32,
    #[serde(default)]
    pub cast_shadows: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub target: [f32; 3],
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            target: [0.0, 0.0, 0.0],
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: true,
            min_distance: 0.5,
            max_distance: 1000.0,
        }
    }
}
