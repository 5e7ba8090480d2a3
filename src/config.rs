//! Startup configuration. Defaults reproduce the stock scene; an optional TOML file
//! (path from `MOONDRIVE_CONFIG`) overrides any subset of fields.

use std::path::Path;
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub scene: SceneConfig,
    pub moon: MoonConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "moondrive".to_string(),
            target_fps: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub map_model: String,
    /// Quaternion (x, y, z, w); normalized before use
    pub map_rotation: [f32; 4],
    pub grid_slices: u32,
    pub grid_spacing: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            map_model: "resources/map.obj".to_string(),
            map_rotation: [0.0, 7.2, 7.2, 0.0],
            grid_slices: 24,
            grid_spacing: 24.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MoonConfig {
    /// Fixed coordinate on the axis the orbit does not move
    pub start_x: f32,
    pub orbit_radius: f32,
    pub period: f32,
    pub z_offset: f32,
    pub speed: f32,
    pub size: f32,
    pub speed_range: [f32; 2],
    pub size_range: [f32; 2],
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            start_x: -150.0,
            orbit_radius: 180.0,
            period: 1000.0,
            z_offset: 160.0,
            speed: 0.2,
            size: 4.0,
            speed_range: [0.1, 2.0],
            size_range: [2.0, 20.0],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    /// Follow direction from the target; scaled by `follow_distance`
    pub follow_offset: [f32; 3],
    pub follow_distance: f32,
    pub follow_height: f32,
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            follow_offset: [1.0, 0.0, 1.0],
            follow_distance: 8.0,
            follow_height: 3.0,
            move_speed: 20.0,
            mouse_sensitivity: 0.005,
        }
    }
}

impl AppConfig {
    /// `None` yields the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reads `MOONDRIVE_CONFIG` if set
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os("MOONDRIVE_CONFIG") {
            Some(p) => Self::load(Some(Path::new(&p))),
            None => Self::load(None),
        }
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.window.target_fps.max(1) as f64)
    }
}
