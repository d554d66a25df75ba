//! Game settings
//!
//! All tuning values live in one JSON document. Every field has a default, so a
//! settings file only needs to list the values it changes.

use crate::entity::PlayArea;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file looked up next to the executable's working directory
pub const LOCAL_SETTINGS_PATH: &str = "assets/config/game_settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        WindowSettings {
            title: "Asteroid Dodge".to_string(),
            width: 1200,
            height: 800,
            fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipSettings {
    pub width: u32,
    pub height: u32,
    pub lives: u32,
    pub acceleration: f32,
    pub max_speed_squared: f32,
    /// Degrees per frame while a rotation key is held
    pub rotation_speed: f32,
}

impl Default for ShipSettings {
    fn default() -> Self {
        ShipSettings {
            width: 60,
            height: 60,
            lives: 3,
            acceleration: 0.3,
            max_speed_squared: 64.0,
            rotation_speed: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserSettings {
    pub width: u32,
    pub height: u32,
    /// Pixels per frame
    pub speed: f32,
}

impl Default for LaserSettings {
    fn default() -> Self {
        LaserSettings {
            width: 6,
            height: 24,
            speed: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidSettings {
    pub width: u32,
    pub height: u32,
    pub initial_count: usize,
    /// Rotation speed is drawn from `[-max_rotation_speed, max_rotation_speed)`
    pub max_rotation_speed: i32,
    /// Radius of the disk around the screen centre that asteroids drift toward
    pub center_area_radius: i32,
}

impl Default for AsteroidSettings {
    fn default() -> Self {
        AsteroidSettings {
            width: 60,
            height: 60,
            initial_count: 10,
            max_rotation_speed: 3,
            center_area_radius: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionSettings {
    pub duration_ms: u64,
}

impl Default for ExplosionSettings {
    fn default() -> Self {
        ExplosionSettings { duration_ms: 800 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub window: WindowSettings,
    pub ship: ShipSettings,
    pub laser: LaserSettings,
    pub asteroids: AsteroidSettings,
    pub explosion: ExplosionSettings,
    /// Off-screen distance before an object counts as out of bounds
    pub bound_margin: f32,
    pub assets_dir: PathBuf,
    /// Fixed seed for the asteroid generator; random when absent
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            window: WindowSettings::default(),
            ship: ShipSettings::default(),
            laser: LaserSettings::default(),
            asteroids: AsteroidSettings::default(),
            explosion: ExplosionSettings::default(),
            bound_margin: 50.0,
            assets_dir: PathBuf::from("assets/img"),
            seed: None,
        }
    }
}

impl GameSettings {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GameError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let settings = Self::from_json(&content).map_err(|e| GameError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        settings.validate().map_err(|reason| GameError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.bound_margin.is_nan() || self.bound_margin < 0.0 {
            return Err(format!(
                "bound_margin must be zero or positive, got {}",
                self.bound_margin
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }
        Ok(())
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load the first settings file found, falling back to defaults
    ///
    /// Lookup order: the local `assets/config` file, then the per-user config
    /// directory.
    pub fn load() -> Result<Self, GameError> {
        for candidate in Self::candidate_paths() {
            if candidate.is_file() {
                log::info!("Loading settings from {}", candidate.display());
                return Self::load_from_file(&candidate);
            }
        }

        log::info!("No settings file found, using defaults");
        Ok(GameSettings::default())
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_SETTINGS_PATH)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("asteroid-dodge").join("settings.json"));
        }
        paths
    }

    pub fn play_area(&self) -> PlayArea {
        PlayArea::new(
            self.window.width as f32,
            self.window.height as f32,
            self.bound_margin,
        )
    }

    pub fn asset_path(&self, file_name: &str) -> PathBuf {
        self.assets_dir.join(file_name)
    }
}
