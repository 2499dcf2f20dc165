//! Game configuration resource.
//!
//! Settings are read from an INI file. Every key has a default, so a missing
//! file or a missing key simply leaves the default in place; a value that is
//! present but malformed is reported as an error.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! width = 20
//! height = 15
//! tile_size = 16
//! seed = 42
//!
//! [timing]
//! frame_ms = 16.0
//! frames = 600
//! time_scale = 1.0
//! intro_ms = 1000.0
//!
//! [loops]
//! catch_up = false
//! water_fps = 2.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::loopmanager::FirePolicy;
use crate::resources::size::Size;

/// Default safe values for startup
const DEFAULT_GRID_WIDTH: u32 = 20;
const DEFAULT_GRID_HEIGHT: u32 = 15;
const DEFAULT_TILE_SIZE: u32 = 16;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_FRAME_MS: f32 = 16.0;
const DEFAULT_FRAMES: u64 = 600;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_INTRO_MS: f32 = 1000.0;
const DEFAULT_CATCH_UP: bool = false;
const DEFAULT_WATER_FPS: f32 = 2.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Errors raised while reading or writing the configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("invalid value for [{section}] {key}: {reason}")]
    Invalid {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
    #[error("failed to save config file {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// World width in tiles.
    pub grid_width: u32,
    /// World height in tiles.
    pub grid_height: u32,
    /// Edge of one square tile in pixels.
    pub tile_size: u32,
    /// Seed for map decoration.
    pub seed: u64,
    /// Simulated milliseconds per frame for the headless driver.
    pub frame_ms: f32,
    /// Frames the headless driver runs before quitting.
    pub frames: u64,
    /// Multiplier applied to every frame delta.
    pub time_scale: f32,
    /// Milliseconds between setup and play.
    pub intro_ms: f32,
    /// Fire every crossed count boundary instead of at most one per update.
    pub catch_up: bool,
    /// Water animation speed in frames per second.
    pub water_fps: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            seed: DEFAULT_SEED,
            frame_ms: DEFAULT_FRAME_MS,
            frames: DEFAULT_FRAMES,
            time_scale: DEFAULT_TIME_SCALE,
            intro_ms: DEFAULT_INTRO_MS,
            catch_up: DEFAULT_CATCH_UP,
            water_fps: DEFAULT_WATER_FPS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|reason| ConfigError::Load {
                path: self.config_path.clone(),
                reason,
            })?;

        // [world] section
        if let Some(width) = read(config.getuint("world", "width"), "world", "width")? {
            self.grid_width = to_u32(width, "world", "width")?;
        }
        if let Some(height) = read(config.getuint("world", "height"), "world", "height")? {
            self.grid_height = to_u32(height, "world", "height")?;
        }
        if let Some(tile) = read(config.getuint("world", "tile_size"), "world", "tile_size")? {
            self.tile_size = to_u32(tile, "world", "tile_size")?;
        }
        if let Some(seed) = read(config.getuint("world", "seed"), "world", "seed")? {
            self.seed = seed;
        }

        // [timing] section
        if let Some(ms) = read(config.getfloat("timing", "frame_ms"), "timing", "frame_ms")? {
            self.frame_ms = ms as f32;
        }
        if let Some(frames) = read(config.getuint("timing", "frames"), "timing", "frames")? {
            self.frames = frames;
        }
        if let Some(scale) = read(config.getfloat("timing", "time_scale"), "timing", "time_scale")? {
            self.time_scale = scale as f32;
        }
        if let Some(ms) = read(config.getfloat("timing", "intro_ms"), "timing", "intro_ms")? {
            self.intro_ms = ms as f32;
        }

        // [loops] section
        if let Some(catch_up) = read(config.getbool("loops", "catch_up"), "loops", "catch_up")? {
            self.catch_up = catch_up;
        }
        if let Some(fps) = read(config.getfloat("loops", "water_fps"), "loops", "water_fps")? {
            self.water_fps = fps as f32;
        }

        info!(
            "Loaded config: {} world, tile={}px, seed={}, frame={}ms x{}, scale={}, catch_up={}",
            self.grid_size(),
            self.tile_size,
            self.seed,
            self.frame_ms,
            self.frames,
            self.time_scale,
            self.catch_up
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        // [world] section
        config.set("world", "width", Some(self.grid_width.to_string()));
        config.set("world", "height", Some(self.grid_height.to_string()));
        config.set("world", "tile_size", Some(self.tile_size.to_string()));
        config.set("world", "seed", Some(self.seed.to_string()));

        // [timing] section
        config.set("timing", "frame_ms", Some(self.frame_ms.to_string()));
        config.set("timing", "frames", Some(self.frames.to_string()));
        config.set("timing", "time_scale", Some(self.time_scale.to_string()));
        config.set("timing", "intro_ms", Some(self.intro_ms.to_string()));

        // [loops] section
        config.set("loops", "catch_up", Some(self.catch_up.to_string()));
        config.set("loops", "water_fps", Some(self.water_fps.to_string()));

        config
            .write(&self.config_path)
            .map_err(|source| ConfigError::Save {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// World size in tiles.
    pub fn grid_size(&self) -> Size {
        Size::new(self.grid_width, self.grid_height)
    }

    /// World size in pixels.
    pub fn pixel_size(&self) -> Size {
        self.grid_size() * Size::new(self.tile_size, self.tile_size)
    }

    pub fn fire_policy(&self) -> FirePolicy {
        if self.catch_up {
            FirePolicy::CatchUp
        } else {
            FirePolicy::Single
        }
    }
}

fn read<T>(
    value: Result<Option<T>, String>,
    section: &'static str,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    value.map_err(|reason| ConfigError::Invalid {
        section,
        key,
        reason,
    })
}

fn to_u32(value: u64, section: &'static str, key: &'static str) -> Result<u32, ConfigError> {
    u32::try_from(value).map_err(|e| ConfigError::Invalid {
        section,
        key,
        reason: e.to_string(),
    })
}
