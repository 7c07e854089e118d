//! Configuration for the drift particle backdrop.
//!
//! Settings live in `config.toml` under the platform config directory.
//! Every section and key is optional; anything missing falls back to its
//! default, and a missing file yields the full defaults.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use drift_core::{Palette, Rgb};
use serde::{Deserialize, Serialize};

/// File name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Frame rate bounds.
const MIN_FPS: u32 = 1;
const MAX_FPS: u32 = 240;

/// Smallest cell dimension, in surface units.
const MIN_CELL: f64 = 1.0;

/// Project directories for drift, if the platform has a home directory.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "drift")
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frame timing.
    pub animation: AnimationConfig,
    /// Particle colors.
    pub theme: ThemeConfig,
    /// Terminal rendering.
    pub render: RenderConfig,
}

/// Frame timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Target frames per second.
    pub fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

impl AnimationConfig {
    /// Frame rate clamped to the supported range.
    pub fn fps(&self) -> u32 {
        self.fps.clamp(MIN_FPS, MAX_FPS)
    }
}

/// Particle colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Accent palette at startup.
    pub palette: Palette,
}

/// Terminal rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Draw the particle field at all.
    pub enabled: bool,
    /// Surface units per terminal column.
    pub cell_width: f64,
    /// Surface units per terminal row.
    pub cell_height: f64,
    /// Color that translucent particles are flattened onto.
    pub backdrop: Rgb,
    /// Alpha multiplier applied when flattening.
    pub gain: f64,
    /// Show the key help line.
    pub show_help: bool,
}

impl RenderConfig {
    /// Cell width and height, each at least one surface unit.
    ///
    /// Non-finite values fall back to the defaults.
    pub fn cell_size(&self) -> (f64, f64) {
        let defaults = Self::default();
        let sanitize = |value: f64, fallback: f64| {
            if value.is_finite() {
                value.max(MIN_CELL)
            } else {
                fallback
            }
        };
        (
            sanitize(self.cell_width, defaults.cell_width),
            sanitize(self.cell_height, defaults.cell_height),
        )
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cell_width: 8.0,
            cell_height: 16.0,
            backdrop: Rgb::BLACK,
            gain: 3.0,
            show_help: true,
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(path)
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                log::debug!("loading config from {}", path.display());
                Self::parse(&contents)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(ConfigError::Parse)
    }

    /// Write to a specific file, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// The platform has no home directory to put a config in.
    NoConfigDir,
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "no configuration directory available"),
            ConfigError::Io(e) => write!(f, "configuration I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "invalid configuration: {e}"),
            ConfigError::Serialize(e) => write!(f, "could not serialize configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}
