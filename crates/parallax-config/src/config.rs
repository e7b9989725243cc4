//! The `config.ron` document: starfield settings, demo walk and debug options.

use std::path::{Path, PathBuf};

use glam::DVec2;
use parallax_starfield::{StarfieldConfig, StarfieldError};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Everything read from `config.ron`. Missing sections fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Seed, layer stack and viewpoints.
    pub starfield: StarfieldConfig,
    /// Scripted walk used by the demo host.
    pub demo: DemoConfig,
    pub debug: DebugConfig,
}

/// Scripted viewer walk and snapshot output for the demo host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Starting viewer position in world units.
    pub start: DVec2,
    /// Displacement applied each step.
    pub velocity: DVec2,
    /// Number of position updates to run.
    pub steps: u32,
    /// Visible screen area, centred on the viewer.
    pub view_width: f64,
    pub view_height: f64,
    /// Where to write the SVG snapshot of the final frame.
    pub output: PathBuf,
}

/// Logging options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// `EnvFilter` directives, e.g. `"info,parallax_starfield=debug"`.
    pub log_level: String,
    /// Write a JSON log file next to the config in debug builds.
    pub log_to_file: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            start: DVec2::ZERO,
            velocity: DVec2::new(10.0, 4.0),
            steps: 400,
            view_width: 200.0,
            view_height: 150.0,
            output: PathBuf::from("starfield.svg"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl Config {
    /// Platform config directory for the starfield tools.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("parallax-starfield"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Read `config.ron` from `config_dir`, writing the defaults there first if
    /// the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default starfield config to {}", path.display());
            return Ok(config);
        }

        let config = Self::read_file(&path)?;
        log::info!(
            "Loaded starfield config from {} (seed {:?}, {} layers)",
            path.display(),
            config.starfield.seed,
            config.starfield.layers.len()
        );
        Ok(config)
    }

    /// Write this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        // Layers nest generator tiers four levels deep; keep those on their own lines.
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(6)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&path, text).map_err(write_err)
    }

    /// Re-read the file and return the new config only if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = Self::read_file(&config_dir.join(CONFIG_FILE))?;
        if fresh == *self {
            return Ok(None);
        }
        if fresh.starfield != self.starfield {
            log::info!("Starfield settings changed; chunks must be regenerated");
        } else {
            log::debug!("Config reloaded with changes");
        }
        Ok(Some(fresh))
    }

    /// Reject settings a [`StarfieldSystem`](parallax_starfield::StarfieldSystem)
    /// could never be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let starfield = &self.starfield;
        if starfield.layers.is_empty() {
            return Err(StarfieldError::NoLayers.into());
        }
        if starfield.viewpoints.is_empty() {
            return Err(StarfieldError::NoViewpoints.into());
        }
        for layer in &starfield.layers {
            layer.validate()?;
        }
        Ok(())
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}
