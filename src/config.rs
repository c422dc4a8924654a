//! Configuration loading and management
//!
//! Handles parsing of `tsk.toml` configuration files and resolution of
//! the data directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Config file name, looked up in the platform config directory unless an
/// explicit path is given.
pub const CONFIG_FILE: &str = "tsk.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Override for the data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// First-run seeding
    #[serde(default)]
    pub seed: SeedConfig,
}

/// First-run seed configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Seed fixed onboarding tasks instead of an empty list
    #[serde(default)]
    pub onboarding: bool,
}

impl Config {
    /// Load configuration from a `tsk.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit path when given, otherwise from
    /// the platform config directory, otherwise defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let Some(dir) = default_config_dir() else {
            return Ok(Self::default());
        };
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(
                    "data_dir cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Effective data directory: CLI flag first, then the config override,
/// then the platform data directory.
pub fn resolve_data_dir(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }
    default_data_dir().ok_or_else(|| {
        Error::InvalidConfig(
            "no usable data directory; pass --data-dir or set data_dir in tsk.toml".to_string(),
        )
    })
}

/// Platform config directory for tsk
pub fn default_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tsk").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Platform data directory for tsk
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tsk").map(|dirs| dirs.data_dir().to_path_buf())
}
