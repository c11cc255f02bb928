//! Configuration management for yumwrap
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/yumwrap/config.toml

use crate::types::Tool;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the home directory when no package file is configured
pub const DEFAULT_PACKAGE_FILE: &str = "Packagefile";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package manager to drive; detected from PATH when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<Tool>,
    /// Privilege prefix for installs; an empty string disables it
    pub elevation: String,
    /// Package file used by `--install`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: None,
            elevation: "sudo".to_string(),
            package_file: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("yumwrap");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// A default config that cannot be written is still used for this run
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            if let Err(e) = config.save_to(path) {
                log::warn!("Using default configuration: {:#}", e);
            }
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Package file to install from, falling back to `<home>/Packagefile`
    pub fn package_file_path(&self, home: &Path) -> PathBuf {
        self.package_file
            .clone()
            .unwrap_or_else(|| home.join(DEFAULT_PACKAGE_FILE))
    }

    /// Privilege prefix, or `None` when disabled
    pub fn elevation(&self) -> Option<String> {
        let elevation = self.elevation.trim();
        (!elevation.is_empty()).then(|| elevation.to_string())
    }
}
