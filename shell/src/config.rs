//! Shell configuration loaded from TOML.

use anyhow::{Context, Result};
use sadl_workflow::WorkflowConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Top-level shell configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Simulated network latency of the stand-in SDK (ms).
    pub simulated_latency_ms: u64,
    /// Coordinator settings.
    pub workflow: WorkflowConfig,
}

impl ShellConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse shell config")
    }
}

/// Default config location: `<config dir>/sadl-shell/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sadl-shell").join("config.toml"))
}

/// Loads the configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// when present and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<ShellConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => {
                debug!("No config file found, using defaults");
                return Ok(ShellConfig::default());
            }
        },
    };

    info!("Loading config from {:?}", path);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    ShellConfig::from_toml(&text)
}
