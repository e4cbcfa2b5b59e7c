use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::ConfigError;

const CONFIG_DIR: &str = "entrykit";
const CONFIG_FILE: &str = "config.toml";

/// Loaded config plus a warning to surface when the file was unusable
#[derive(Debug)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the user config. A missing file silently yields defaults.
pub fn load_config() -> ConfigResult {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => ConfigResult {
            config: Config::default(),
            warning: None,
        },
    }
}

/// Load config from an explicit path. Any failure falls back to defaults
/// with a warning instead of aborting.
pub fn load_config_from_path(path: &Path) -> ConfigResult {
    let loaded = fs::read_to_string(path)
        .map_err(ConfigError::from)
        .and_then(|content| parse_config(&content));

    match loaded {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => {
            log::warn!("Ignoring config at {}: {}", path.display(), e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!(
                    "Failed to load config {}: {}. Using defaults.",
                    path.display(),
                    e
                )),
            }
        }
    }
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod loader_tests;
