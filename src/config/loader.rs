//! Configuration loading from file system

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::defaults::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use super::types::Config;
use crate::error::{NuiError, Result};

/// Resolve the config file path: `$NUI_MENU_CONFIG`, else ~/.nui-menu/config.json
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(shellexpand::tilde(&path).as_ref());
        }
    }
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

/// Load configuration from an explicit path.
///
/// A missing file is not an error; an unreadable or invalid file logs a
/// warning and falls back to defaults.
#[instrument(name = "load_config", skip_all, fields(path = %path.display()))]
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        info!("Config file not found, using defaults");
        return Config::default();
    }

    match read_config(path) {
        Ok(config) => {
            info!(resource = %config.resource_name, "Successfully loaded config");
            config
        }
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| NuiError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let config: Config = serde_json::from_str(raw.trim())
        .map_err(|e| NuiError::Config(format!("invalid JSON in {}: {}", path.display(), e)))?;
    if config.resource_name.trim().is_empty() && config.callback_base.is_none() {
        return Err(NuiError::Config(
            "resourceName must not be empty".to_string(),
        ));
    }
    Ok(config)
}
