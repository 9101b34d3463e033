//! Platform directory resolution for config, data, and state files.

use crate::error::ApiError;
use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "talos";

fn project_dirs() -> Result<ProjectDirs, ApiError> {
    ProjectDirs::from("", APP_NAME, APP_NAME).ok_or_else(|| {
        ApiError::ConfigError("Could not determine home directory (HOME not set)".to_string())
    })
}

/// `$XDG_CONFIG_HOME/talos`, falling back to the platform config directory
pub fn config_dir() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home).join(APP_NAME));
        }
    }
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Global config file consulted on every load (optional)
pub fn global_config_file() -> Result<PathBuf, ApiError> {
    Ok(config_dir()?.join("config.toml"))
}

/// `$XDG_DATA_HOME/talos`, falling back to the platform data directory
pub fn default_data_dir() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        if !xdg_data_home.is_empty() {
            return Ok(PathBuf::from(xdg_data_home).join(APP_NAME));
        }
    }
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// Directory for runtime state such as the log file.
///
/// Platforms without a state directory use the local data directory.
pub fn state_dir() -> Result<PathBuf, ApiError> {
    let dirs = project_dirs()?;
    Ok(dirs
        .state_dir()
        .unwrap_or_else(|| dirs.data_local_dir())
        .to_path_buf())
}
