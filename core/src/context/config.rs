//! Application configuration
//!
//! Persistence for the shared `AppConfig` from hudkit-types, plus the
//! per-widget config/data path helpers used by widget glue code.

use std::path::PathBuf;

use hudkit_types::AppConfig;

use super::error::ConfigError;

const APP_NAME: &str = "hudkit";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn save(self) -> Result<(), ConfigError>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        confy::load(APP_NAME, CONFIG_NAME).unwrap_or_default()
    }

    fn save(self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-Widget Paths
// ─────────────────────────────────────────────────────────────────────────────

/// Config file path for a named widget, e.g. `~/.config/hudkit/<name>.toml`.
/// Creates the parent directory if needed.
pub fn widget_config_path(widget_name: &str) -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(APP_NAME);
    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir.join(format!("{widget_name}.toml")))
}

/// Data file path for a named widget, e.g. `~/.local/share/hudkit/<name>.data`.
/// Creates the parent directory if needed.
pub fn widget_data_path(widget_name: &str) -> Result<PathBuf, ConfigError> {
    let dir = dirs::data_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(APP_NAME);
    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir.join(format!("{widget_name}.data")))
}
