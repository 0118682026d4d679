//! Core TOML config loading: read from path or platform default.

use crate::schema::GlimmerConfig;
use crate::validation;
use glimmer_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::template::default_config_toml;

const CONFIG_DIR: &str = "glimmer";
const CONFIG_FILE: &str = "config.toml";

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// After loading, the config is validated; if validation fails, a warning
/// is logged and the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<GlimmerConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: GlimmerConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/glimmer/config.toml`
/// On Linux: `~/.config/glimmer/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<GlimmerConfig, ConfigError> {
    let dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    load_or_create(&dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Location of the config file under the OS config directory, if there is one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load `path`, writing the commented default file there first if it is missing.
pub(crate) fn load_or_create(path: &Path) -> Result<GlimmerConfig, ConfigError> {
    match load_from_path(path) {
        Err(ConfigError::FileNotFound(_)) => {
            write_default_config(path)?;
            info!("created default config at {}", path.display());
            Ok(GlimmerConfig::default())
        }
        other => other,
    }
}

fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, default_config_toml())
    };
    write().map_err(|e| {
        let path = path.display();
        ConfigError::ParseError(format!("failed to write default config to {path}: {e}"))
    })
}
