use std::{env, path::PathBuf};

use super::ConfigError;

/// Utility struct for locating the configuration file.
///
/// Follows the XDG Base Directory specification.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory path for the application.
    ///
    /// - First checks `XDG_CONFIG_HOME`
    /// - Falls back to `$HOME/.config`
    /// - Appends "mpris-remote" to the base config directory
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| ConfigError::NoHome)?;

        Ok(PathBuf::from(config_home).join("mpris-remote"))
    }

    /// Returns the default configuration file path.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined.
    pub fn config_file() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
