//! Configuration schema definitions and loading.
//!
//! The configuration file is TOML with a `[general]` section plus any number
//! of `[player.<name>]` and `[command.<name>]` sections. Sections are parsed
//! individually: a malformed section is skipped with a diagnostic instead of
//! failing the whole file, matching the expectation that a half-edited config
//! should still drive the remote.

mod error;
mod paths;

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use toml::Value;
use tracing::{info, warn};

pub use error::ConfigError;
pub use paths::ConfigPaths;

/// Input device path used when the config does not name one.
pub const DEFAULT_DEVICE: &str = "/dev/input/by-id/usb-flirc.tv_flirc-if01-event-kbd";

/// Volume step applied by the volume keys when the config does not set one.
pub const DEFAULT_VOLUME_INTERVAL: f64 = 0.1;

/// General application settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Step applied by VolumeUp/VolumeDown, clamped to \[0.0, 1.0\].
    pub volume_interval: f64,

    /// Input device delivering the remote's key events.
    pub device: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            volume_interval: DEFAULT_VOLUME_INTERVAL,
            device: PathBuf::from(DEFAULT_DEVICE),
        }
    }
}

/// A `[player.<name>]` section: a key that switches to (and if necessary
/// launches) a specific media player.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerMapping {
    /// evdev key name, e.g. `KEY_F1`.
    pub key: String,

    /// Shell command that starts the player.
    pub app: String,

    /// MPRIS `Identity` the running player is expected to expose.
    pub identity: String,
}

/// A `[command.<name>]` section: a key that runs an arbitrary shell command.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandMapping {
    /// evdev key name, e.g. `KEY_POWER`.
    pub key: String,

    /// Shell command to run.
    pub app: String,
}

/// Complete configuration loaded at startup. Immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// General application settings.
    pub general: GeneralConfig,

    /// Player-switch mappings from `[player.*]` sections.
    pub players: Vec<PlayerMapping>,

    /// External-command mappings from `[command.*]` sections.
    pub commands: Vec<CommandMapping>,
}

impl Config {
    /// Load the configuration from a TOML file.
    ///
    /// The file itself must be readable and syntactically valid TOML;
    /// individual sections that fail to deserialize are skipped with a
    /// warning.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value = toml::from_str(&raw).map_err(|e| ConfigError::toml_parse(e, path))?;

        let mut config = Self::default();

        if let Some(general) = value.get("general") {
            match general.clone().try_into::<GeneralConfig>() {
                Ok(general) => {
                    info!(
                        volume_interval = general.volume_interval,
                        device = %general.device.display(),
                        "loaded general settings"
                    );
                    config.general = general;
                }
                Err(e) => warn!(error = %e, "skipping malformed [general] section"),
            }
        }

        if let Some(Value::Table(players)) = value.get("player") {
            for (name, section) in players {
                match section.clone().try_into::<PlayerMapping>() {
                    Ok(mapping) => {
                        info!(key = %mapping.key, identity = %mapping.identity, "player mapping");
                        config.players.push(mapping);
                    }
                    Err(e) => {
                        warn!(section = %format!("player.{name}"), error = %e, "skipping malformed section");
                    }
                }
            }
        }

        if let Some(Value::Table(commands)) = value.get("command") {
            for (name, section) in commands {
                match section.clone().try_into::<CommandMapping>() {
                    Ok(mapping) => {
                        info!(key = %mapping.key, command = %name, "command mapping");
                        config.commands.push(mapping);
                    }
                    Err(e) => {
                        warn!(section = %format!("command.{name}"), error = %e, "skipping malformed section");
                    }
                }
            }
        }

        Ok(config)
    }
}
