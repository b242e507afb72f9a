use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Error types for configuration loading.
///
/// Any of these is fatal to startup; steady-state operation never touches the
/// configuration again.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("cannot read config file '{path}': {source}")]
    Io {
        /// Path of the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParse {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Neither `XDG_CONFIG_HOME` nor `HOME` is set
    #[error("neither XDG_CONFIG_HOME nor HOME environment variable found")]
    NoHome,
}

impl ConfigError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: &Path) -> Self {
        let clean_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        ConfigError::TomlParse {
            location: clean_path.to_string_lossy().to_string(),
            details: error.to_string(),
        }
    }
}
