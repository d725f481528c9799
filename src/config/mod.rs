//! Configuration management for taskgrid.
//!
//! Settings live in a TOML file under the platform config directory.
//! The `TASKGRID_CONFIG` environment variable points at another file.

mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use settings::Settings;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV_VAR: &str = "TASKGRID_CONFIG";

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no config directory.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The config directory could not be created.
    #[error("failed to create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// The settings file could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The settings file could not be written.
    #[error("failed to write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The settings file is not valid TOML for [`Settings`].
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Settings could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A setting has an invalid value.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Path of the settings file.
///
/// `TASKGRID_CONFIG` wins when set and non-empty; otherwise
/// `<config dir>/taskgrid/config.toml`.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("taskgrid").join("config.toml"))
}
