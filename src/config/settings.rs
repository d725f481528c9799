//! Application settings configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{config_path, ConfigError, Result};
use crate::grid::{is_valid_page_size, DEFAULT_ITEMS_PER_PAGE, DEFAULT_NAMESPACE, PAGE_SIZE_OPTIONS};

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix of persisted table preference keys.
    pub storage_namespace: String,
    /// Directory for table preferences. Defaults to the platform data dir.
    pub storage_dir: Option<PathBuf>,
    /// Rows per page for tables without a saved size.
    pub default_items_per_page: usize,
    /// Whether tables show the checkbox column.
    pub selectable: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_namespace: DEFAULT_NAMESPACE.to_string(),
            storage_dir: None,
            default_items_per_page: DEFAULT_ITEMS_PER_PAGE,
            selectable: true,
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// A missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load settings from `path`. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns `ReadError` when the file exists but cannot be read,
    /// `ParseError` for malformed TOML and `ValidationError` for bad values.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Save settings to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(ConfigError::WriteError)?;
        debug!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Validate these settings.
    pub fn validate(&self) -> Result<()> {
        if self.storage_namespace.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage_namespace cannot be empty".to_string(),
            ));
        }
        if !is_valid_page_size(self.default_items_per_page) {
            return Err(ConfigError::ValidationError(format!(
                "default_items_per_page must be one of {:?}, got {}",
                PAGE_SIZE_OPTIONS, self.default_items_per_page
            )));
        }
        Ok(())
    }
}
