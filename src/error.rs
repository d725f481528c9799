//! Centralized error types for taskgrid.
//!
//! The engine itself only fails at construction ([`GridError`]); storage
//! failures are logged and swallowed inside the persistence bridge. The
//! viewer binary aggregates everything into [`AppError`].

use thiserror::Error;

use crate::config::ConfigError;
use crate::grid::StorageError;

/// Errors raised while building a data grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The table id is empty or whitespace.
    #[error("table id must not be empty")]
    EmptyTableId,

    /// Two columns share an id.
    #[error("duplicate column id '{0}'")]
    DuplicateColumn(String),

    /// A page size outside the allowed options.
    #[error("unsupported page size {0}")]
    InvalidPageSize(usize),
}

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Grid construction errors.
    #[error("{0}")]
    Grid(#[from] GridError),

    /// Preference storage errors.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// The dataset could not be parsed.
    #[error("Data error: {0}")]
    Data(#[from] serde_json::Error),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Grid(e) => match e {
                GridError::EmptyTableId => "A table id is required.".to_string(),
                GridError::DuplicateColumn(id) => {
                    format!("Column '{}' appears more than once.", id)
                }
                GridError::InvalidPageSize(size) => {
                    format!("{} rows per page is not supported.", size)
                }
            },
            AppError::Storage(StorageError::NoDataDir) => {
                "Could not find a data directory for table preferences.".to_string()
            }
            AppError::Storage(_) => {
                "Table preferences storage is unavailable.".to_string()
            }
            AppError::Data(_) => {
                "The data file is not valid JSON. Expected an array or object of rows.".to_string()
            }
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix or remove the configuration file, or point TASKGRID_CONFIG elsewhere.")
            }
            AppError::Grid(GridError::EmptyTableId) => Some("Pass --table-id <name>."),
            AppError::Storage(StorageError::NoDataDir) => {
                Some("Set storage_dir in the configuration file.")
            }
            AppError::Data(_) => Some("Check the file passed with --data."),
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
