//! Error types for lc-core

use thiserror::Error;

/// Core error type for labcat
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Table or column name that cannot be spliced into SQL
    #[error("[E004] Invalid identifier '{name}': must be non-empty and contain only ASCII letters, digits, and underscores")]
    InvalidIdentifier { name: String },

    /// E005: Metadata type tag that cannot be stored
    #[error("[E005] Invalid metadata type tag: {message}")]
    InvalidTypeTag { message: String },

    /// E006: File probe could not describe a measurement file
    #[error("[E006] Cannot probe {path}: {message}")]
    Probe { path: String, message: String },

    /// E007: IO error with file path context
    #[error("[E007] IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// E008: Caller-supplied metadata entry is incomplete
    #[error("[E008] Invalid metadata entry: {message}")]
    InvalidMetadata { message: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}
