//! Configuration error types.

use std::path::PathBuf;

use herald_framework::FilterError;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found at the specified path.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The sources could not be merged or extracted into the schema.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {message}")]
    ValidationError { message: String },

    /// A named filter preset does not decode into a filter.
    #[error("Invalid filter preset '{name}': {source}")]
    InvalidFilter {
        name: String,
        #[source]
        source: FilterError,
    },

    /// No filter preset with that name is configured.
    #[error("Unknown filter preset: {0}")]
    UnknownFilter(String),
}

impl ConfigError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn invalid_filter(name: impl Into<String>, source: FilterError) -> Self {
        Self::InvalidFilter {
            name: name.into(),
            source,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::ParseError(e.to_string())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
