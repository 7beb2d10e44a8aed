//! Runtime error types.

use thiserror::Error;
use tracing_appender::rolling::InitError;
use tracing_subscriber::util::TryInitError;

/// Errors raised while installing the global subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// A global subscriber was already installed.
    #[error("Failed to install subscriber: {0}")]
    Init(#[from] TryInitError),

    /// The rolling log file could not be created.
    #[error("Failed to open log file: {0}")]
    Appender(#[from] InitError),
}

/// Result type for logging setup.
pub type LoggingResult<T> = Result<T, LoggingError>;
