//! Unified error types for the Herald core.
//!
//! Matching itself is infallible; errors only arise while turning raw
//! payloads into events and while talking to the messaging collaborator.
//! Filter and dispatch errors live in `herald-framework`.

use std::num::ParseIntError;

use thiserror::Error;

// =============================================================================
// Event Errors
// =============================================================================

/// Errors that can occur while building an event from a raw payload.
#[derive(Debug, Clone, Error)]
pub enum EventError {
    /// A required field is absent from the payload.
    #[error("missing field '{0}' in event payload")]
    MissingField(&'static str),

    /// An id field is present but is not a decimal integer.
    #[error("invalid id in field '{field}': {value:?}")]
    InvalidId {
        /// The payload field that held the id.
        field: &'static str,
        /// The raw value found in the payload.
        value: String,
        /// Why the value failed to parse.
        #[source]
        source: ParseIntError,
    },

    /// The channel lookup did not know the referenced channel.
    #[error("channel {0} not found")]
    ChannelNotFound(u64),

    /// The payload could not be deserialized.
    #[error("failed to parse event payload: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

// =============================================================================
// API Errors
// =============================================================================

/// Errors reported by the messaging collaborator.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The client is not connected.
    #[error("messenger is not connected")]
    NotConnected,
    /// The call timed out.
    #[error("API call timed out")]
    Timeout,
    /// The remote service rejected the request.
    #[error("API error ({code}): {message}")]
    Rejected { code: i64, message: String },
    /// Sending the message failed.
    #[error("failed to send message: {0}")]
    SendFailed(String),
    /// Other error.
    #[error("{0}")]
    Other(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for event construction.
pub type EventResult<T> = Result<T, EventError>;

/// Result type for messenger calls.
pub type ApiResult<T> = Result<T, ApiError>;
