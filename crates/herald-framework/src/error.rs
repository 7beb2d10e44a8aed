//! Error types for the Herald framework.

use herald_core::{ApiError, EventKind};
use thiserror::Error;

/// Errors raised while building a filter from declared options.
///
/// A declared value of an unexpected *type* is not an error: it decodes to
/// an alternative that never matches. Only values that are well-typed but
/// unusable end up here.
#[derive(Debug, Clone, Error)]
pub enum FilterError {
    /// A pattern alternative failed to compile.
    #[error("invalid pattern for '{key}': {source}")]
    InvalidPattern {
        /// The canonical criterion name.
        key: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The event kind name is not one of the known kinds.
    #[error("unknown event kind '{0}'")]
    UnknownKind(String),

    /// Options were not given as a key/value mapping.
    #[error("filter options must be a mapping, got {0}")]
    NotAMapping(String),

    /// The handler body was written for the other event family.
    #[error("a '{kind}' filter cannot drive a handler for {handler} events")]
    FamilyMismatch {
        kind: EventKind,
        handler: &'static str,
    },
}

/// Errors surfaced while running a matched handler.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The post-match reply could not be sent.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for filter construction.
pub type FilterResult<T> = Result<T, FilterError>;

/// Result type for dispatch.
pub type DispatchResult<T> = Result<T, DispatchError>;
