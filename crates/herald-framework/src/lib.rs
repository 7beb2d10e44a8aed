//! # Herald Framework
//!
//! Matching and dispatch for incoming chat message events.
//!
//! This layer provides:
//! - Criterion combinators and the closed selector types declared values
//!   decode into
//! - Per-family filters ([`MessageFilter`], [`MessageIdFilter`]) and the
//!   kind-aware [`Filter`] over them
//! - Option-mapping decoding with alias resolution
//! - [`Matcher`]s pairing a filter with a handler body, an explicit
//!   [`Output`] sink and the reply hook
//! - A sequential [`Dispatcher`] and builder functions (`on_message`, ...)

pub mod criterion;
pub mod dispatcher;
pub mod error;
pub mod filter;
pub mod handler;
pub mod matcher;
pub mod matcher_builders;
pub mod options;
pub mod output;
pub mod selector;

pub use criterion::{Criterion, matches_all};
pub use dispatcher::{DispatchReport, Dispatcher};
pub use error::{DispatchError, DispatchResult, FilterError, FilterResult};
pub use filter::{Filter, MessageFilter, MessageIdFilter};
pub use handler::{AsyncHandlerFn, BoxFuture, BoxedHandler, Handler, async_handler};
pub use matcher::{DispatchRequest, Matcher, MatcherResponse};
pub use matcher_builders::{
    on_mention, on_message, on_message_delete, on_message_edit, on_message_id,
    on_private_message,
};
pub use options::is_truthy;
pub use output::Output;
pub use selector::{AuthorSelector, ChannelSelector, IdSelector, TextMatch, TimeBound};
