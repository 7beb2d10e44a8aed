//! # Herald
//!
//! Declarative matching and dispatch of chat message events.
//!
//! ## Overview
//!
//! Handlers are registered together with the criteria an event must meet
//! (prefix, channel, author, time window, ...). When an event arrives,
//! every matcher whose kind and criteria accept it runs its body; for
//! message events the text the body accumulated is then sent back to the
//! channel the message came from.
//!
//! ```text
//! ┌───────────┐     ┌────────────┐     ┌──────────────────────────────┐
//! │ transport │────▶│ Dispatcher │────▶│ Matcher: kind test, criteria │──▶ body ──▶ reply hook
//! │ (yours)   │     │            │────▶│ Matcher: ...                 │
//! └───────────┘     └────────────┘     └──────────────────────────────┘
//! ```
//!
//! - **Core**: event and entity types, the `Messenger` reply capability
//! - **Framework**: criteria, filters, matchers and the dispatcher
//! - **Runtime**: configuration with named filter presets, logging setup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! fn pong(event: &MessageEvent, out: &mut Output) {
//!     out.append(format!("pong, {}", event.author().name));
//! }
//!
//! let dispatcher = Dispatcher::new()
//!     .with(on_message(MessageFilter::new().starting_with("!ping"), pong).block(true));
//!
//! dispatcher.dispatch(&event, &messenger).await?;
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use herald_core as core;
pub use herald_framework as framework;
pub use herald_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    // Events and entities
    pub use herald_core::{
        ApiError, ApiResult, BoxedMessenger, Channel, ChannelLookup, Event, EventError, EventKind,
        Message, MessageEvent, MessageIdEvent, MessageIdKind, MessageKind, Messenger, ResolveId,
        SentMessage, User,
    };

    // Matching and dispatch
    pub use herald_framework::{
        AuthorSelector, BoxedHandler, ChannelSelector, Criterion, DispatchError, DispatchReport,
        DispatchRequest, Dispatcher, Filter, FilterError, Handler, Matcher, MatcherResponse,
        MessageFilter, MessageIdFilter, Output, TextMatch, TimeBound, async_handler, on_mention,
        on_message, on_message_delete, on_message_edit, on_message_id, on_private_message,
    };

    // Configuration and logging
    pub use herald_runtime::{
        ConfigLoader, HeraldConfig, LoggingBuilder, SpanEvents, init_from_config,
    };

    // Logging macros
    pub use herald_runtime::prelude::*;
}
