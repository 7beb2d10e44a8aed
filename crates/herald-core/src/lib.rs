//! # Herald Core
//!
//! The event value model of the Herald dispatch engine.
//!
//! This crate holds everything a matcher needs to *look at*, and nothing
//! that decides whether it matches:
//!
//! - **Entities**: read-only views of users, channels and messages
//!   ([`User`], [`Channel`], [`Message`]) plus id normalisation
//!   ([`ResolveId`])
//! - **Events**: the two event families ([`MessageEvent`],
//!   [`MessageIdEvent`]) wrapped in [`Event`], and their kind hierarchy
//!   ([`EventKind`])
//! - **Collaborators**: the outbound [`Messenger`] and the inbound
//!   [`ChannelLookup`]
//!
//! Matching and dispatch live in `herald-framework`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use herald_core::{Channel, MessageIdEvent, MessageIdKind};
//! use std::collections::HashMap;
//!
//! let channels = HashMap::from([(10, Channel::new(10, "general"))]);
//! let payload = serde_json::json!({ "id": "42", "channel_id": "10" });
//! let event = MessageIdEvent::from_payload(MessageIdKind::MessageDelete, &payload, &channels)?;
//! assert_eq!(event.id(), 42);
//! ```

pub mod error;
pub mod event;
pub mod messenger;
pub mod model;

pub use error::{ApiError, ApiResult, EventError, EventResult};
pub use event::{Event, EventKind, MessageEvent, MessageIdEvent, MessageIdKind, MessageKind};
pub use messenger::{BoxedMessenger, ChannelLookup, Messenger};
pub use model::{Channel, Message, ResolveId, SentMessage, User};
