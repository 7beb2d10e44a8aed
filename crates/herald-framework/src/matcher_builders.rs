//! Matcher builder functions for each event kind.
//!
//! # Example
//!
//! ```rust,ignore
//! use herald_framework::{on_mention, on_message_delete, MessageFilter, MessageIdFilter};
//!
//! let dispatcher = Dispatcher::new()
//!     .with(on_mention(MessageFilter::new(), greet).block(true))
//!     .with(on_message_delete(MessageIdFilter::new().in_channel("#log"), audit));
//! ```

use herald_core::{MessageEvent, MessageIdEvent, MessageIdKind, MessageKind};

use crate::filter::{MessageFilter, MessageIdFilter};
use crate::handler::Handler;
use crate::matcher::Matcher;

/// Creates a matcher for any message, mentions and private messages
/// included.
pub fn on_message<H: Handler<MessageEvent>>(filter: MessageFilter, handler: H) -> Matcher {
    Matcher::message(MessageKind::Message, filter, handler).name("message")
}

/// Creates a matcher for messages that mention the bot.
pub fn on_mention<H: Handler<MessageEvent>>(filter: MessageFilter, handler: H) -> Matcher {
    Matcher::message(MessageKind::Mention, filter, handler).name("mention")
}

/// Creates a matcher for messages sent in a private channel.
pub fn on_private_message<H: Handler<MessageEvent>>(filter: MessageFilter, handler: H) -> Matcher {
    Matcher::message(MessageKind::PrivateMessage, filter, handler).name("private_message")
}

/// Creates a matcher for any id-only notification, edits and deletions
/// included.
pub fn on_message_id<H: Handler<MessageIdEvent>>(filter: MessageIdFilter, handler: H) -> Matcher {
    Matcher::message_id(MessageIdKind::MessageId, filter, handler).name("message_id")
}

pub fn on_message_edit<H: Handler<MessageIdEvent>>(filter: MessageIdFilter, handler: H) -> Matcher {
    Matcher::message_id(MessageIdKind::MessageEdit, filter, handler).name("message_edit")
}

pub fn on_message_delete<H: Handler<MessageIdEvent>>(
    filter: MessageIdFilter,
    handler: H,
) -> Matcher {
    Matcher::message_id(MessageIdKind::MessageDelete, filter, handler).name("message_delete")
}
