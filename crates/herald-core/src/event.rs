//! Event families and their specialisations.
//!
//! Herald knows two event shapes:
//!
//! ```text
//! Event
//! ├── Message(MessageEvent)      content, author, channel, timestamp
//! │   ├── kind = Mention
//! │   └── kind = PrivateMessage
//! └── MessageId(MessageIdEvent)  id, channel
//!     ├── kind = MessageEdit
//!     └── kind = MessageDelete
//! ```
//!
//! Specialisations carry no extra fields. They only exist so a matcher can
//! restrict itself to a sub-kind; a base kind accepts all of its
//! specialisations, a specialised kind accepts only itself.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiResult, EventError, EventResult};
use crate::messenger::{ChannelLookup, Messenger};
use crate::model::{Channel, Message, ResolveId, SentMessage, User};

// ============================================================================
// Event Kinds
// ============================================================================

/// Kinds within the rich message family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Any message sent to a channel.
    #[default]
    Message,
    /// A message that mentions the bot.
    Mention,
    /// A message received in a private channel.
    PrivateMessage,
}

impl MessageKind {
    /// Returns whether a matcher declared for `self` may see an event of `observed` kind.
    pub fn accepts(self, observed: MessageKind) -> bool {
        self == MessageKind::Message || self == observed
    }
}

/// Kinds within the id-only family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageIdKind {
    /// Any notification that only carries a message id.
    #[default]
    MessageId,
    /// A message was edited.
    MessageEdit,
    /// A message was deleted.
    MessageDelete,
}

impl MessageIdKind {
    /// Returns whether a matcher declared for `self` may see an event of `observed` kind.
    pub fn accepts(self, observed: MessageIdKind) -> bool {
        self == MessageIdKind::MessageId || self == observed
    }
}

/// Flat classification over both families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventKind {
    Message(MessageKind),
    MessageId(MessageIdKind),
}

impl EventKind {
    /// Returns the snake_case name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message(MessageKind::Message) => "message",
            Self::Message(MessageKind::Mention) => "mention",
            Self::Message(MessageKind::PrivateMessage) => "private_message",
            Self::MessageId(MessageIdKind::MessageId) => "message_id",
            Self::MessageId(MessageIdKind::MessageEdit) => "message_edit",
            Self::MessageId(MessageIdKind::MessageDelete) => "message_delete",
        }
    }

    /// Returns whether a matcher declared for `self` may see an event of `observed` kind.
    ///
    /// Kinds from different families never accept each other.
    pub fn accepts(self, observed: EventKind) -> bool {
        match (self, observed) {
            (Self::Message(declared), Self::Message(observed)) => declared.accepts(observed),
            (Self::MessageId(declared), Self::MessageId(observed)) => declared.accepts(observed),
            _ => false,
        }
    }
}

impl From<MessageKind> for EventKind {
    fn from(kind: MessageKind) -> Self {
        Self::Message(kind)
    }
}

impl From<MessageIdKind> for EventKind {
    fn from(kind: MessageIdKind) -> Self {
        Self::MessageId(kind)
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().replace('-', "_").as_str() {
            "message" => MessageKind::Message.into(),
            "mention" => MessageKind::Mention.into(),
            "private_message" | "pm" => MessageKind::PrivateMessage.into(),
            "message_id" => MessageIdKind::MessageId.into(),
            "message_edit" | "edit" => MessageIdKind::MessageEdit.into(),
            "message_delete" | "delete" => MessageIdKind::MessageDelete.into(),
            other => return Err(other.to_string()),
        })
    }
}

impl TryFrom<String> for EventKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .parse()
            .map_err(|kind| format!("unknown event kind '{kind}'"))
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Rich Message Event
// ============================================================================

/// A text message sent to a channel.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    kind: MessageKind,
    message: Message,
    /// Id of the bot account that received the message.
    bot_user_id: u64,
}

impl MessageEvent {
    /// Wraps a message delivered by the transport.
    pub fn new(kind: MessageKind, message: Message, bot_user_id: u64) -> Self {
        Self {
            kind,
            message,
            bot_user_id,
        }
    }

    /// Decodes a message payload as produced by the transport.
    pub fn from_payload(kind: MessageKind, payload: &Value, bot_user_id: u64) -> EventResult<Self> {
        let message = Message::deserialize(payload)?;
        Ok(Self::new(kind, message, bot_user_id))
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn content(&self) -> &str {
        &self.message.content
    }

    /// Alias for [`content`](Self::content).
    pub fn text(&self) -> &str {
        self.content()
    }

    pub fn author(&self) -> &User {
        &self.message.author
    }

    /// Alias for [`author`](Self::author).
    pub fn user(&self) -> &User {
        self.author()
    }

    pub fn channel(&self) -> &Channel {
        &self.message.channel
    }

    pub fn server_id(&self) -> Option<u64> {
        self.message.channel.server_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.message.timestamp
    }

    /// Returns `true` if the bot account itself wrote this message.
    pub fn from_bot(&self) -> bool {
        self.message.author.id == self.bot_user_id
    }

    /// Sends a message to this event's channel right away, bypassing the
    /// accumulated output.
    pub async fn send_message(
        &self,
        messenger: &dyn Messenger,
        content: &str,
    ) -> ApiResult<SentMessage> {
        messenger.send_message(self.channel(), content).await
    }

    /// Alias for [`send_message`](Self::send_message).
    pub async fn respond(&self, messenger: &dyn Messenger, content: &str) -> ApiResult<SentMessage> {
        self.send_message(messenger, content).await
    }
}

// ============================================================================
// Id-Only Event
// ============================================================================

/// A notification about a message for which only the id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageIdEvent {
    kind: MessageIdKind,
    id: u64,
    channel: Channel,
}

impl MessageIdEvent {
    pub fn new(kind: MessageIdKind, id: u64, channel: Channel) -> Self {
        Self { kind, id, channel }
    }

    /// Builds the event from a raw payload carrying `id` and `channel_id`.
    ///
    /// Both fields are decimal strings on the wire; plain JSON integers are
    /// accepted too. The channel is resolved through `lookup`.
    pub fn from_payload(
        kind: MessageIdKind,
        payload: &Value,
        lookup: &dyn ChannelLookup,
    ) -> EventResult<Self> {
        let id = parse_id(payload, "id")?;
        let channel_id = parse_id(payload, "channel_id")?;
        let channel = lookup
            .channel(channel_id)
            .ok_or(EventError::ChannelNotFound(channel_id))?;
        Ok(Self::new(kind, id, channel))
    }

    pub fn kind(&self) -> MessageIdKind {
        self.kind
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }
}

impl ResolveId for MessageIdEvent {
    fn resolve_id(&self) -> u64 {
        self.id
    }
}

fn parse_id(payload: &Value, field: &'static str) -> EventResult<u64> {
    let raw = match payload.get(field) {
        None | Some(Value::Null) => return Err(EventError::MissingField(field)),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    raw.trim()
        .parse::<u64>()
        .map_err(|source| EventError::InvalidId {
            field,
            value: raw.clone(),
            source,
        })
}

// ============================================================================
// Event
// ============================================================================

/// An incoming event of either family.
#[derive(Debug, Clone)]
pub enum Event {
    Message(MessageEvent),
    MessageId(MessageIdEvent),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Message(event) => event.kind().into(),
            Self::MessageId(event) => event.kind().into(),
        }
    }

    /// The channel the event happened in. Both families carry one.
    pub fn channel(&self) -> &Channel {
        match self {
            Self::Message(event) => event.channel(),
            Self::MessageId(event) => event.channel(),
        }
    }

    pub fn as_message(&self) -> Option<&MessageEvent> {
        match self {
            Self::Message(event) => Some(event),
            Self::MessageId(_) => None,
        }
    }

    pub fn as_message_id(&self) -> Option<&MessageIdEvent> {
        match self {
            Self::MessageId(event) => Some(event),
            Self::Message(_) => None,
        }
    }
}

impl From<MessageEvent> for Event {
    fn from(event: MessageEvent) -> Self {
        Self::Message(event)
    }
}

impl From<MessageIdEvent> for Event {
    fn from(event: MessageIdEvent) -> Self {
        Self::MessageId(event)
    }
}
