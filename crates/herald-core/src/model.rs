//! Read-only entity views consulted by matchers.
//!
//! These are the minimal shapes the engine needs from the chat service's
//! object model. Equality on [`User`] and [`Channel`] is identity
//! equality: two values are the same entity when their ids agree, no
//! matter how stale the other fields are.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything that can be reduced to a numeric snowflake id.
///
/// Used to normalise both sides of an id comparison, so a raw integer and
/// an entity carrying the same id compare equal.
pub trait ResolveId {
    /// Returns the numeric id this value stands for.
    fn resolve_id(&self) -> u64;
}

impl ResolveId for u64 {
    fn resolve_id(&self) -> u64 {
        *self
    }
}

impl<T: ResolveId + ?Sized> ResolveId for &T {
    fn resolve_id(&self) -> u64 {
        (**self).resolve_id()
    }
}

/// A chat account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Set for automated accounts.
    #[serde(default)]
    pub bot: bool,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bot: false,
        }
    }

    /// Marks this user as an automated account.
    pub fn as_bot(mut self) -> Self {
        self.bot = true;
        self
    }

    pub fn is_bot(&self) -> bool {
        self.bot
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl ResolveId for User {
    fn resolve_id(&self) -> u64 {
        self.id
    }
}

/// A text channel, either on a server or a private conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Channel {
    pub id: u64,
    /// Channel name without the leading `#`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub private: bool,
    /// Owning server, absent for private channels.
    #[serde(default)]
    pub server_id: Option<u64>,
}

impl Channel {
    /// Creates a server text channel.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            private: false,
            server_id: None,
        }
    }

    /// Creates a private (direct message) channel.
    pub fn private(id: u64, name: impl Into<String>) -> Self {
        Self {
            private: true,
            ..Self::new(id, name)
        }
    }

    pub fn on_server(mut self, server_id: u64) -> Self {
        self.server_id = Some(server_id);
        self
    }

    pub fn is_private(&self) -> bool {
        self.private
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Channel {}

impl ResolveId for Channel {
    fn resolve_id(&self) -> u64 {
        self.id
    }
}

/// A message as delivered by the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub content: String,
    pub author: User,
    pub channel: Channel,
    pub timestamp: DateTime<Utc>,
}

impl ResolveId for Message {
    fn resolve_id(&self) -> u64 {
        self.id
    }
}

/// The result of a successful send through a [`Messenger`](crate::Messenger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub id: u64,
    pub channel_id: u64,
}

impl ResolveId for SentMessage {
    fn resolve_id(&self) -> u64 {
        self.id
    }
}
