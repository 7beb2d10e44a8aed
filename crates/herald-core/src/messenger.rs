//! Collaborator traits the engine talks to.
//!
//! Herald does not own a connection. Replies go out through a
//! [`Messenger`] and channel ids on inbound payloads are resolved through
//! a [`ChannelLookup`], both supplied by the host application.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::model::{Channel, SentMessage};

/// Outbound side of the chat service.
///
/// Implementations decide what an empty `content` means; the engine
/// forwards whatever a handler accumulated without inspecting it.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends `content` to `channel`.
    async fn send_message(&self, channel: &Channel, content: &str) -> ApiResult<SentMessage>;
}

/// A shared messenger trait object.
pub type BoxedMessenger = Arc<dyn Messenger>;

/// Resolves channel ids seen on inbound payloads.
pub trait ChannelLookup: Send + Sync {
    /// Returns the channel with the given id, if known.
    fn channel(&self, id: u64) -> Option<Channel>;
}

impl ChannelLookup for HashMap<u64, Channel> {
    fn channel(&self, id: u64) -> Option<Channel> {
        self.get(&id).cloned()
    }
}

impl<F> ChannelLookup for F
where
    F: Fn(u64) -> Option<Channel> + Send + Sync,
{
    fn channel(&self, id: u64) -> Option<Channel> {
        self(id)
    }
}
