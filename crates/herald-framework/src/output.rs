//! Accumulated handler output and the reply hook that flushes it.
//!
//! One [`Output`] is created per matched handler invocation. The handler
//! body appends lines to it; once the body returns, [`Output::flush`]
//! consumes the buffer and sends it to the event's channel. Consuming the
//! buffer means it is read exactly once, after the body finished.

use std::fmt;

use herald_core::{MessageEvent, Messenger, SentMessage};
use tracing::debug;

use crate::error::DispatchResult;

/// Newline-joined text a handler wants to reply with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    buffer: String,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` followed by a newline.
    pub fn append(&mut self, text: impl AsRef<str>) {
        self.buffer.push_str(text.as_ref());
        self.buffer.push('\n');
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Sends the buffer to the channel `event` came from.
    ///
    /// An empty buffer is sent as well; what that means is up to the
    /// messenger. Send failures are returned unchanged.
    pub async fn flush(
        self,
        event: &MessageEvent,
        messenger: &dyn Messenger,
    ) -> DispatchResult<SentMessage> {
        let sent = messenger.send_message(event.channel(), &self.buffer).await?;
        debug!(
            channel_id = event.channel().id,
            bytes = self.buffer.len(),
            message_id = sent.id,
            "Flushed handler output"
        );
        Ok(sent)
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::DateTime;
    use herald_core::{ApiError, ApiResult, Channel, Message, MessageKind, User};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<(u64, String)>>,
    }

    #[async_trait]
    impl Messenger for Recorder {
        async fn send_message(&self, channel: &Channel, content: &str) -> ApiResult<SentMessage> {
            self.sent.lock().push((channel.id, content.to_string()));
            Ok(SentMessage {
                id: 1,
                channel_id: channel.id,
            })
        }
    }

    struct Offline;

    #[async_trait]
    impl Messenger for Offline {
        async fn send_message(&self, _: &Channel, _: &str) -> ApiResult<SentMessage> {
            Err(ApiError::NotConnected)
        }
    }

    fn event() -> MessageEvent {
        MessageEvent::new(
            MessageKind::Message,
            Message {
                id: 1,
                content: "!hi".into(),
                author: User::new(1, "ann"),
                channel: Channel::new(77, "general"),
                timestamp: DateTime::from_timestamp(0, 0).unwrap(),
            },
            2,
        )
    }

    #[test]
    fn test_append_joins_with_newlines() {
        let mut output = Output::new();
        assert!(output.is_empty());
        output.append("a");
        output.append(String::from("b"));
        assert_eq!(output.as_str(), "a\nb\n");
    }

    #[test]
    fn test_flush_sends_to_event_channel() {
        let recorder = Recorder::default();
        let mut output = Output::new();
        output.append("a");
        output.append("b");

        let sent = tokio_test::block_on(output.flush(&event(), &recorder)).unwrap();
        assert_eq!(sent.channel_id, 77);
        assert_eq!(*recorder.sent.lock(), vec![(77, "a\nb\n".to_string())]);
    }

    #[test]
    fn test_flush_sends_empty_buffer() {
        let recorder = Recorder::default();
        tokio_test::block_on(Output::new().flush(&event(), &recorder)).unwrap();
        assert_eq!(*recorder.sent.lock(), vec![(77, String::new())]);
    }

    #[test]
    fn test_flush_propagates_send_failure() {
        let result = tokio_test::block_on(Output::new().flush(&event(), &Offline));
        assert!(result.is_err());
    }
}
