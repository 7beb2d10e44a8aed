//! Matchers: a filter, a body and the dispatch policy around them.
//!
//! A [`Matcher`] couples one [`Filter`] with one handler body written for
//! the same event family. When an event arrives:
//!
//! 1. the event kind is tested against the matcher's kind,
//! 2. the family filter evaluates the declared criteria,
//! 3. on a match the body runs with a fresh [`Output`],
//! 4. for the rich message family, the output is sent to the event's
//!    channel afterwards. Id-only events have no reply hook.
//!
//! # Tower Service Integration
//!
//! `Matcher` implements `tower::Service<DispatchRequest>`, so middleware
//! can be applied directly:
//!
//! ```rust,ignore
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .concurrency_limit(1)
//!     .service(on_message(MessageFilter::new().starting_with("!"), reply));
//! ```

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use herald_core::{
    BoxedMessenger, Event, MessageEvent, MessageIdEvent, MessageIdKind, MessageKind, Messenger,
};
use tower::Service;
use tracing::{debug, trace};

use crate::error::{DispatchError, DispatchResult, FilterError, FilterResult};
use crate::filter::{Filter, MessageFilter, MessageIdFilter};
use crate::handler::{BoxedHandler, Handler};
use crate::output::Output;

/// Internal data for a Matcher.
///
/// Implements `Clone` to support `Arc::make_mut` for copy-on-write semantics.
#[derive(Clone)]
struct MatcherInner {
    filter: Filter,
    handler: BoxedHandler,
    block: bool,
    name: Option<String>,
}

/// A registered handler together with the criteria that gate it.
///
/// Cloning is cheap; the configuration is shared behind an `Arc` and is
/// immutable once the matcher is handed to a dispatcher.
#[derive(Clone)]
pub struct Matcher {
    inner: Arc<MatcherInner>,
}

impl Matcher {
    /// Creates a matcher for the rich message family.
    pub fn message<H>(kind: MessageKind, filter: MessageFilter, handler: H) -> Self
    where
        H: Handler<MessageEvent>,
    {
        Self::from_parts(Filter::message(kind, filter), BoxedHandler::message(handler))
    }

    /// Creates a matcher for the id-only family.
    pub fn message_id<H>(kind: MessageIdKind, filter: MessageIdFilter, handler: H) -> Self
    where
        H: Handler<MessageIdEvent>,
    {
        Self::from_parts(
            Filter::message_id(kind, filter),
            BoxedHandler::message_id(handler),
        )
    }

    /// Pairs a filter with a type-erased body.
    ///
    /// Fails when the body was written for the other family than the one
    /// the filter's kind belongs to.
    pub fn try_new(filter: Filter, handler: BoxedHandler) -> FilterResult<Self> {
        match (&filter, &handler) {
            (Filter::Message { .. }, BoxedHandler::Message(_))
            | (Filter::MessageId { .. }, BoxedHandler::MessageId(_)) => {
                Ok(Self::from_parts(filter, handler))
            }
            _ => Err(FilterError::FamilyMismatch {
                kind: filter.kind(),
                handler: handler.family(),
            }),
        }
    }

    fn from_parts(filter: Filter, handler: BoxedHandler) -> Self {
        Self {
            inner: Arc::new(MatcherInner {
                filter,
                handler,
                block: false,
                name: None,
            }),
        }
    }

    fn inner_mut(&mut self) -> &mut MatcherInner {
        Arc::make_mut(&mut self.inner)
    }

    /// Sets a name for this matcher (useful for debugging).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner_mut().name = Some(name.into());
        self
    }

    /// Sets whether a match stops later matchers from seeing the event.
    pub fn block(mut self, block: bool) -> Self {
        self.inner_mut().block = block;
        self
    }

    pub fn filter(&self) -> &Filter {
        &self.inner.filter
    }

    pub fn is_blocking(&self) -> bool {
        self.inner.block
    }

    pub fn get_name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    fn label(&self) -> &str {
        self.get_name().unwrap_or("unnamed")
    }

    /// Checks the event kind, then the declared criteria.
    pub fn matches(&self, event: &Event) -> bool {
        self.inner.filter.evaluate(event)
    }

    /// Runs the body if the event matches, then the reply hook.
    ///
    /// Returns `Ok(false)` when the event did not match. A failed reply is
    /// returned as an error after the body has already run.
    pub async fn execute(&self, event: &Event, messenger: &dyn Messenger) -> DispatchResult<bool> {
        if !self.matches(event) {
            trace!(matcher = self.label(), "Matcher check failed, skipping");
            return Ok(false);
        }

        debug!(
            matcher = self.label(),
            kind = %event.kind(),
            "Matcher check passed, executing handler"
        );

        let mut output = Output::new();
        match (&self.inner.handler, event) {
            (BoxedHandler::Message(handler), Event::Message(event)) => {
                handler.call(event, &mut output).await;
                output.flush(event, messenger).await?;
            }
            (BoxedHandler::MessageId(handler), Event::MessageId(event)) => {
                handler.call(event, &mut output).await;
                if !output.is_empty() {
                    debug!(
                        matcher = self.label(),
                        discarded = output.as_str().len(),
                        "Id-only family has no reply hook, discarding handler output"
                    );
                }
            }
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("name", &self.inner.name)
            .field("kind", &self.inner.filter.kind())
            .field("block", &self.inner.block)
            .finish()
    }
}

// ============================================================================
// Tower Service Implementation for Matcher
// ============================================================================

/// One event to run through a matcher, with the messenger replies go to.
#[derive(Clone)]
pub struct DispatchRequest {
    pub event: Arc<Event>,
    pub messenger: BoxedMessenger,
}

impl DispatchRequest {
    pub fn new(event: impl Into<Event>, messenger: BoxedMessenger) -> Self {
        Self {
            event: Arc::new(event.into()),
            messenger,
        }
    }
}

/// The response type for Matcher as a Service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherResponse {
    /// Whether the matcher's check passed and the body ran.
    pub matched: bool,
    /// Whether this matcher is blocking (stops further matchers).
    pub blocking: bool,
}

impl MatcherResponse {
    /// Returns true if matched and blocking.
    pub fn should_stop(&self) -> bool {
        self.matched && self.blocking
    }
}

impl Service<DispatchRequest> for Matcher {
    type Response = MatcherResponse;
    type Error = DispatchError;
    type Future =
        Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: DispatchRequest) -> Self::Future {
        let matcher = self.clone();

        Box::pin(async move {
            let matched = matcher
                .execute(&request.event, request.messenger.as_ref())
                .await?;
            Ok(MatcherResponse {
                matched,
                blocking: matcher.is_blocking(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::DateTime;
    use herald_core::{ApiError, ApiResult, Channel, Message, SentMessage, User};
    use parking_lot::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct RecordingMessenger {
        sent: Mutex<Vec<(u64, String)>>,
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send_message(&self, channel: &Channel, content: &str) -> ApiResult<SentMessage> {
            self.sent.lock().push((channel.id, content.to_string()));
            Ok(SentMessage {
                id: 100,
                channel_id: channel.id,
            })
        }
    }

    struct RejectingMessenger;

    #[async_trait]
    impl Messenger for RejectingMessenger {
        async fn send_message(&self, _: &Channel, _: &str) -> ApiResult<SentMessage> {
            Err(ApiError::Rejected {
                code: 50013,
                message: "missing permissions".into(),
            })
        }
    }

    fn message(kind: MessageKind, content: &str) -> Event {
        MessageEvent::new(
            kind,
            Message {
                id: 1,
                content: content.into(),
                author: User::new(1, "ann"),
                channel: Channel::new(10, "general"),
                timestamp: DateTime::from_timestamp(0, 0).unwrap(),
            },
            2,
        )
        .into()
    }

    fn echo(event: &MessageEvent, out: &mut Output) {
        out.append("a");
        out.append(event.content());
    }

    #[tokio::test]
    async fn test_hook_sends_accumulated_output() {
        let messenger = RecordingMessenger::default();
        let matcher = Matcher::message(MessageKind::Message, MessageFilter::new(), echo);

        let matched = matcher
            .execute(&message(MessageKind::Message, "b"), &messenger)
            .await
            .unwrap();

        assert!(matched);
        assert_eq!(*messenger.sent.lock(), vec![(10, "a\nb\n".to_string())]);
    }

    #[tokio::test]
    async fn test_hook_sends_empty_output() {
        let messenger = RecordingMessenger::default();
        let matcher = Matcher::message(
            MessageKind::Message,
            MessageFilter::new(),
            |_: &MessageEvent, _: &mut Output| {},
        );

        matcher
            .execute(&message(MessageKind::Message, "x"), &messenger)
            .await
            .unwrap();
        assert_eq!(*messenger.sent.lock(), vec![(10, String::new())]);
    }

    #[tokio::test]
    async fn test_no_match_runs_nothing() {
        let messenger = RecordingMessenger::default();
        let matcher = Matcher::message(
            MessageKind::Message,
            MessageFilter::new().starting_with("!"),
            echo,
        );

        let matched = matcher
            .execute(&message(MessageKind::Message, "hello"), &messenger)
            .await
            .unwrap();
        assert!(!matched);
        assert!(messenger.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_specialised_matcher_ignores_general_event() {
        let messenger = RecordingMessenger::default();
        let matcher = Matcher::message(MessageKind::Mention, MessageFilter::new(), echo);

        assert!(!matcher.matches(&message(MessageKind::Message, "x")));
        assert!(matcher.matches(&message(MessageKind::Mention, "x")));
        let matched = matcher
            .execute(&message(MessageKind::Message, "x"), &messenger)
            .await
            .unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn test_id_family_has_no_hook() {
        let messenger = RecordingMessenger::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let body_seen = Arc::clone(&seen);
        let matcher = Matcher::message_id(
            MessageIdKind::MessageDelete,
            MessageIdFilter::new().id(7u64),
            move |event: &MessageIdEvent, out: &mut Output| {
                body_seen.lock().push(event.id());
                out.append("gone");
            },
        );
        let event: Event =
            MessageIdEvent::new(MessageIdKind::MessageDelete, 7, Channel::new(10, "general"))
                .into();

        assert!(matcher.execute(&event, &messenger).await.unwrap());
        assert_eq!(*seen.lock(), vec![7]);
        assert!(messenger.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_propagates() {
        let matcher = Matcher::message(MessageKind::Message, MessageFilter::new(), echo);
        let result = matcher
            .execute(&message(MessageKind::Message, "x"), &RejectingMessenger)
            .await;
        assert!(matches!(
            result,
            Err(DispatchError::Api(ApiError::Rejected { code: 50013, .. }))
        ));
    }

    #[test]
    fn test_try_new_rejects_family_mismatch() {
        let filter = Filter::from(MessageIdFilter::new());
        let handler = BoxedHandler::message(echo);
        assert!(matches!(
            Matcher::try_new(filter, handler),
            Err(FilterError::FamilyMismatch { handler: "message", .. })
        ));

        let ok = Matcher::try_new(Filter::from(MessageFilter::new()), BoxedHandler::message(echo));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_builder_settings_are_copy_on_write() {
        let base = Matcher::message(MessageKind::Message, MessageFilter::new(), echo);
        let named = base.clone().name("echo").block(true);

        assert_eq!(base.get_name(), None);
        assert!(!base.is_blocking());
        assert_eq!(named.get_name(), Some("echo"));
        assert!(named.is_blocking());
    }

    #[tokio::test]
    async fn test_service_response() {
        let messenger = Arc::new(RecordingMessenger::default());
        let matcher =
            Matcher::message(MessageKind::Message, MessageFilter::new(), echo).block(true);

        let request = DispatchRequest::new(
            message(MessageKind::Message, "b"),
            messenger.clone() as BoxedMessenger,
        );
        let response = matcher.oneshot(request).await.unwrap();

        assert!(response.should_stop());
        assert_eq!(messenger.sent.lock().len(), 1);
    }
}
