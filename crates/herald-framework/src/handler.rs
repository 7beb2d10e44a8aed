//! Handler bodies run by a matcher once its filter accepts an event.
//!
//! A body receives the typed event of its family and the [`Output`] sink
//! of the current dispatch. Plain closures are handlers:
//!
//! ```rust,ignore
//! let body = |event: &MessageEvent, out: &mut Output| {
//!     out.append(format!("hi {}", event.author().name));
//! };
//! ```
//!
//! Bodies that need to await wrap a future-returning function with
//! [`async_handler`]:
//!
//! ```rust,ignore
//! let body = async_handler(|event: &MessageEvent, out: &mut Output| {
//!     Box::pin(async move {
//!         out.append(event.content());
//!     })
//! });
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use herald_core::{MessageEvent, MessageIdEvent};

use crate::output::Output;

/// A type alias for a boxed, pinned future that is `Send`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A handler body for events of type `E`.
pub trait Handler<E>: Send + Sync + 'static {
    fn call<'a>(&'a self, event: &'a E, output: &'a mut Output) -> BoxFuture<'a, ()>;
}

impl<E, F> Handler<E> for F
where
    E: 'static,
    F: Fn(&E, &mut Output) + Send + Sync + 'static,
{
    fn call<'a>(&'a self, event: &'a E, output: &'a mut Output) -> BoxFuture<'a, ()> {
        (self)(event, output);
        Box::pin(std::future::ready(()))
    }
}

/// Wrapper turning a future-returning function into a [`Handler`].
pub struct AsyncHandlerFn<F> {
    f: F,
}

impl<E, F> Handler<E> for AsyncHandlerFn<F>
where
    E: Sync + 'static,
    F: for<'a> Fn(&'a E, &'a mut Output) -> BoxFuture<'a, ()> + Send + Sync + 'static,
{
    fn call<'a>(&'a self, event: &'a E, output: &'a mut Output) -> BoxFuture<'a, ()> {
        (self.f)(event, output)
    }
}

/// Wraps an asynchronous body.
pub fn async_handler<E, F>(f: F) -> AsyncHandlerFn<F>
where
    E: Sync + 'static,
    F: for<'a> Fn(&'a E, &'a mut Output) -> BoxFuture<'a, ()> + Send + Sync + 'static,
{
    AsyncHandlerFn { f }
}

/// A type-erased body, tagged with the event family it was written for.
#[derive(Clone)]
pub enum BoxedHandler {
    /// Text appended to the [`Output`] is sent to the event channel after
    /// the body returns.
    Message(Arc<dyn Handler<MessageEvent>>),
    /// Id-only events have no reply hook. Text appended to the [`Output`]
    /// is dropped after the body returns, with a `debug` log.
    MessageId(Arc<dyn Handler<MessageIdEvent>>),
}

impl BoxedHandler {
    pub fn message<H: Handler<MessageEvent>>(handler: H) -> Self {
        Self::Message(Arc::new(handler))
    }

    pub fn message_id<H: Handler<MessageIdEvent>>(handler: H) -> Self {
        Self::MessageId(Arc::new(handler))
    }

    /// Human readable family name, used in logs and errors.
    pub fn family(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::MessageId(_) => "message id",
        }
    }
}

impl std::fmt::Debug for BoxedHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BoxedHandler").field(&self.family()).finish()
    }
}
