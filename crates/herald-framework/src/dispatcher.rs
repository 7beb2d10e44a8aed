//! Event dispatcher for the Herald framework.
//!
//! The [`Dispatcher`] holds matchers in registration order. For one event:
//!
//! 1. Matchers are checked in registration order
//! 2. Each matching matcher runs its body, then its reply hook
//! 3. If a blocking matcher matched, dispatch stops
//! 4. A failed reply aborts dispatch and is returned to the caller
//!
//! ```rust,ignore
//! use herald_framework::{Dispatcher, MessageFilter, on_message};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.add(on_message(MessageFilter::new().starting_with("!ping"), pong).block(true));
//! dispatcher.add(on_message(MessageFilter::new(), log_everything));
//!
//! let report = dispatcher.dispatch(&event, &messenger).await?;
//! ```

use herald_core::{Event, Messenger};
use tracing::{Instrument, Level, debug, span};

use crate::error::DispatchResult;
use crate::matcher::Matcher;

/// Summary of one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Number of matchers whose body ran.
    pub matched: usize,
    /// Whether a blocking matcher cut dispatch short.
    pub blocked: bool,
}

impl DispatchReport {
    pub fn any_matched(&self) -> bool {
        self.matched > 0
    }
}

/// Runs events through registered matchers.
///
/// `Dispatcher` is `Send + Sync`; matchers are immutable once added, so
/// concurrent dispatches of different events are safe.
#[derive(Default, Clone)]
pub struct Dispatcher {
    matchers: Vec<Matcher>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Adds a matcher. Matchers are checked in the order they are added.
    pub fn add(&mut self, matcher: Matcher) {
        self.matchers.push(matcher);
    }

    /// Adds a matcher to this dispatcher (builder pattern).
    pub fn with(mut self, matcher: Matcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn matcher_count(&self) -> usize {
        self.matchers.len()
    }

    pub fn clear(&mut self) {
        self.matchers.clear();
    }

    /// Dispatches `event` to every matching matcher in order.
    pub async fn dispatch(
        &self,
        event: &Event,
        messenger: &dyn Messenger,
    ) -> DispatchResult<DispatchReport> {
        let span = span!(Level::DEBUG, "dispatch", kind = %event.kind());

        async move {
            let mut report = DispatchReport::default();

            for matcher in &self.matchers {
                if !matcher.execute(event, messenger).await? {
                    continue;
                }
                report.matched += 1;

                if matcher.is_blocking() {
                    debug!(
                        matcher = matcher.get_name().unwrap_or("unnamed"),
                        "Blocking matcher matched, stopping dispatch"
                    );
                    report.blocked = true;
                    break;
                }
            }

            debug!(matched = report.matched, "Dispatch finished");
            Ok(report)
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("matcher_count", &self.matchers.len())
            .finish()
    }
}
