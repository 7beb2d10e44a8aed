//! Per-family filters and the kind test that routes between them.
//!
//! A [`Filter`] pairs the kind a matcher is declared for with the field
//! rules of that kind's family. Evaluation first checks kind
//! compatibility and only then consults the fields:
//!
//! ```text
//! Filter::evaluate(event)
//!   ├─ kind.accepts(event.kind())?   no  → false
//!   └─ family filter .matches(event)     → all criteria ANDed
//! ```

pub mod message;
pub mod message_id;

pub use message::MessageFilter;
pub use message_id::MessageIdFilter;

use herald_core::{Event, EventKind, MessageIdKind, MessageKind};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{FilterError, FilterResult};

/// A kind restriction together with its family's criteria.
#[derive(Debug, Clone)]
pub enum Filter {
    Message {
        kind: MessageKind,
        filter: MessageFilter,
    },
    MessageId {
        kind: MessageIdKind,
        filter: MessageIdFilter,
    },
}

impl Filter {
    pub fn message(kind: MessageKind, filter: MessageFilter) -> Self {
        Self::Message { kind, filter }
    }

    pub fn message_id(kind: MessageIdKind, filter: MessageIdFilter) -> Self {
        Self::MessageId { kind, filter }
    }

    /// Decodes the criteria for `kind` from an option mapping.
    pub fn from_options(kind: EventKind, options: &Map<String, Value>) -> FilterResult<Self> {
        Ok(match kind {
            EventKind::Message(kind) => Self::message(kind, MessageFilter::from_options(options)?),
            EventKind::MessageId(kind) => {
                Self::message_id(kind, MessageIdFilter::from_options(options)?)
            }
        })
    }

    /// Like [`from_options`](Self::from_options), for an arbitrary JSON value.
    pub fn from_value(kind: EventKind, options: &Value) -> FilterResult<Self> {
        match options {
            Value::Object(map) => Self::from_options(kind, map),
            Value::Null => Self::from_options(kind, &Map::new()),
            other => Err(FilterError::NotAMapping(other.to_string())),
        }
    }

    /// Like [`from_value`](Self::from_value), with the kind given by name
    /// (`"mention"`, `"message_edit"`, ...).
    pub fn from_named(kind: &str, options: &Value) -> FilterResult<Self> {
        let kind = kind
            .parse::<EventKind>()
            .map_err(|_| FilterError::UnknownKind(kind.to_string()))?;
        Self::from_value(kind, options)
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Message { kind, .. } => (*kind).into(),
            Self::MessageId { kind, .. } => (*kind).into(),
        }
    }

    /// Returns whether `event` is of a compatible kind and satisfies every
    /// declared criterion.
    pub fn evaluate(&self, event: &Event) -> bool {
        if !self.kind().accepts(event.kind()) {
            trace!(
                declared = %self.kind(),
                observed = %event.kind(),
                "Event kind not accepted"
            );
            return false;
        }

        match (self, event) {
            (Self::Message { filter, .. }, Event::Message(event)) => filter.matches(event),
            (Self::MessageId { filter, .. }, Event::MessageId(event)) => filter.matches(event),
            _ => false,
        }
    }
}

impl From<MessageFilter> for Filter {
    fn from(filter: MessageFilter) -> Self {
        Self::message(MessageKind::Message, filter)
    }
}

impl From<MessageIdFilter> for Filter {
    fn from(filter: MessageIdFilter) -> Self {
        Self::message_id(MessageIdKind::MessageId, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use herald_core::{Channel, Message, MessageEvent, MessageIdEvent, User};
    use serde_json::json;

    fn message(kind: MessageKind) -> Event {
        MessageEvent::new(
            kind,
            Message {
                id: 1,
                content: "ping".into(),
                author: User::new(1, "ann"),
                channel: Channel::new(2, "general"),
                timestamp: DateTime::from_timestamp(0, 0).unwrap(),
            },
            3,
        )
        .into()
    }

    fn edit() -> Event {
        MessageIdEvent::new(MessageIdKind::MessageEdit, 9, Channel::new(2, "general")).into()
    }

    #[test]
    fn test_vacuous_truth_for_compatible_kinds() {
        assert!(Filter::from(MessageFilter::new()).evaluate(&message(MessageKind::Message)));
        assert!(Filter::from(MessageIdFilter::new()).evaluate(&edit()));
    }

    #[test]
    fn test_specialised_kind_rejects_general_event() {
        let mention = Filter::message(MessageKind::Mention, MessageFilter::new());
        assert!(!mention.evaluate(&message(MessageKind::Message)));
        assert!(mention.evaluate(&message(MessageKind::Mention)));
        assert!(!mention.evaluate(&message(MessageKind::PrivateMessage)));
    }

    #[test]
    fn test_base_kind_accepts_specialisations() {
        let any = Filter::from(MessageFilter::new().starting_with("pi"));
        assert!(any.evaluate(&message(MessageKind::Mention)));
        assert!(any.evaluate(&message(MessageKind::PrivateMessage)));
    }

    #[test]
    fn test_families_do_not_cross() {
        assert!(!Filter::from(MessageFilter::new()).evaluate(&edit()));
        assert!(!Filter::from(MessageIdFilter::new()).evaluate(&message(MessageKind::Message)));
        let delete = Filter::message_id(MessageIdKind::MessageDelete, MessageIdFilter::new());
        assert!(!delete.evaluate(&edit()));
    }

    #[test]
    fn test_from_value() {
        let filter = Filter::from_value(
            "mention".parse().unwrap(),
            &json!({ "containing": "in" }),
        )
        .unwrap();
        assert_eq!(filter.kind(), EventKind::Message(MessageKind::Mention));
        assert!(filter.evaluate(&message(MessageKind::Mention)));

        assert!(matches!(
            Filter::from_value(EventKind::Message(MessageKind::Message), &json!([1])),
            Err(FilterError::NotAMapping(_))
        ));
    }

    #[test]
    fn test_from_named() {
        let filter = Filter::from_named("message-delete", &json!({ "id": "9" })).unwrap();
        assert_eq!(filter.kind(), EventKind::MessageId(MessageIdKind::MessageDelete));
        assert!(Filter::from_named("message", &Value::Null).is_ok());
        assert!(matches!(
            Filter::from_named("reaction", &Value::Null),
            Err(FilterError::UnknownKind(name)) if name == "reaction"
        ));
    }
}
