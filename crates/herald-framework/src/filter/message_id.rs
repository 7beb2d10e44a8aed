//! Field rules for the id-only family (edit and delete notifications).

use herald_core::{MessageIdEvent, ResolveId};
use serde_json::{Map, Value};
use tracing::trace;

use crate::criterion::Criterion;
use crate::error::{FilterError, FilterResult};
use crate::options::Options;
use crate::selector::{ChannelSelector, IdSelector};

/// Declared criteria for events that only carry a message id and channel.
#[derive(Debug, Clone, Default)]
pub struct MessageIdFilter {
    pub id: Criterion<IdSelector>,
    pub in_channel: Criterion<ChannelSelector>,
}

impl MessageIdFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a filter from an option mapping. Recognised keys: `id`, `in`.
    pub fn from_options(map: &Map<String, Value>) -> FilterResult<Self> {
        let mut options = Options::new(map);
        let filter = Self {
            id: options.id("id")?,
            in_channel: options.channel("in")?,
        };
        options.finish();
        Ok(filter)
    }

    /// Adds an id alternative. Raw ids and entities exposing one are
    /// interchangeable.
    pub fn id(mut self, id: impl ResolveId) -> Self {
        self.id = self.id.or(IdSelector::of(id));
        self
    }

    pub fn in_channel(mut self, channel: impl Into<ChannelSelector>) -> Self {
        self.in_channel = self.in_channel.or(channel.into());
        self
    }

    pub fn matches(&self, event: &MessageIdEvent) -> bool {
        let id_ok = self.id.matches_all(event, |a, e| a.selects(e));
        let channel_ok = self
            .in_channel
            .matches_all(event.channel(), |a, e| a.selects(e));

        if !id_ok {
            trace!(criterion = "id", "Message id criterion not satisfied");
        } else if !channel_ok {
            trace!(criterion = "in", "Message id criterion not satisfied");
        }
        id_ok && channel_ok
    }
}

impl TryFrom<&Map<String, Value>> for MessageIdFilter {
    type Error = FilterError;

    fn try_from(map: &Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_options(map)
    }
}
