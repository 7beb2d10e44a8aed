//! Field rules for the rich message family.

use herald_core::{Channel, MessageEvent, User};
use serde_json::{Map, Value};
use tracing::trace;

use crate::criterion::Criterion;
use crate::error::{FilterError, FilterResult};
use crate::options::Options;
use crate::selector::{
    AuthorSelector, ChannelSelector, TextMatch, TimeBound, same_truthiness,
};

/// Declared criteria for message, mention and private-message events.
///
/// All set criteria must hold; unset ones are vacuously true. Builder
/// methods may be called repeatedly to add alternatives to one criterion:
///
/// ```rust,ignore
/// let filter = MessageFilter::new()
///     .starting_with("!ping")
///     .starting_with("!pong")   // either prefix
///     .in_channel("#general");  // and in #general
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub starting_with: Criterion<TextMatch>,
    pub ending_with: Criterion<TextMatch>,
    pub containing: Criterion<TextMatch>,
    pub in_channel: Criterion<ChannelSelector>,
    pub from: Criterion<AuthorSelector>,
    pub with_text: Criterion<TextMatch>,
    pub after: Criterion<TimeBound>,
    pub before: Criterion<TimeBound>,
    pub private: Criterion<bool>,
}

impl MessageFilter {
    /// Creates a filter that matches every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a filter from an option mapping.
    ///
    /// Recognised keys: `starting_with`/`start_with`, `ending_with`/`end_with`,
    /// `containing`/`contains`, `in`, `from`, `with_text`/`content`, `after`,
    /// `before`, `private`. Other keys are ignored.
    pub fn from_options(map: &Map<String, Value>) -> FilterResult<Self> {
        let mut options = Options::new(map);
        let filter = Self {
            starting_with: options.text("starting_with", &["start_with"])?,
            ending_with: options.text("ending_with", &["end_with"])?,
            containing: options.text("containing", &["contains"])?,
            in_channel: options.channel("in")?,
            from: options.author("from")?,
            with_text: options.text("with_text", &["content"])?,
            after: options.time("after")?,
            before: options.time("before")?,
            private: options.flag("private")?,
        };
        options.finish();
        Ok(filter)
    }

    pub fn starting_with(mut self, text: impl Into<TextMatch>) -> Self {
        self.starting_with = self.starting_with.or(text.into());
        self
    }

    pub fn ending_with(mut self, text: impl Into<TextMatch>) -> Self {
        self.ending_with = self.ending_with.or(text.into());
        self
    }

    pub fn containing(mut self, text: impl Into<TextMatch>) -> Self {
        self.containing = self.containing.or(text.into());
        self
    }

    pub fn in_channel(mut self, channel: impl Into<ChannelSelector>) -> Self {
        self.in_channel = self.in_channel.or(channel.into());
        self
    }

    pub fn from_author(mut self, author: impl Into<AuthorSelector>) -> Self {
        self.from = self.from.or(author.into());
        self
    }

    /// Restricts to messages written by automated accounts.
    pub fn from_bots(self) -> Self {
        self.from_author(AuthorSelector::Bot)
    }

    pub fn with_text(mut self, text: impl Into<TextMatch>) -> Self {
        self.with_text = self.with_text.or(text.into());
        self
    }

    /// Declares an `after` bound: matches when this instant is later than
    /// the message timestamp.
    pub fn after(mut self, at: impl Into<TimeBound>) -> Self {
        self.after = self.after.or(at.into());
        self
    }

    /// Declares a `before` bound: matches when this instant is earlier than
    /// the message timestamp.
    pub fn before(mut self, at: impl Into<TimeBound>) -> Self {
        self.before = self.before.or(at.into());
        self
    }

    pub fn private(mut self, private: bool) -> Self {
        self.private = self.private.or(private);
        self
    }

    /// Evaluates every criterion against the event and ANDs the results.
    pub fn matches(&self, event: &MessageEvent) -> bool {
        let content = event.content();
        let channel: &Channel = event.channel();
        let author: &User = event.author();
        let timestamp = event.timestamp();

        let results = [
            (
                "starting_with",
                self.starting_with
                    .matches_all(content, |a, e| a.is_prefix_of(e)),
            ),
            (
                "ending_with",
                self.ending_with.matches_all(content, |a, e| a.is_suffix_of(e)),
            ),
            (
                "containing",
                self.containing
                    .matches_all(content, |a, e| a.is_contained_in(e)),
            ),
            ("in", self.in_channel.matches_all(channel, |a, e| a.selects(e))),
            ("from", self.from.matches_all(author, |a, e| a.selects(e))),
            (
                "with_text",
                self.with_text.matches_all(content, |a, e| a.is_exactly(e)),
            ),
            ("after", self.after.matches_all(&timestamp, |a, e| a.is_after(e))),
            (
                "before",
                self.before.matches_all(&timestamp, |a, e| a.is_before(e)),
            ),
            (
                "private",
                self.private
                    .matches_all(&channel.is_private(), same_truthiness),
            ),
        ];

        match results.iter().find(|(_, passed)| !passed) {
            Some((criterion, _)) => {
                trace!(criterion, "Message criterion not satisfied");
                false
            }
            None => true,
        }
    }
}

impl TryFrom<&Map<String, Value>> for MessageFilter {
    type Error = FilterError;

    fn try_from(map: &Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_options(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use herald_core::{Message, MessageKind};
    use regex::Regex;
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn event_with(content: &str, author: User, channel: Channel) -> MessageEvent {
        MessageEvent::new(
            MessageKind::Message,
            Message {
                id: 1,
                content: content.into(),
                author,
                channel,
                timestamp: at(1_700_000_000),
            },
            999,
        )
    }

    fn hello() -> MessageEvent {
        event_with(
            "hello world",
            User::new(1, "ann"),
            Channel::new(42, "general"),
        )
    }

    fn options(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(MessageFilter::new().matches(&hello()));
        let private = event_with("", User::new(2, "bob").as_bot(), Channel::private(1, "dm"));
        assert!(MessageFilter::new().matches(&private));
    }

    #[test]
    fn test_literal_text_criteria() {
        let event = hello();
        assert!(MessageFilter::new().starting_with("hello").matches(&event));
        assert!(MessageFilter::new().ending_with("world").matches(&event));
        assert!(MessageFilter::new().containing("lo wo").matches(&event));
        assert!(MessageFilter::new().with_text("hello world").matches(&event));
        assert!(!MessageFilter::new().with_text("hello").matches(&event));
    }

    #[test]
    fn test_suffix_pattern_must_end_the_text() {
        let event = hello();
        let inner = Regex::new("wor").unwrap();
        assert!(MessageFilter::new().containing(inner.clone()).matches(&event));
        assert!(!MessageFilter::new().ending_with(inner).matches(&event));
    }

    #[test]
    fn test_and_across_criteria() {
        let event = hello();
        let one_fails = MessageFilter::new()
            .starting_with("hello")
            .in_channel("#random");
        assert!(!one_fails.matches(&event));

        let both_hold = MessageFilter::new()
            .starting_with("hello")
            .in_channel("#general");
        assert!(both_hold.matches(&event));
    }

    #[test]
    fn test_or_within_criterion() {
        let event = hello();
        let filter = MessageFilter::new().starting_with("!").starting_with("hel");
        assert!(filter.matches(&event));

        let none = MessageFilter {
            starting_with: Criterion::AnyOf(Vec::new()),
            ..MessageFilter::new()
        };
        assert!(!none.matches(&event));
    }

    #[test]
    fn test_channel_and_author_identity() {
        let event = hello();
        assert!(MessageFilter::new().in_channel("#general").matches(&event));
        assert!(MessageFilter::new().in_channel(42u64).matches(&event));
        assert!(MessageFilter::new().from_author("ann").matches(&event));
        assert!(MessageFilter::new().from_author(1u64).matches(&event));
        assert!(!MessageFilter::new().from_bots().matches(&event));

        let automated = event_with("beep", User::new(5, "robo").as_bot(), Channel::new(42, "general"));
        assert!(MessageFilter::new().from_bots().matches(&automated));
    }

    #[test]
    fn test_time_bounds_compare_declared_against_observed() {
        let event = hello();
        let t = event.timestamp();
        let one = Duration::seconds(1);

        assert!(MessageFilter::new().after(t + one).matches(&event));
        assert!(!MessageFilter::new().after(t - one).matches(&event));
        assert!(!MessageFilter::new().after(t).matches(&event));

        assert!(MessageFilter::new().before(t - one).matches(&event));
        assert!(!MessageFilter::new().before(t + one).matches(&event));
    }

    #[test]
    fn test_private_flag() {
        let public = hello();
        let dm = event_with("hi", User::new(1, "ann"), Channel::private(9, "ann"));
        assert!(MessageFilter::new().private(true).matches(&dm));
        assert!(!MessageFilter::new().private(true).matches(&public));
        assert!(MessageFilter::new().private(false).matches(&public));
    }

    #[test]
    fn test_from_options_with_aliases() {
        let filter = MessageFilter::from_options(&options(json!({
            "start_with": "hello",
            "end_with": { "pattern": "w\\w+d$" },
            "contains": ["zzz", "o w"],
            "in": "#general",
            "from": 1,
            "content": { "pattern": "hello.*" },
            "private": null,
            "colour": "blue"
        })))
        .unwrap();
        assert!(filter.matches(&hello()));
    }

    #[test]
    fn test_from_options_entity_identity() {
        let event = hello();
        let same = MessageFilter::from_options(&options(json!({
            "in": { "id": 42, "name": "renamed" },
            "from": { "id": 1, "name": "someone else" }
        })))
        .unwrap();
        assert!(same.matches(&event));

        let other_channel =
            MessageFilter::from_options(&options(json!({ "in": { "id": 43, "name": "general" } })))
                .unwrap();
        assert!(!other_channel.matches(&event));

        let other_author =
            MessageFilter::from_options(&options(json!({ "from": { "id": 2, "name": "ann" } })))
                .unwrap();
        assert!(!other_author.matches(&event));

        let no_id = MessageFilter::from_options(&options(json!({ "in": { "name": "general" } })))
            .unwrap();
        assert!(!no_id.matches(&event));
    }

    #[test]
    fn test_from_options_time_bounds_are_strict() {
        let event = hello();
        let secs = event.timestamp().timestamp();
        for key in ["before", "after"] {
            let mut map = Map::new();
            map.insert(key.to_string(), json!(secs));
            let equal = MessageFilter::from_options(&map).unwrap();
            assert!(!equal.matches(&event), "{key} at the event timestamp");
        }
        let earlier =
            MessageFilter::from_options(&options(json!({ "before": secs - 1 }))).unwrap();
        assert!(earlier.matches(&event));
    }

    #[test]
    fn test_from_options_bot_sentinel_and_truthy_private() {
        let dm = event_with("x", User::new(3, "robo").as_bot(), Channel::private(9, "dm"));
        let filter =
            MessageFilter::from_options(&options(json!({ "from": ":bot", "private": 1 }))).unwrap();
        assert!(filter.matches(&dm));
        assert!(!filter.matches(&hello()));
    }

    #[test]
    fn test_misconfigured_criterion_never_fires() {
        let filter =
            MessageFilter::from_options(&options(json!({ "starting_with": 12 }))).unwrap();
        assert!(!filter.matches(&event_with("12", User::new(1, "a"), Channel::new(1, "c"))));
    }
}
