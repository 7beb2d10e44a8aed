//! Declared criterion values and their single-value comparison rules.
//!
//! Each type here is a closed set of the forms a declaration can take.
//! Options are decoded into these once, when a filter is built, so
//! evaluation is a plain `match`. A declared value of a type no rule
//! handles decodes to an `Unrecognized` variant, which never matches.

use chrono::{DateTime, Utc};
use herald_core::{Channel, ResolveId, User};
use regex::Regex;
use serde_json::Value;

/// Sentinel spelling for "any automated account" in option mappings.
pub const BOT_SENTINEL: &str = ":bot";

/// Marker stripped from the front of channel names.
pub const CHANNEL_MARKER: char = '#';

// ============================================================================
// Text
// ============================================================================

/// A literal string or a pattern compared against message text.
#[derive(Debug, Clone)]
pub enum TextMatch {
    Literal(String),
    Pattern(Regex),
    Unrecognized(Value),
}

impl TextMatch {
    /// Literal: starts-with. Pattern: the first match begins at offset 0.
    pub fn is_prefix_of(&self, text: &str) -> bool {
        match self {
            Self::Literal(s) => text.starts_with(s.as_str()),
            Self::Pattern(re) => re.find(text).is_some_and(|m| m.start() == 0),
            Self::Unrecognized(_) => false,
        }
    }

    /// Literal: ends-with. Pattern: the text must end with the text of the
    /// first match.
    ///
    /// This compares strings, not positions, so `ab` passes on `"ab ab"`
    /// although its first match starts the text. Capture groups play no
    /// part: `(wor)ld` passes on `"hello world"`.
    pub fn is_suffix_of(&self, text: &str) -> bool {
        match self {
            Self::Literal(s) => text.ends_with(s.as_str()),
            Self::Pattern(re) => re.find(text).is_some_and(|m| text.ends_with(m.as_str())),
            Self::Unrecognized(_) => false,
        }
    }

    /// Literal: substring. Pattern: matches anywhere.
    pub fn is_contained_in(&self, text: &str) -> bool {
        match self {
            Self::Literal(s) => text.contains(s.as_str()),
            Self::Pattern(re) => re.is_match(text),
            Self::Unrecognized(_) => false,
        }
    }

    /// Literal: equality. Pattern: the first match is the whole text.
    pub fn is_exactly(&self, text: &str) -> bool {
        match self {
            Self::Literal(s) => s == text,
            Self::Pattern(re) => re.find(text).is_some_and(|m| m.as_str() == text),
            Self::Unrecognized(_) => false,
        }
    }
}

impl From<&str> for TextMatch {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for TextMatch {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl From<Regex> for TextMatch {
    fn from(re: Regex) -> Self {
        Self::Pattern(re)
    }
}

// ============================================================================
// Channel
// ============================================================================

/// Identifies a channel by name, id or identity.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelSelector {
    /// Compared with the channel name after stripping a leading `#`.
    Name(String),
    Id(u64),
    Channel(Channel),
    Unrecognized(Value),
}

impl ChannelSelector {
    pub fn selects(&self, channel: &Channel) -> bool {
        match self {
            Self::Name(name) => {
                name.strip_prefix(CHANNEL_MARKER).unwrap_or(name) == channel.name
            }
            Self::Id(id) => *id == channel.id,
            Self::Channel(declared) => declared == channel,
            Self::Unrecognized(_) => false,
        }
    }
}

impl From<&str> for ChannelSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ChannelSelector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<u64> for ChannelSelector {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<Channel> for ChannelSelector {
    fn from(channel: Channel) -> Self {
        Self::Channel(channel)
    }
}

impl From<&Channel> for ChannelSelector {
    fn from(channel: &Channel) -> Self {
        Self::Channel(channel.clone())
    }
}

// ============================================================================
// Author
// ============================================================================

/// Identifies a message author.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthorSelector {
    Name(String),
    Id(u64),
    /// Any automated account.
    Bot,
    User(User),
    Unrecognized(Value),
}

impl AuthorSelector {
    pub fn selects(&self, author: &User) -> bool {
        match self {
            Self::Name(name) => *name == author.name,
            Self::Id(id) => *id == author.id,
            Self::Bot => author.is_bot(),
            Self::User(declared) => declared == author,
            Self::Unrecognized(_) => false,
        }
    }
}

impl From<&str> for AuthorSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for AuthorSelector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<u64> for AuthorSelector {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<User> for AuthorSelector {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl From<&User> for AuthorSelector {
    fn from(user: &User) -> Self {
        Self::User(user.clone())
    }
}

// ============================================================================
// Id
// ============================================================================

/// A message id, already normalised through [`ResolveId`].
#[derive(Debug, Clone, PartialEq)]
pub enum IdSelector {
    Id(u64),
    Unrecognized(Value),
}

impl IdSelector {
    /// Normalises anything exposing an id.
    pub fn of(value: impl ResolveId) -> Self {
        Self::Id(value.resolve_id())
    }

    pub fn selects(&self, observed: impl ResolveId) -> bool {
        match self {
            Self::Id(id) => *id == observed.resolve_id(),
            Self::Unrecognized(_) => false,
        }
    }
}

impl From<u64> for IdSelector {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

// ============================================================================
// Time
// ============================================================================

/// An instant compared against the event timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeBound {
    At(DateTime<Utc>),
    Unrecognized(Value),
}

impl TimeBound {
    /// `after` rule: the declared instant is strictly greater than the
    /// observed one.
    pub fn is_after(&self, observed: &DateTime<Utc>) -> bool {
        match self {
            Self::At(declared) => declared > observed,
            Self::Unrecognized(_) => false,
        }
    }

    /// `before` rule: the declared instant is strictly less than the
    /// observed one.
    pub fn is_before(&self, observed: &DateTime<Utc>) -> bool {
        match self {
            Self::At(declared) => declared < observed,
            Self::Unrecognized(_) => false,
        }
    }
}

impl From<DateTime<Utc>> for TimeBound {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

/// `private` rule: `!observed == !declared`.
pub fn same_truthiness(declared: &bool, observed: &bool) -> bool {
    !*observed == !*declared
}
