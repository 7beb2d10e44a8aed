//! Decoding filters from loosely typed option mappings.
//!
//! Option mappings are what configuration files and scripting front-ends
//! hand over: criterion names mapped to JSON-like values. [`Options`]
//! resolves aliases to their canonical key and decodes each value into the
//! closed types of [`selector`](crate::selector) exactly once.
//!
//! Value forms understood by every criterion:
//!
//! - `null` or absent: unset
//! - an array: alternatives, any one of which may match
//! - anything else: a single alternative
//!
//! Per criterion, the single-alternative forms are:
//!
//! | criterion | forms |
//! |---|---|
//! | text | `"literal"`, `{ "pattern": "regex" }` |
//! | `in` | `"#name"`, `42`, `{ "id": 42, ... }` |
//! | `from` | `"name"`, `42`, `":bot"`, `{ "id": 42, ... }` |
//! | `id` | `42`, `"42"`, `{ "id": 42 }` |
//! | `after` / `before` | RFC 3339 string, unix seconds |
//! | `private` | truthy / falsy |

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use herald_core::{Channel, User};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::criterion::Criterion;
use crate::error::{FilterError, FilterResult};
use crate::selector::{
    AuthorSelector, BOT_SENTINEL, ChannelSelector, IdSelector, TextMatch, TimeBound,
};

/// A view over an option mapping that tracks which keys were consumed.
pub struct Options<'a> {
    map: &'a Map<String, Value>,
    consumed: BTreeSet<&'static str>,
}

impl<'a> Options<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self {
            map,
            consumed: BTreeSet::new(),
        }
    }

    /// Looks up a criterion under its canonical name, then its aliases.
    ///
    /// The first truthy spelling wins. When none is truthy the last
    /// spelling's value is used, so a lone `false` still declares `false`.
    fn lookup(&mut self, canonical: &'static str, aliases: &[&'static str]) -> Option<&'a Value> {
        let keys: Vec<&'static str> = std::iter::once(canonical)
            .chain(aliases.iter().copied())
            .collect();
        self.consumed.extend(keys.iter().copied());

        let mut value = None;
        for key in keys {
            value = self.map.get(key);
            if value.is_some_and(is_truthy) {
                break;
            }
        }
        value.filter(|v| !v.is_null())
    }

    fn criterion<T, F>(
        &mut self,
        canonical: &'static str,
        aliases: &[&'static str],
        decode: F,
    ) -> FilterResult<Criterion<T>>
    where
        F: Fn(&'static str, &Value) -> FilterResult<T>,
    {
        Ok(match self.lookup(canonical, aliases) {
            None => Criterion::Unset,
            Some(Value::Array(items)) => Criterion::AnyOf(
                items
                    .iter()
                    .map(|item| decode(canonical, item))
                    .collect::<FilterResult<_>>()?,
            ),
            Some(value) => Criterion::One(decode(canonical, value)?),
        })
    }

    pub fn text(
        &mut self,
        canonical: &'static str,
        aliases: &[&'static str],
    ) -> FilterResult<Criterion<TextMatch>> {
        self.criterion(canonical, aliases, decode_text)
    }

    pub fn channel(&mut self, canonical: &'static str) -> FilterResult<Criterion<ChannelSelector>> {
        self.criterion(canonical, &[], |_, v| Ok(decode_channel(v)))
    }

    pub fn author(&mut self, canonical: &'static str) -> FilterResult<Criterion<AuthorSelector>> {
        self.criterion(canonical, &[], |_, v| Ok(decode_author(v)))
    }

    pub fn id(&mut self, canonical: &'static str) -> FilterResult<Criterion<IdSelector>> {
        self.criterion(canonical, &[], |_, v| Ok(decode_id(v)))
    }

    pub fn time(&mut self, canonical: &'static str) -> FilterResult<Criterion<TimeBound>> {
        self.criterion(canonical, &[], |_, v| Ok(decode_time(v)))
    }

    pub fn flag(&mut self, canonical: &'static str) -> FilterResult<Criterion<bool>> {
        self.criterion(canonical, &[], |_, v| Ok(is_truthy(v)))
    }

    /// Logs keys no criterion claimed. They are ignored, not rejected.
    pub fn finish(self) {
        for key in self.map.keys() {
            if !self.consumed.contains(key.as_str()) {
                trace!(key = %key, "Ignoring unrecognized filter option");
            }
        }
    }
}

fn decode_text(key: &'static str, value: &Value) -> FilterResult<TextMatch> {
    match value {
        Value::String(s) => Ok(TextMatch::Literal(s.clone())),
        Value::Object(obj) => match obj.get("pattern") {
            Some(Value::String(pattern)) => Regex::new(pattern)
                .map(TextMatch::Pattern)
                .map_err(|source| FilterError::InvalidPattern { key, source }),
            _ => Ok(TextMatch::Unrecognized(value.clone())),
        },
        other => Ok(TextMatch::Unrecognized(other.clone())),
    }
}

fn decode_channel(value: &Value) -> ChannelSelector {
    match value {
        Value::String(name) => ChannelSelector::Name(name.clone()),
        Value::Number(n) => n
            .as_u64()
            .map(ChannelSelector::Id)
            .unwrap_or_else(|| ChannelSelector::Unrecognized(value.clone())),
        Value::Object(_) => Channel::deserialize(value)
            .map(ChannelSelector::Channel)
            .unwrap_or_else(|_| ChannelSelector::Unrecognized(value.clone())),
        other => ChannelSelector::Unrecognized(other.clone()),
    }
}

fn decode_author(value: &Value) -> AuthorSelector {
    match value {
        Value::String(s) if s == BOT_SENTINEL => AuthorSelector::Bot,
        Value::String(name) => AuthorSelector::Name(name.clone()),
        Value::Number(n) => n
            .as_u64()
            .map(AuthorSelector::Id)
            .unwrap_or_else(|| AuthorSelector::Unrecognized(value.clone())),
        Value::Object(_) => User::deserialize(value)
            .map(AuthorSelector::User)
            .unwrap_or_else(|_| AuthorSelector::Unrecognized(value.clone())),
        other => AuthorSelector::Unrecognized(other.clone()),
    }
}

fn decode_id(value: &Value) -> IdSelector {
    match value {
        Value::Number(n) => n.as_u64().map(IdSelector::Id),
        Value::String(s) => s.trim().parse().ok().map(IdSelector::Id),
        Value::Object(obj) => match obj.get("id") {
            Some(inner @ (Value::Number(_) | Value::String(_))) => match decode_id(inner) {
                IdSelector::Id(id) => Some(IdSelector::Id(id)),
                IdSelector::Unrecognized(_) => None,
            },
            _ => None,
        },
        _ => None,
    }
    .unwrap_or_else(|| IdSelector::Unrecognized(value.clone()))
}

fn decode_time(value: &Value) -> TimeBound {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|at| TimeBound::At(at.with_timezone(&Utc))),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(TimeBound::At),
        _ => None,
    }
    .unwrap_or_else(|| TimeBound::Unrecognized(value.clone()))
}

/// Only `false` and `null` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_alias_resolves_to_canonical() {
        let m = map(json!({ "start_with": "!" }));
        let mut options = Options::new(&m);
        let criterion = options.text("starting_with", &["start_with"]).unwrap();
        assert!(matches!(criterion, Criterion::One(TextMatch::Literal(ref s)) if s == "!"));
    }

    #[test]
    fn test_canonical_wins_over_alias() {
        let m = map(json!({ "containing": "a", "contains": "b" }));
        let mut options = Options::new(&m);
        let criterion = options.text("containing", &["contains"]).unwrap();
        assert!(matches!(criterion, Criterion::One(TextMatch::Literal(ref s)) if s == "a"));
    }

    #[test]
    fn test_null_is_unset_and_array_is_any_of() {
        let m = map(json!({ "in": null, "from": ["ann", 7, ":bot"] }));
        let mut options = Options::new(&m);
        assert!(!options.channel("in").unwrap().is_set());
        let from = options.author("from").unwrap();
        assert_eq!(
            from.alternatives(),
            &[
                AuthorSelector::Name("ann".into()),
                AuthorSelector::Id(7),
                AuthorSelector::Bot
            ]
        );
    }

    #[test]
    fn test_pattern_and_invalid_pattern() {
        let m = map(json!({ "with_text": { "pattern": "^a+$" } }));
        let mut options = Options::new(&m);
        let criterion = options.text("with_text", &["content"]).unwrap();
        assert!(criterion.matches_all("aaa", |a, e| a.is_exactly(e)));

        let bad = map(json!({ "with_text": { "pattern": "(" } }));
        let mut options = Options::new(&bad);
        assert!(matches!(
            options.text("with_text", &["content"]),
            Err(FilterError::InvalidPattern { key: "with_text", .. })
        ));
    }

    #[test]
    fn test_wrong_types_decode_to_unrecognized() {
        let m = map(json!({ "starting_with": 5, "after": true, "id": "abc" }));
        let mut options = Options::new(&m);
        assert!(matches!(
            options.text("starting_with", &[]).unwrap(),
            Criterion::One(TextMatch::Unrecognized(_))
        ));
        assert!(matches!(
            options.time("after").unwrap(),
            Criterion::One(TimeBound::Unrecognized(_))
        ));
        assert!(matches!(
            options.id("id").unwrap(),
            Criterion::One(IdSelector::Unrecognized(_))
        ));
    }

    #[test]
    fn test_id_forms_normalise() {
        for value in [json!(42), json!("42"), json!({ "id": "42" }), json!({ "id": 42 })] {
            assert_eq!(decode_id(&value), IdSelector::Id(42));
        }
    }

    #[test]
    fn test_time_forms() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(decode_time(&json!(1_700_000_000)), TimeBound::At(at));
        assert_eq!(
            decode_time(&json!("2023-11-14T22:13:20Z")),
            TimeBound::At(at)
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(0)));
        assert!(is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&Value::Null));
    }
}
