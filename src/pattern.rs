//! Evaluation of filter values against record values
//!
//! A record maps attribute names to a single [`Scalar`] or a sequence of them.
//! Every `match_*` function succeeds when ANY member of a multi-valued
//! attribute satisfies the test.

use crate::escape::decode_value;
use clap::ValueEnum;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single attribute value as supplied by a record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Text form used for equality and substring tests
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    fn is_empty(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

/// Value of one attribute: a single scalar or a multi-valued sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Multi(Vec<Scalar>),
    Single(Scalar),
}

impl AttributeValue {
    /// All members, in order. A single value is a one-element slice.
    pub fn members(&self) -> &[Scalar] {
        match self {
            AttributeValue::Multi(values) => values,
            AttributeValue::Single(value) => std::slice::from_ref(value),
        }
    }

    /// Whether at least one member is non-empty text, a number or a boolean
    pub fn is_present(&self) -> bool {
        match self {
            AttributeValue::Multi(values) => values.iter().any(|v| !v.is_empty()),
            AttributeValue::Single(value) => !value.is_empty(),
        }
    }
}

macro_rules! single_value_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AttributeValue {
                fn from(value: $t) -> Self {
                    AttributeValue::Single(value.into())
                }
            }
        )*
    };
}

single_value_from!(Scalar, &str, String, i64, i32, f64, bool);

impl<T: Into<Scalar>> From<Vec<T>> for AttributeValue {
    fn from(values: Vec<T>) -> Self {
        AttributeValue::Multi(values.into_iter().map(Into::into).collect())
    }
}

/// Lookup of attribute values by name
pub trait Record {
    /// Value of `attribute`, or `None` when the record does not carry it
    fn attribute(&self, attribute: &str) -> Option<&AttributeValue>;
}

impl<K> Record for HashMap<K, AttributeValue>
where
    K: Borrow<str> + std::hash::Hash + Eq,
{
    fn attribute(&self, attribute: &str) -> Option<&AttributeValue> {
        self.get(attribute)
    }
}

impl<K> Record for BTreeMap<K, AttributeValue>
where
    K: Borrow<str> + Ord,
{
    fn attribute(&self, attribute: &str) -> Option<&AttributeValue> {
        self.get(attribute)
    }
}

/// Owned in-memory record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry {
    attributes: BTreeMap<String, AttributeValue>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }
}

impl Record for Entry {
    fn attribute(&self, attribute: &str) -> Option<&AttributeValue> {
        self.attributes.get(attribute)
    }
}

impl<K, V> FromIterator<(K, V)> for Entry
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// How `<=` and `>=` coerce their operands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OrderingPolicy {
    /// Numeric when both sides are numbers, otherwise case-insensitive text
    #[default]
    Natural,
    /// Always case-insensitive text
    Lexical,
}

/// Options for evaluating a filter against a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub ordering: OrderingPolicy,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }
}

/// Equality test, falling back to [`match_substring`] when the filter value
/// contains a wildcard
pub fn match_string(value: &AttributeValue, filter: &str) -> bool {
    if filter.contains('*') {
        return match_substring(value, filter);
    }

    let expected = decode_value(filter).to_lowercase();
    value
        .members()
        .iter()
        .filter(|m| !m.is_empty())
        .any(|m| m.as_text().to_lowercase() == expected)
}

/// Wildcard test: every raw `*` matches zero or more characters and the
/// pattern must cover the whole value, ignoring case
pub fn match_substring(value: &AttributeValue, filter: &str) -> bool {
    let pattern = substring_pattern(filter);
    let regex = match RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
    {
        Ok(regex) => regex,
        // Only reachable when the pattern exceeds the regex size limit.
        Err(_) => return false,
    };

    value
        .members()
        .iter()
        .any(|m| regex.is_match(&m.as_text()))
}

/// Translate a filter value into an anchored regular expression
pub(crate) fn substring_pattern(filter: &str) -> String {
    let body = filter
        .split('*')
        .map(|segment| regex::escape(&decode_value(segment)))
        .collect::<Vec<_>>()
        .join(".*");

    format!("^{body}$")
}

/// `attr<=value`
pub fn match_lte(value: &AttributeValue, filter: &str, policy: OrderingPolicy) -> bool {
    let filter = decode_value(filter);
    value
        .members()
        .iter()
        .any(|m| compare(m, &filter, policy) != Ordering::Greater)
}

/// `attr>=value`
pub fn match_gte(value: &AttributeValue, filter: &str, policy: OrderingPolicy) -> bool {
    let filter = decode_value(filter);
    value
        .members()
        .iter()
        .any(|m| compare(m, &filter, policy) != Ordering::Less)
}

/// `attr~=value`
///
/// No approximate-match algorithm is implemented, so this never matches.
/// That is a defined result, not an error.
pub fn match_approx(_value: &AttributeValue, _filter: &str) -> bool {
    false
}

/// Order a record member against a decoded filter value
fn compare(member: &Scalar, filter: &str, policy: OrderingPolicy) -> Ordering {
    if policy == OrderingPolicy::Natural {
        if let Some(ordering) = compare_numeric(member, filter) {
            return ordering;
        }
    }

    member
        .as_text()
        .to_lowercase()
        .cmp(&filter.to_lowercase())
}

enum Number {
    Integer(i64),
    Float(f64),
}

fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Some(Number::Integer(i));
    }
    match text.parse::<f64>() {
        Ok(x) if x.is_finite() => Some(Number::Float(x)),
        _ => None,
    }
}

fn compare_numeric(member: &Scalar, filter: &str) -> Option<Ordering> {
    let lhs = match member {
        Scalar::Integer(i) => Number::Integer(*i),
        Scalar::Float(x) => Number::Float(*x),
        Scalar::Text(s) => parse_number(s)?,
        Scalar::Boolean(_) => return None,
    };
    let rhs = parse_number(filter)?;

    match (lhs, rhs) {
        (Number::Integer(a), Number::Integer(b)) => Some(a.cmp(&b)),
        (Number::Integer(a), Number::Float(b)) => (a as f64).partial_cmp(&b),
        (Number::Float(a), Number::Integer(b)) => a.partial_cmp(&(b as f64)),
        (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
    }
}
