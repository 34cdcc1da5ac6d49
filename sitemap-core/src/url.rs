//! URL entry types, validation and rendering.
mod builder;
pub mod schema;
pub mod validation;
pub mod xml;
pub use builder::SitemapUrl;
pub use schema::{Field, FieldSchema};
pub use validation::validate;
pub use xml::render;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

type Result<T> = std::result::Result<T, EntryError>;

/// Errors raised while validating or typing a URL entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("unknown map key `{key}` in URL entry")]
    UnknownField { key: String },
    #[error("URL entry must have a loc field")]
    MissingLocation,
    #[error("field `{field}` must hold a {expected} value, found {found}")]
    TypeMismatch {
        field: Field,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("URL entry must be a JSON object, found {found}")]
    NotAnObject { found: ValueKind },
}

/// Semantic type of an entry value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Float,
    Text,
    Timestamp,
    Bool,
    Mapping,
    Other,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Float => "float",
            ValueKind::Text => "string",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Bool => "boolean",
            ValueKind::Mapping => "mapping",
            ValueKind::Other => "other",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry value.
///
/// # Examples
/// ```rust
/// use sitemap_core::url::{FieldValue, ValueKind};
///
/// let value = FieldValue::from(0.8);
/// assert_eq!(value.kind(), ValueKind::Float);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Text(String),
    Timestamp(DateTime<FixedOffset>),
    Bool(bool),
    Mapping(Map<String, Value>),
    /// JSON values with no sitemap meaning (null, arrays).
    Other(Value),
}

impl FieldValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Float(_) => ValueKind::Float,
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Timestamp(_) => ValueKind::Timestamp,
            FieldValue::Bool(_) => ValueKind::Bool,
            FieldValue::Mapping(_) => ValueKind::Mapping,
            FieldValue::Other(_) => ValueKind::Other,
        }
    }

    fn from_json(field: Option<Field>, value: Value) -> Self {
        match value {
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => FieldValue::Float(f),
                None => FieldValue::Other(Value::Number(n)),
            },
            Value::String(s) => match field.map(|f| f.expected_kind()) {
                Some(ValueKind::Timestamp) => match parse_timestamp(&s) {
                    Some(ts) => FieldValue::Timestamp(ts),
                    None => FieldValue::Text(s),
                },
                _ => FieldValue::Text(s),
            },
            Value::Object(map) => FieldValue::Mapping(map),
            other => FieldValue::Other(other),
        }
    }
}

// RFC 3339 first, then a bare `YYYY-MM-DD` date at midnight UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(midnight_utc)
}

fn midnight_utc(date: NaiveDate) -> DateTime<FixedOffset> {
    date.and_time(NaiveTime::MIN).and_utc().fixed_offset()
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for FieldValue {
    fn from(value: DateTime<Tz>) -> Self {
        FieldValue::Timestamp(value.fixed_offset())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Timestamp(midnight_utc(value))
    }
}

impl From<Map<String, Value>> for FieldValue {
    fn from(value: Map<String, Value>) -> Self {
        FieldValue::Mapping(value)
    }
}

impl From<ChangeFreq> for FieldValue {
    fn from(value: ChangeFreq) -> Self {
        FieldValue::Text(value.as_str().to_string())
    }
}

/// Loosely-typed sitemap record for one page.
///
/// Keys are lower-cased on insertion.
///
/// # Examples
/// ```rust
/// use sitemap_core::url::Entry;
///
/// let entry = Entry::new()
///     .with("loc", "https://example.com/")
///     .with("Priority", 0.8);
/// assert!(entry.contains_key("priority"));
/// assert_eq!(entry.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    fields: BTreeMap<String, FieldValue>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        key: impl AsRef<str>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields
            .insert(key.as_ref().to_ascii_lowercase(), value.into())
    }

    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(&key.to_ascii_lowercase())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(&key.to_ascii_lowercase())
    }

    pub fn field(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(field.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<FieldValue>> FromIterator<(K, V)> for Entry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entry = Entry::new();
        for (key, value) in iter {
            entry.insert(key, value);
        }
        entry
    }
}

impl<K: AsRef<str>, V: Into<FieldValue>, const N: usize> From<[(K, V); N]> for Entry {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<Map<String, Value>> for Entry {
    fn from(map: Map<String, Value>) -> Self {
        let mut entry = Entry::new();
        for (key, value) in map {
            let field = Field::from_name(&key);
            entry.insert(key, FieldValue::from_json(field, value));
        }
        entry
    }
}

/// Build an entry from a JSON object.
///
/// `lastmod` and `expires` strings are read as RFC 3339 timestamps or `YYYY-MM-DD`
/// dates; anything else is kept as text and rejected when typed.
///
/// # Errors
/// Returns [`EntryError::NotAnObject`] if the value is not a JSON object.
impl TryFrom<Value> for Entry {
    type Error = EntryError;
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Entry::from(map)),
            other => Err(EntryError::NotAnObject {
                found: FieldValue::from_json(None, other).kind(),
            }),
        }
    }
}

/// Change frequency values defined by the sitemap protocol.
///
/// # Examples
/// ```rust
/// use std::str::FromStr;
/// use sitemap_core::url::ChangeFreq;
///
/// let freq = ChangeFreq::from_str("Daily")?;
/// assert_eq!(freq, ChangeFreq::Daily);
/// assert_eq!(ChangeFreq::default().as_str(), "weekly");
/// # Ok::<(), sitemap_core::url::ChangeFreqParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

/// Error returned when parsing a [`ChangeFreq`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeFreqParseError {
    #[error("invalid change frequency: {input}")]
    Invalid { input: String },
}

impl FromStr for ChangeFreq {
    type Err = ChangeFreqParseError;
    fn from_str(freq: &str) -> std::result::Result<ChangeFreq, ChangeFreqParseError> {
        match freq.to_ascii_lowercase().as_str() {
            "always" => Ok(ChangeFreq::Always),
            "hourly" => Ok(ChangeFreq::Hourly),
            "daily" => Ok(ChangeFreq::Daily),
            "weekly" => Ok(ChangeFreq::Weekly),
            "monthly" => Ok(ChangeFreq::Monthly),
            "yearly" => Ok(ChangeFreq::Yearly),
            "never" => Ok(ChangeFreq::Never),
            _ => Err(ChangeFreqParseError::Invalid {
                input: freq.to_string(),
            }),
        }
    }
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl Display for ChangeFreq {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured conformance error with field-level issues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("URL entry does not conform to the sitemap protocol")]
pub struct ConformanceError {
    pub issues: Vec<ConformanceIssue>,
}

impl ConformanceError {
    pub fn new(issues: Vec<ConformanceIssue>) -> Self {
        Self { issues }
    }
}

/// Single conformance issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformanceIssue {
    pub field: Field,
    pub kind: ConformanceKind,
}

#[non_exhaustive]
/// Classification of conformance issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConformanceKind {
    Empty,
    InvalidFormat,
    OutOfRange,
}
