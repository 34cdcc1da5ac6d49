//! Recognized URL entry fields.
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

use super::ValueKind;

/// Every field a URL entry may carry.
///
/// This enumeration is the single source of truth for the field schema.
/// References:
/// - <http://www.sitemaps.org/protocol.html>
/// - <https://support.google.com/webmasters/answer/178636>
///
/// # Examples
/// ```rust
/// use sitemap_core::url::schema::Field;
///
/// let field: Field = "LastMod".parse()?;
/// assert_eq!(field, Field::Lastmod);
/// assert_eq!(field.as_str(), "lastmod");
/// # Ok::<(), sitemap_core::url::schema::FieldParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Priority,
    Changefreq,
    Lastmod,
    Expires,
    Host,
    Loc,
    Images,
    Videos,
    Geo,
    News,
    Mobile,
    Alternate,
    Alternates,
    Pagemap,
}

impl Field {
    pub const ALL: [Field; 14] = [
        Field::Priority,
        Field::Changefreq,
        Field::Lastmod,
        Field::Expires,
        Field::Host,
        Field::Loc,
        Field::Images,
        Field::Videos,
        Field::Geo,
        Field::News,
        Field::Mobile,
        Field::Alternate,
        Field::Alternates,
        Field::Pagemap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Priority => "priority",
            Field::Changefreq => "changefreq",
            Field::Lastmod => "lastmod",
            Field::Expires => "expires",
            Field::Host => "host",
            Field::Loc => "loc",
            Field::Images => "images",
            Field::Videos => "videos",
            Field::Geo => "geo",
            Field::News => "news",
            Field::Mobile => "mobile",
            Field::Alternate => "alternate",
            Field::Alternates => "alternates",
            Field::Pagemap => "pagemap",
        }
    }

    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
    }

    /// Kind of value the field must hold.
    pub fn expected_kind(&self) -> ValueKind {
        match self {
            Field::Priority => ValueKind::Float,
            Field::Lastmod | Field::Expires => ValueKind::Timestamp,
            Field::Mobile => ValueKind::Bool,
            Field::Alternates | Field::Pagemap => ValueKind::Mapping,
            Field::Changefreq
            | Field::Host
            | Field::Loc
            | Field::Images
            | Field::Videos
            | Field::Geo
            | Field::News
            | Field::Alternate => ValueKind::Text,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Field`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldParseError {
    #[error("unknown URL entry field: {input}")]
    Unknown { input: String },
}

impl FromStr for Field {
    type Err = FieldParseError;
    fn from_str(name: &str) -> Result<Field, FieldParseError> {
        Field::from_name(name).ok_or_else(|| FieldParseError::Unknown {
            input: name.to_string(),
        })
    }
}

/// Immutable set of lower-cased field names.
#[derive(Debug)]
pub struct FieldSchema {
    names: HashSet<&'static str>,
}

static SCHEMA: LazyLock<FieldSchema> = LazyLock::new(FieldSchema::build);

impl FieldSchema {
    fn build() -> Self {
        Self {
            names: Field::ALL.iter().map(Field::as_str).collect(),
        }
    }

    /// Process-wide schema, built on first use.
    pub fn global() -> &'static FieldSchema {
        &SCHEMA
    }

    pub fn is_recognized(&self, name: &str) -> bool {
        if self.names.contains(name) {
            return true;
        }
        self.names.contains(name.to_ascii_lowercase().as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Membership test against [`FieldSchema::global`].
pub fn is_recognized(name: &str) -> bool {
    FieldSchema::global().is_recognized(name)
}
