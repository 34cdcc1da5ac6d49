//! Entry validation against the field schema.
use super::schema::FieldSchema;
use super::{
    ChangeFreq, ConformanceError, ConformanceIssue, ConformanceKind, Entry, EntryError, Field,
    SitemapUrl,
};
use tracing::debug;

/// Check that an entry holds only recognized keys and a `loc` key.
///
/// Keys are visited in lexicographic order, so with several unknown keys the
/// smallest one is reported. Value types are not checked here; see
/// [`SitemapUrl::new`].
///
/// # Examples
/// ```rust
/// use sitemap_core::url::{validate, Entry, EntryError};
///
/// let entry = Entry::new().with("foo", "bar");
/// assert_eq!(
///     validate(&entry),
///     Err(EntryError::UnknownField { key: "foo".into() })
/// );
/// ```
///
/// # Errors
/// Returns [`EntryError::UnknownField`] for the first unrecognized key, or
/// [`EntryError::MissingLocation`] if every key is known but `loc` is absent.
pub fn validate(entry: &Entry) -> Result<(), EntryError> {
    let schema = FieldSchema::global();
    if let Some(key) = entry.keys().find(|key| !schema.is_recognized(key)) {
        debug!(key, "rejecting URL entry with unknown field");
        return Err(EntryError::UnknownField {
            key: key.to_string(),
        });
    }
    if entry.field(Field::Loc).is_none() {
        debug!(fields = entry.len(), "rejecting URL entry without loc");
        return Err(EntryError::MissingLocation);
    }
    Ok(())
}

/// Protocol value checks for a typed URL.
///
/// Collects every issue rather than stopping at the first.
pub(crate) fn check_conformance(url: &SitemapUrl) -> Result<(), ConformanceError> {
    let mut issues = Vec::new();

    let loc = url.loc().trim();
    if loc.is_empty() {
        issues.push(ConformanceIssue {
            field: Field::Loc,
            kind: ConformanceKind::Empty,
        });
    } else if !is_absolute_http(loc) {
        issues.push(ConformanceIssue {
            field: Field::Loc,
            kind: ConformanceKind::InvalidFormat,
        });
    }

    // NaN and infinities fall outside the range too.
    if let Some(priority) = url.priority() {
        if !(0.0..=1.0).contains(&priority) {
            issues.push(ConformanceIssue {
                field: Field::Priority,
                kind: ConformanceKind::OutOfRange,
            });
        }
    }

    if let Some(freq) = url.changefreq() {
        // The protocol only allows the lower-case spellings.
        if !freq
            .parse::<ChangeFreq>()
            .is_ok_and(|parsed| parsed.as_str() == freq)
        {
            issues.push(ConformanceIssue {
                field: Field::Changefreq,
                kind: ConformanceKind::InvalidFormat,
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ConformanceError::new(issues))
    }
}

fn is_absolute_http(loc: &str) -> bool {
    let lower = loc.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(rest) => !rest.is_empty() && !rest.starts_with(['/', '?', '#']),
        None => false,
    }
}
