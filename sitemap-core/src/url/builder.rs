use super::validation::{check_conformance, validate};
use super::{ConformanceError, Entry, EntryError, Field, FieldValue};
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

/// A validated URL entry with one typed slot per recognized field.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    loc: String,
    priority: Option<f64>,
    changefreq: Option<String>,
    lastmod: Option<DateTime<FixedOffset>>,
    expires: Option<DateTime<FixedOffset>>,
    mobile: bool,
    host: Option<String>,
    images: Option<String>,
    videos: Option<String>,
    geo: Option<String>,
    news: Option<String>,
    alternate: Option<String>,
    alternates: Option<Map<String, Value>>,
    pagemap: Option<Map<String, Value>>,
}

impl SitemapUrl {
    /// Validate an entry and move its values into typed slots.
    ///
    /// # Examples
    /// ```rust
    /// use sitemap_core::url::{Entry, SitemapUrl};
    ///
    /// let url = SitemapUrl::new(
    ///     Entry::new()
    ///         .with("loc", "https://example.com/")
    ///         .with("priority", 0.9),
    /// )?;
    /// assert_eq!(url.loc(), "https://example.com/");
    /// assert_eq!(url.priority(), Some(0.9));
    /// # Ok::<(), sitemap_core::url::EntryError>(())
    /// ```
    ///
    /// # Errors
    /// Returns the [`validate`] errors, or [`EntryError::TypeMismatch`] when a
    /// recognized field holds the wrong kind of value.
    pub fn new(entry: Entry) -> Result<Self, EntryError> {
        Self::try_from(&entry)
    }

    pub fn loc(&self) -> &str {
        &self.loc
    }

    pub fn priority(&self) -> Option<f64> {
        self.priority
    }

    pub fn changefreq(&self) -> Option<&str> {
        self.changefreq.as_deref()
    }

    pub fn lastmod(&self) -> Option<&DateTime<FixedOffset>> {
        self.lastmod.as_ref()
    }

    pub fn expires(&self) -> Option<&DateTime<FixedOffset>> {
        self.expires.as_ref()
    }

    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn images(&self) -> Option<&str> {
        self.images.as_deref()
    }

    pub fn videos(&self) -> Option<&str> {
        self.videos.as_deref()
    }

    pub fn geo(&self) -> Option<&str> {
        self.geo.as_deref()
    }

    pub fn news(&self) -> Option<&str> {
        self.news.as_deref()
    }

    pub fn alternate(&self) -> Option<&str> {
        self.alternate.as_deref()
    }

    pub fn alternates(&self) -> Option<&Map<String, Value>> {
        self.alternates.as_ref()
    }

    pub fn pagemap(&self) -> Option<&Map<String, Value>> {
        self.pagemap.as_ref()
    }

    /// Check protocol value ranges (absolute http(s) `loc`, priority within
    /// 0.0..=1.0, known change frequency).
    ///
    /// # Errors
    /// Returns [`ConformanceError`] listing every issue found.
    pub fn check_conformance(&self) -> Result<(), ConformanceError> {
        check_conformance(self)
    }
}

impl TryFrom<&Entry> for SitemapUrl {
    type Error = EntryError;
    fn try_from(entry: &Entry) -> Result<Self, EntryError> {
        validate(entry)?;
        let slots = Slots(entry);

        Ok(Self {
            loc: slots.text(Field::Loc)?.unwrap_or_default(),
            priority: slots.float(Field::Priority)?,
            changefreq: slots.text(Field::Changefreq)?,
            lastmod: slots.timestamp(Field::Lastmod)?,
            expires: slots.timestamp(Field::Expires)?,
            mobile: slots.boolean(Field::Mobile)?.unwrap_or(false),
            host: slots.text(Field::Host)?,
            images: slots.text(Field::Images)?,
            videos: slots.text(Field::Videos)?,
            geo: slots.text(Field::Geo)?,
            news: slots.text(Field::News)?,
            alternate: slots.text(Field::Alternate)?,
            alternates: slots.mapping(Field::Alternates)?,
            pagemap: slots.mapping(Field::Pagemap)?,
        })
    }
}

impl TryFrom<Entry> for SitemapUrl {
    type Error = EntryError;
    fn try_from(entry: Entry) -> Result<Self, EntryError> {
        Self::try_from(&entry)
    }
}

struct Slots<'a>(&'a Entry);

impl Slots<'_> {
    fn mismatch(field: Field, value: &FieldValue) -> EntryError {
        EntryError::TypeMismatch {
            field,
            expected: field.expected_kind(),
            found: value.kind(),
        }
    }

    fn text(&self, field: Field) -> Result<Option<String>, EntryError> {
        match self.0.field(field) {
            None => Ok(None),
            Some(FieldValue::Text(s)) => Ok(Some(s.clone())),
            Some(other) => Err(Self::mismatch(field, other)),
        }
    }

    fn float(&self, field: Field) -> Result<Option<f64>, EntryError> {
        match self.0.field(field) {
            None => Ok(None),
            Some(FieldValue::Float(f)) => Ok(Some(*f)),
            Some(other) => Err(Self::mismatch(field, other)),
        }
    }

    fn timestamp(&self, field: Field) -> Result<Option<DateTime<FixedOffset>>, EntryError> {
        match self.0.field(field) {
            None => Ok(None),
            Some(FieldValue::Timestamp(ts)) => Ok(Some(*ts)),
            Some(other) => Err(Self::mismatch(field, other)),
        }
    }

    fn boolean(&self, field: Field) -> Result<Option<bool>, EntryError> {
        match self.0.field(field) {
            None => Ok(None),
            Some(FieldValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(Self::mismatch(field, other)),
        }
    }

    fn mapping(&self, field: Field) -> Result<Option<Map<String, Value>>, EntryError> {
        match self.0.field(field) {
            None => Ok(None),
            Some(FieldValue::Mapping(map)) => Ok(Some(map.clone())),
            Some(other) => Err(Self::mismatch(field, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::{ConformanceIssue, ConformanceKind, ValueKind};
    use chrono::TimeZone;

    fn loc_entry() -> Entry {
        Entry::new().with("loc", "https://example.com/")
    }

    #[test]
    fn defaults_for_absent_fields() {
        let url = SitemapUrl::new(loc_entry()).expect("valid");
        assert_eq!(url.loc(), "https://example.com/");
        assert_eq!(url.priority(), None);
        assert_eq!(url.changefreq(), None);
        assert_eq!(url.lastmod(), None);
        assert!(!url.is_mobile());
        assert!(url.pagemap().is_none());
    }

    #[test]
    fn typed_slots_are_filled() {
        let lastmod = chrono::Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let mut pagemap = Map::new();
        pagemap.insert("dataobjects".into(), Value::Array(vec![]));
        let url = SitemapUrl::new(
            loc_entry()
                .with("priority", 0.3)
                .with("changefreq", "daily")
                .with("lastmod", lastmod)
                .with("mobile", true)
                .with("host", "127.0.0.1")
                .with("pagemap", pagemap.clone()),
        )
        .expect("valid");

        assert_eq!(url.priority(), Some(0.3));
        assert_eq!(url.changefreq(), Some("daily"));
        assert_eq!(url.lastmod().copied(), Some(lastmod.fixed_offset()));
        assert!(url.is_mobile());
        assert_eq!(url.host(), Some("127.0.0.1"));
        assert_eq!(url.pagemap(), Some(&pagemap));
    }

    #[test]
    fn priority_as_string_is_a_type_mismatch() {
        let err = SitemapUrl::new(loc_entry().with("priority", "high")).unwrap_err();
        assert_eq!(
            err,
            EntryError::TypeMismatch {
                field: Field::Priority,
                expected: ValueKind::Float,
                found: ValueKind::Text,
            }
        );
    }

    #[test]
    fn loc_must_be_text() {
        let err = SitemapUrl::new(Entry::new().with("loc", 1.0)).unwrap_err();
        assert!(matches!(
            err,
            EntryError::TypeMismatch {
                field: Field::Loc,
                ..
            }
        ));
    }

    #[test]
    fn validation_runs_before_typing() {
        let err = SitemapUrl::new(Entry::new().with("priority", "high")).unwrap_err();
        assert_eq!(err, EntryError::MissingLocation);
    }

    #[test]
    fn conformance_collects_all_issues() {
        let url = SitemapUrl::new(
            Entry::new()
                .with("loc", "not a url")
                .with("priority", 1.5)
                .with("changefreq", "sometimes"),
        )
        .expect("valid");
        let err = url.check_conformance().unwrap_err();
        let kinds: Vec<_> = err.issues.iter().map(|i| (i.field, i.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (Field::Loc, ConformanceKind::InvalidFormat),
                (Field::Priority, ConformanceKind::OutOfRange),
                (Field::Changefreq, ConformanceKind::InvalidFormat),
            ]
        );
    }

    #[test]
    fn conformance_passes_for_protocol_values() {
        let url = SitemapUrl::new(
            loc_entry()
                .with("priority", 1.0)
                .with("changefreq", "monthly"),
        )
        .expect("valid");
        assert_eq!(url.check_conformance(), Ok(()));
    }

    #[test]
    fn changefreq_must_be_lower_case() {
        for freq in ["Monthly", "DAILY"] {
            let url = SitemapUrl::new(loc_entry().with("changefreq", freq)).expect("valid");
            let err = url.check_conformance().unwrap_err();
            assert_eq!(
                err.issues,
                vec![ConformanceIssue {
                    field: Field::Changefreq,
                    kind: ConformanceKind::InvalidFormat,
                }],
                "{freq}"
            );
        }
    }

    #[test]
    fn non_finite_priority_is_out_of_range() {
        for priority in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let url = SitemapUrl::new(loc_entry().with("priority", priority)).expect("valid");
            let err = url.check_conformance().unwrap_err();
            assert_eq!(err.issues[0].field, Field::Priority);
            assert_eq!(err.issues[0].kind, ConformanceKind::OutOfRange);
        }
    }

    #[test]
    fn hostless_loc_is_invalid() {
        for loc in ["https://?x", "http://#"] {
            let url = SitemapUrl::new(Entry::new().with("loc", loc)).expect("valid");
            let err = url.check_conformance().unwrap_err();
            assert_eq!(err.issues[0].kind, ConformanceKind::InvalidFormat, "{loc}");
        }
    }

    #[test]
    fn blank_loc_is_empty() {
        let url = SitemapUrl::new(Entry::new().with("loc", "  ")).expect("valid");
        let err = url.check_conformance().unwrap_err();
        assert_eq!(err.issues[0].kind, ConformanceKind::Empty);
    }
}
