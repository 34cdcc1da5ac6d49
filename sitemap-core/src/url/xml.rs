//! XML serialization for URL entries.
use super::{ConformanceError, Entry, SitemapUrl};
use crate::config::Config;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use constants::{DEFAULT_CHANGEFREQ, DEFAULT_PRIORITY, EXPIRES_FORMAT, MOBILE_ELEMENT};
use quick_xml::se::{QuoteLevel, SeError, Serializer as QuickXmlSerializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::str::FromStr;
use thiserror::Error;
use tracing::{trace, warn};

pub mod constants;
pub mod parse;

/// XML serialization error.
#[derive(Debug, Error)]
pub enum UrlXmlError {
    #[error("failed to serialize URL entry to XML: {source}")]
    Serialize {
        #[from]
        source: SeError,
    },
    #[error(transparent)]
    Conformance(#[from] ConformanceError),
}

/// XML formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XmlFormat {
    #[default]
    Compact,
    Pretty {
        indent_char: char,
        indent_size: usize,
    },
}

/// Error returned when parsing an [`XmlFormat`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlFormatParseError {
    #[error("invalid XML format: {input}")]
    Invalid { input: String },
}

impl FromStr for XmlFormat {
    type Err = XmlFormatParseError;
    fn from_str(format: &str) -> Result<XmlFormat, XmlFormatParseError> {
        match format.to_ascii_lowercase().as_str() {
            "compact" => Ok(XmlFormat::Compact),
            "pretty" => Ok(XmlFormat::pretty()),
            _ => Err(XmlFormatParseError::Invalid {
                input: format.to_string(),
            }),
        }
    }
}

impl XmlFormat {
    /// Two-space indentation.
    pub fn pretty() -> Self {
        XmlFormat::Pretty {
            indent_char: ' ',
            indent_size: 2,
        }
    }
}

/// Serialize URL entries to a `<url>` fragment.
///
/// No XML declaration or `urlset` wrapper is written.
///
/// # Examples
/// ```rust
/// use sitemap_core::url::xml::ToXml;
/// use sitemap_core::url::{Entry, SitemapUrl};
///
/// let url = SitemapUrl::new(Entry::new().with("loc", "https://example.com/"))?;
/// let xml = url.to_xml()?;
/// assert!(xml.starts_with("<url><loc>https://example.com/</loc>"));
/// # Ok::<(), sitemap_core::Error>(())
/// ```
pub trait ToXml {
    fn to_xml_with_config(&self, config: &Config) -> Result<String, UrlXmlError>;

    fn to_xml(&self) -> Result<String, UrlXmlError> {
        self.to_xml_with_config(&Config::default())
    }

    fn to_xml_pretty(&self) -> Result<String, UrlXmlError> {
        self.to_xml_with_config(&Config::default().with_format(XmlFormat::pretty()))
    }

    fn to_xml_bytes(&self) -> Result<Vec<u8>, UrlXmlError> {
        self.to_xml().map(String::into_bytes)
    }
}

impl ToXml for SitemapUrl {
    fn to_xml_with_config(&self, config: &Config) -> Result<String, UrlXmlError> {
        self.to_xml_at(config, Utc::now().fixed_offset())
    }
}

impl SitemapUrl {
    /// Render with `now` standing in for the current time when `lastmod` is
    /// absent.
    ///
    /// Priority is written with `f64`'s `Display`, so outside strict mode a
    /// non-finite value comes out as `NaN`, `inf` or `-inf`.
    ///
    /// # Errors
    /// Returns [`UrlXmlError::Conformance`] in strict mode when the values break
    /// the protocol, or [`UrlXmlError::Serialize`] if the writer fails.
    pub fn to_xml_at(
        &self,
        config: &Config,
        now: DateTime<FixedOffset>,
    ) -> Result<String, UrlXmlError> {
        if config.strict() {
            if let Err(err) = self.check_conformance() {
                warn!(
                    loc = self.loc(),
                    issues = err.issues.len(),
                    "URL entry failed conformance check"
                );
                return Err(err.into());
            }
        }

        let mut buffer = String::with_capacity(256);
        {
            let mut serializer = QuickXmlSerializer::new(&mut buffer);
            serializer.set_quote_level(QuoteLevel::Full);
            if let XmlFormat::Pretty {
                indent_char,
                indent_size,
            } = config.format()
            {
                serializer.indent(indent_char, indent_size);
            }
            UrlXml { url: self, now }.serialize(serializer)?;
        }

        trace!(
            loc = self.loc(),
            elements = element_count(self),
            bytes = buffer.len(),
            "rendered URL entry"
        );
        Ok(buffer)
    }
}

/// Validate, type and render an entry in one step.
///
/// # Examples
/// ```rust
/// use sitemap_core::url::{render, Entry};
///
/// let xml = render(&Entry::new().with("loc", "https://example.com/"))?;
/// assert!(xml.starts_with(b"<url>"));
/// # Ok::<(), sitemap_core::Error>(())
/// ```
///
/// # Errors
/// Returns [`crate::Error::Entry`] for unknown fields, a missing `loc` or a
/// mistyped value; nothing is rendered in that case.
pub fn render(entry: &Entry) -> Result<Vec<u8>, crate::Error> {
    let url = SitemapUrl::try_from(entry)?;
    Ok(url.to_xml_bytes()?)
}

fn element_count(url: &SitemapUrl) -> usize {
    // loc, changefreq, priority and lastmod are always written.
    4 + usize::from(url.expires().is_some()) + usize::from(url.is_mobile())
}

/// Wrapper for serializing a URL entry.
struct UrlXml<'a> {
    url: &'a SitemapUrl,
    now: DateTime<FixedOffset>,
}

impl Serialize for UrlXml<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let url = self.url;
        let mut root = serializer.serialize_struct("url", element_count(url))?;

        root.serialize_field("loc", url.loc())?;
        if let Some(expires) = url.expires() {
            root.serialize_field("expires", &expires.format(EXPIRES_FORMAT).to_string())?;
        }
        if url.is_mobile() {
            root.serialize_field(MOBILE_ELEMENT, &())?;
        }

        root.serialize_field("changefreq", url.changefreq().unwrap_or(DEFAULT_CHANGEFREQ))?;

        let priority = url.priority().map(|p| p.to_string());
        root.serialize_field("priority", priority.as_deref().unwrap_or(DEFAULT_PRIORITY))?;

        let lastmod = url.lastmod().copied().unwrap_or(self.now);
        root.serialize_field(
            "lastmod",
            &lastmod.to_rfc3339_opts(SecondsFormat::Secs, true),
        )?;

        root.end()
    }
}
