//! Rendering configuration.
use crate::url::xml::XmlFormat;

/// Configuration for rendering URL entries.
///
/// - `format`: compact (default) or indented output.
/// - `strict`: run the protocol conformance check before rendering.
///
/// # Examples
/// ```rust
/// use sitemap_core::config::Config;
/// use sitemap_core::url::xml::XmlFormat;
///
/// let config = Config::new(XmlFormat::pretty(), true);
/// assert!(config.strict());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    format: XmlFormat,
    strict: bool,
}

impl Config {
    pub fn new(format: XmlFormat, strict: bool) -> Self {
        Self { format, strict }
    }

    pub fn with_format(mut self, format: XmlFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn format(&self) -> XmlFormat {
        self.format
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}
