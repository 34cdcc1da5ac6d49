//! Namespaces and literals used in rendered `<url>` fragments.

/// Default namespace of the enclosing `urlset` element.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
/// Namespace bound to [`MOBILE_PREFIX`] by the enclosing `urlset` element.
pub const MOBILE_NS: &str = "http://www.google.com/schemas/sitemap-mobile/1.0";
pub const MOBILE_PREFIX: &str = "mobile";

pub(crate) const MOBILE_ELEMENT: &str = "mobile:mobile";
pub(crate) const DEFAULT_CHANGEFREQ: &str = "weekly";
pub(crate) const DEFAULT_PRIORITY: &str = "0.5";
pub(crate) const EXPIRES_FORMAT: &str = "%Y-%m-%d";
