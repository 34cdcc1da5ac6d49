//! Sitemap `<url>` entry validation and XML rendering.
//!
//! # Examples
//! ```rust
//! use sitemap_core::url::{render, Entry};
//!
//! let entry = Entry::new()
//!     .with("loc", "https://example.com/")
//!     .with("changefreq", "daily");
//! let xml = render(&entry)?;
//! assert!(String::from_utf8_lossy(&xml).contains("<changefreq>daily</changefreq>"));
//! # Ok::<(), sitemap_core::Error>(())
//! ```
pub mod config;
pub mod url;

use thiserror::Error;

pub use url::{ConformanceError, EntryError};

/// Top-level error wrapper for core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Entry(#[from] url::EntryError),
    #[error(transparent)]
    Xml(#[from] url::xml::UrlXmlError),
    #[error(transparent)]
    Parse(#[from] url::xml::parse::ParseError),
    #[error(transparent)]
    Conformance(#[from] url::ConformanceError),
}
