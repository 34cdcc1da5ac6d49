//! XML parsing for rendered `<url>` fragments.
use super::constants::MOBILE_ELEMENT;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

/// Errors emitted while parsing a `<url>` fragment.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("fragment is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("XML parse error: {0}")]
    XmlParse(String),
    #[error("expected a <url> root element, found <{0}>")]
    UnexpectedRoot(String),
    #[error("unexpected element <{0}> inside <url>")]
    UnexpectedElement(String),
    #[error("missing <url> element")]
    MissingRoot,
    #[error("fragment ended before </url>")]
    UnexpectedEof,
}

/// Child texts of a rendered `<url>` element, as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    pub loc: Option<String>,
    pub expires: Option<String>,
    pub mobile: bool,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
    pub lastmod: Option<String>,
}

impl ParsedUrl {
    fn set(&mut self, element: &str, text: String) -> Result<(), ParseError> {
        let slot = match element {
            "loc" => &mut self.loc,
            "expires" => &mut self.expires,
            "changefreq" => &mut self.changefreq,
            "priority" => &mut self.priority,
            "lastmod" => &mut self.lastmod,
            MOBILE_ELEMENT => {
                self.mobile = true;
                return Ok(());
            }
            other => return Err(ParseError::UnexpectedElement(other.to_string())),
        };
        *slot = Some(text);
        Ok(())
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

/// Parse one `<url>` fragment.
///
/// # Examples
/// ```rust
/// use sitemap_core::url::xml::parse::parse_url_fragment;
///
/// let parsed = parse_url_fragment(b"<url><loc>https://example.com/</loc><mobile:mobile/></url>")?;
/// assert_eq!(parsed.loc.as_deref(), Some("https://example.com/"));
/// assert!(parsed.mobile);
/// # Ok::<(), sitemap_core::url::xml::parse::ParseError>(())
/// ```
///
/// # Errors
/// Returns [`ParseError`] if the input is not a single well-formed `<url>`
/// element holding only the rendered children.
pub fn parse_url_fragment(xml: &[u8]) -> Result<ParsedUrl, ParseError> {
    let xml = std::str::from_utf8(xml)?;
    let mut reader = Reader::from_str(xml);

    let mut parsed = ParsedUrl::default();
    let mut in_url = false;
    let mut closed = false;
    let mut current: Option<(String, String)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ParseError::XmlParse(format!("{e}")))?;
        match event {
            Event::Start(ref e) => {
                let name = element_name(e);
                if closed {
                    return Err(ParseError::UnexpectedRoot(name));
                }
                if !in_url {
                    if name != "url" {
                        return Err(ParseError::UnexpectedRoot(name));
                    }
                    in_url = true;
                } else if current.is_some() {
                    return Err(ParseError::UnexpectedElement(name));
                } else {
                    current = Some((name, String::new()));
                }
            }
            Event::Empty(ref e) => {
                let name = element_name(e);
                if closed {
                    return Err(ParseError::UnexpectedRoot(name));
                }
                if !in_url {
                    if name != "url" {
                        return Err(ParseError::UnexpectedRoot(name));
                    }
                    closed = true;
                } else if current.is_some() {
                    return Err(ParseError::UnexpectedElement(name));
                } else {
                    parsed.set(&name, String::new())?;
                }
            }
            Event::Text(ref e) => {
                if let Some((_, text)) = current.as_mut() {
                    let unescaped = e
                        .unescape()
                        .map_err(|e| ParseError::XmlParse(format!("{e}")))?;
                    text.push_str(&unescaped);
                }
            }
            Event::CData(ref e) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(_) => match current.take() {
                Some((name, text)) => parsed.set(&name, text)?,
                None => {
                    in_url = false;
                    closed = true;
                }
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if in_url {
        return Err(ParseError::UnexpectedEof);
    }
    if !closed {
        return Err(ParseError::MissingRoot);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_all_rendered_children() {
        let parsed = parse_url_fragment(
            b"<url><loc>https://example.com/?a=1&amp;b=2</loc><expires>2025-06-30</expires>\
              <mobile:mobile/><changefreq>daily</changefreq><priority>0.8</priority>\
              <lastmod>2024-02-03T04:05:06+09:00</lastmod></url>",
        )
        .unwrap();
        assert_eq!(
            parsed,
            ParsedUrl {
                loc: Some("https://example.com/?a=1&b=2".into()),
                expires: Some("2025-06-30".into()),
                mobile: true,
                changefreq: Some("daily".into()),
                priority: Some("0.8".into()),
                lastmod: Some("2024-02-03T04:05:06+09:00".into()),
            }
        );
    }

    #[test]
    fn tolerates_indentation() {
        let parsed =
            parse_url_fragment(b"<url>\n  <loc>https://example.com/</loc>\n</url>").unwrap();
        assert_eq!(parsed.loc.as_deref(), Some("https://example.com/"));
        assert!(!parsed.mobile);
    }

    #[test]
    fn rejects_other_roots() {
        let err = parse_url_fragment(b"<urlset><url/></urlset>").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot(name) if name == "urlset"));
    }

    #[test]
    fn rejects_unknown_children() {
        let err = parse_url_fragment(b"<url><image:image/></url>").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedElement(name) if name == "image:image"));
    }

    #[test]
    fn rejects_truncated_input() {
        // quick-xml may flag the unclosed tag itself
        assert!(matches!(
            parse_url_fragment(b"<url><loc>x</loc>").unwrap_err(),
            ParseError::UnexpectedEof | ParseError::XmlParse(_)
        ));
        assert!(matches!(
            parse_url_fragment(b"").unwrap_err(),
            ParseError::MissingRoot
        ));
    }
}
