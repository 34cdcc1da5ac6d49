use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use sitemap_core::url::{Entry, Field};

#[allow(dead_code)]
pub fn fixed_now() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0)
        .unwrap()
        .fixed_offset()
}

#[allow(dead_code)]
pub fn full_entry() -> Entry {
    let lastmod = FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 2, 3, 4, 5, 6)
        .unwrap();
    let expires = Utc.with_ymd_and_hms(2025, 6, 30, 18, 0, 0).unwrap();
    Entry::new()
        .with("loc", "https://example.com/articles?id=7&lang=en")
        .with("priority", 0.8)
        .with("changefreq", "daily")
        .with("lastmod", lastmod)
        .with("expires", expires)
        .with("mobile", true)
}

/// An entry carrying one value of the right kind for every schema field.
#[allow(dead_code)]
pub fn entry_with_every_field() -> Entry {
    let mut entry = full_entry();
    for field in [
        Field::Host,
        Field::Images,
        Field::Videos,
        Field::Geo,
        Field::News,
        Field::Alternate,
    ] {
        entry.insert(field.as_str(), "value");
    }
    entry.insert(Field::Alternates.as_str(), serde_json::Map::new());
    entry.insert(Field::Pagemap.as_str(), serde_json::Map::new());
    entry
}
