//! Last-modified filtering of sitemap entries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::SitemapEntry;

/// Parses a W3C datetime as used in `<lastmod>`.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, and `YYYY-MM-DDThh:mm[:ss[.f]]`
/// with `Z`, a numeric offset, or no zone at all (read as UTC). Returns
/// `None` for anything else.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // W3C allows hh:mm without seconds; normalize `Z` so `%:z` can read it
    let zoned = match value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_str(&zoned, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    let date = match value.len() {
        4 => NaiveDate::parse_from_str(&format!("{value}-01-01"), "%Y-%m-%d"),
        7 => NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"),
        _ => NaiveDate::parse_from_str(value, "%Y-%m-%d"),
    }
    .ok()?;
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

/// Keeps the locations of entries modified at or after `cutoff`.
///
/// Without a cutoff every location is returned. With one, entries lacking a
/// readable `lastmod` are dropped. Source order is preserved.
pub fn filter_since(entries: &[SitemapEntry], cutoff: Option<DateTime<Utc>>) -> Vec<String> {
    match cutoff {
        None => entries.iter().map(|entry| entry.loc.clone()).collect(),
        Some(cutoff) => entries
            .iter()
            .filter(|entry| {
                entry
                    .last_modified()
                    .is_some_and(|modified| modified >= cutoff)
            })
            .map(|entry| entry.loc.clone())
            .collect(),
    }
}
