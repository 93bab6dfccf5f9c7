// src/ingest/normalize.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::OnceCell;
use regex::Regex;
use time::{format_description::well_known::Rfc2822, OffsetDateTime, UtcOffset};

use crate::ingest::types::{FeedSource, OutputRecord, RawFeedItem};

pub const ELLIPSIS: char = '…';

/// Best-effort plain text: tags become spaces, whitespace collapses, ends trimmed.
/// Entities are left as-is.
pub fn strip_markup(html: &str) -> String {
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    let out = re_tags.replace_all(html, " ");

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&out, " ").trim().to_string()
}

/// First `max_chars` code points, plus `…` when something was cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&text[..cut]);
            out.push(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}

fn parse_rfc2822_time(ts: &str) -> Option<DateTime<Utc>> {
    let dt = OffsetDateTime::parse(ts, &Rfc2822)
        .ok()?
        .to_offset(UtcOffset::UTC);
    let nanos = dt.unix_timestamp_nanos();
    let secs = i64::try_from(nanos.div_euclid(1_000_000_000)).ok()?;
    let sub = u32::try_from(nanos.rem_euclid(1_000_000_000)).ok()?;
    Utc.timestamp_opt(secs, sub).single()
}

/// Permissive date parsing; `None` when nothing fits.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(dt) = parse_rfc2822_time(s) {
        return Some(dt);
    }
    // chrono also takes obsolete zone names (EST, GMT, UT...)
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Turn a raw item into its output record. `plain_description` is the
/// already-stripped description (the filter needs it too).
pub fn to_record(
    feed: &FeedSource,
    item: RawFeedItem,
    plain_description: &str,
    excerpt_chars: usize,
) -> OutputRecord {
    OutputRecord {
        source: feed.id.clone(),
        date: parse_pub_date(&item.pub_date),
        title: item.title,
        url: item.link,
        excerpt: excerpt(plain_description, excerpt_chars),
    }
}
