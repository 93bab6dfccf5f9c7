// src/ingest/rss.rs
//! Minimal RSS 2.0 item extraction.
//!
//! Works on raw text segments rather than a full XML tree: each `<item>` block is cut
//! out and the four fields are pulled with anchored regexes. Missing or broken tags
//! yield empty strings, and items without a title or link are dropped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ingest::types::RawFeedItem;

static RE_ITEM_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<item(?:\s[^>]*)?>").unwrap());

static RE_TITLE_CDATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<title><!\[CDATA\[(.*?)\]\]></title>").unwrap());
static RE_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<title>(.*?)</title>").unwrap());
static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"<link>(.*?)</link>").unwrap());
static RE_PUB_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<pubDate>(.*?)</pubDate>").unwrap());
static RE_DESC_CDATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<description><!\[CDATA\[(.*?)\]\]></description>").unwrap());
static RE_DESC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<description>(.*?)</description>").unwrap());

fn capture<'a>(re: &Regex, block: &'a str) -> Option<&'a str> {
    re.captures(block)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn first_of<'a>(block: &'a str, patterns: &[&Regex]) -> String {
    patterns
        .iter()
        .find_map(|re| capture(re, block))
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Parse a single `<item>` body (everything after the opening tag).
pub fn parse_item_block(block: &str) -> RawFeedItem {
    let block = match block.find("</item>") {
        Some(end) => &block[..end],
        None => block,
    };
    RawFeedItem {
        title: first_of(block, &[&*RE_TITLE_CDATA, &*RE_TITLE]),
        link: first_of(block, &[&*RE_LINK]),
        pub_date: first_of(block, &[&*RE_PUB_DATE]),
        description: first_of(block, &[&*RE_DESC_CDATA, &*RE_DESC]),
    }
}

/// Extract all usable items in document order.
pub fn parse_items(xml: &str) -> Vec<RawFeedItem> {
    let mut out = Vec::new();
    let mut opens = RE_ITEM_OPEN.find_iter(xml).peekable();
    while let Some(m) = opens.next() {
        let end = opens.peek().map(|n| n.start()).unwrap_or(xml.len());
        let item = parse_item_block(&xml[m.end()..end]);
        if item.title.is_empty() || item.link.is_empty() {
            continue;
        }
        out.push(item);
    }
    out
}
