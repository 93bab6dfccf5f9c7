// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A feed to poll: short id (shown as `source` in the output) + URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedSource {
    pub id: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// One `<item>` as extracted from the feed body, fields untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFeedItem {
    pub title: String,
    pub link: String,
    pub pub_date: String, // raw, feed-specific format
    pub description: String,
}

/// Normalized item, the unit persisted in the snapshot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutputRecord {
    pub source: String,
    pub title: String,
    pub url: String,
    #[serde(with = "crate::snapshot::iso_millis_opt")]
    pub date: Option<DateTime<Utc>>,
    pub excerpt: String,
}

/// Per-feed failure kept for the run summary (already logged).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFailure {
    pub feed_id: String,
    pub message: String,
}

/// Retrieves the raw body of a feed.
#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}
