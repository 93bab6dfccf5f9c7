// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod ingest;
pub mod snapshot;

use anyhow::Result;
use chrono::{DateTime, Utc};
use metrics::gauge;
use std::path::PathBuf;
use tracing::info;

use crate::ingest::config::NewsConfig;
use crate::ingest::types::{FeedFailure, FeedFetcher};

// ---- Re-exports for stable public API ----
pub use crate::ingest::config::{load_config_default, load_config_from};
pub use crate::ingest::fetch::{FetchError, HttpFetcher};
pub use crate::ingest::types::{FeedSource, OutputRecord, RawFeedItem};
pub use crate::snapshot::Snapshot;

/// What one run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub path: PathBuf,
    /// Deduplicated total (the snapshot's `count`).
    pub count: usize,
    /// Items actually written.
    pub written: usize,
    pub failures: Vec<FeedFailure>,
}

impl RunSummary {
    /// `OK news.json -> 12 items`
    pub fn status_line(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        format!("OK {name} -> {} items", self.written)
    }
}

/// Full job: ingest all feeds, build the snapshot at `now`, persist it.
/// Feed failures never fail the run; a write failure does.
pub async fn run(
    fetcher: &dyn FeedFetcher,
    cfg: &NewsConfig,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    let outcome = ingest::run_once(fetcher, cfg).await;
    let snapshot = Snapshot::build(now, outcome.records, cfg.output.max_items);
    snapshot.write_to(&cfg.output.path)?;

    gauge!("news_snapshot_items").set(snapshot.items.len() as f64);
    info!(
        path = %cfg.output.path.display(),
        count = snapshot.count,
        written = snapshot.items.len(),
        failed_feeds = outcome.failures.len(),
        "snapshot written"
    );

    Ok(RunSummary {
        path: cfg.output.path.clone(),
        count: snapshot.count,
        written: snapshot.items.len(),
        failures: outcome.failures,
    })
}
