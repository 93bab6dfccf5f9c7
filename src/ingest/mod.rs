// src/ingest/mod.rs
pub mod config;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod rank;
pub mod rss;
pub mod types;

use crate::ingest::config::NewsConfig;
use crate::ingest::filter::KeywordFilter;
use crate::ingest::types::{FeedFailure, FeedFetcher, FeedSource, OutputRecord};
use metrics::{counter, describe_counter, describe_gauge};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up once a recorder is installed).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("news_items_parsed_total", "Items extracted from feed bodies.");
        describe_counter!(
            "news_items_kept_total",
            "Items kept after keyword filtering."
        );
        describe_counter!("news_dedup_total", "Items removed by URL deduplication.");
        describe_counter!("news_feed_errors_total", "Feed fetch failures.");
        describe_gauge!("news_snapshot_items", "Items written to the last snapshot.");
    });
}

/// Result of one pass over all feeds: ranked records + the feeds that failed.
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub records: Vec<OutputRecord>,
    pub failures: Vec<FeedFailure>,
    pub dedup_removed: usize,
}

/// Parse, strip, filter and normalize one feed body.
pub fn process_feed_body(
    feed: &FeedSource,
    body: &str,
    filter: &KeywordFilter,
    excerpt_chars: usize,
) -> Vec<OutputRecord> {
    let items = rss::parse_items(body);
    counter!("news_items_parsed_total").increment(items.len() as u64);

    let mut out = Vec::new();
    for it in items {
        let plain = normalize::strip_markup(&it.description);
        if !filter.matches(&it.title, &plain) {
            continue;
        }
        out.push(normalize::to_record(feed, it, &plain, excerpt_chars));
    }
    counter!("news_items_kept_total").increment(out.len() as u64);
    out
}

/// Poll every feed in order. A failing feed is logged and contributes nothing;
/// dedup and sort run once, after all feeds are done.
pub async fn run_once(fetcher: &dyn FeedFetcher, cfg: &NewsConfig) -> IngestOutcome {
    ensure_metrics_described();

    let filter = KeywordFilter::new(&cfg.keywords);
    let mut all = Vec::new();
    let mut failures = Vec::new();

    for feed in &cfg.feeds {
        match fetcher.fetch_text(&feed.url).await {
            Ok(body) => {
                let mut recs =
                    process_feed_body(feed, &body, &filter, cfg.output.excerpt_chars);
                tracing::debug!(feed = %feed.id, kept = recs.len(), "feed processed");
                all.append(&mut recs);
            }
            Err(e) => {
                tracing::error!(feed = %feed.id, "[{}] {:#}", feed.id, e);
                counter!("news_feed_errors_total").increment(1);
                failures.push(FeedFailure {
                    feed_id: feed.id.clone(),
                    message: format!("{e:#}"),
                });
            }
        }
    }

    let (records, dedup_removed) = rank::dedup_and_rank(all);
    counter!("news_dedup_total").increment(dedup_removed as u64);

    IngestOutcome {
        records,
        failures,
        dedup_removed,
    }
}
