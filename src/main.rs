//! Legal/tax news snapshot job — binary entrypoint.
//! Polls the configured feeds once and writes the JSON snapshot, then exits.

use anyhow::{Context, Result};
use legal_news_feed::{load_config_default, HttpFetcher};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact logs on stderr; stdout is reserved for the one-line summary.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("legal_news_feed=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = load_config_default().context("loading news config")?;
    let fetcher = HttpFetcher::from_config(&cfg.http).context("building http client")?;

    let summary = legal_news_feed::run(&fetcher, &cfg, chrono::Utc::now()).await?;
    println!("{}", summary.status_line());
    Ok(())
}
