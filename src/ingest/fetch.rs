// src/ingest/fetch.rs
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::ingest::config::HttpCfg;
use crate::ingest::types::FeedFetcher;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Fetch failed {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Fetch failed for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Plain HTTP GET fetcher with a fixed user agent and a bounded timeout.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn from_config(cfg: &HttpCfg) -> Result<Self> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(%url, "fetching feed");
        let network = |source: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).send().await.map_err(network)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        resp.text().await.map_err(network)
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        Ok(self.get_text(url).await?)
    }
}
