// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::types::FeedSource;

pub const ENV_CONFIG_PATH: &str = "NEWS_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/news.toml";
pub const DEFAULT_JSON_PATH: &str = "config/news.json";

pub const DEFAULT_OUTPUT_PATH: &str = "data/news.json";
pub const DEFAULT_MAX_ITEMS: usize = 30;
pub const DEFAULT_EXCERPT_CHARS: usize = 180;
pub const DEFAULT_USER_AGENT: &str = "news-bot/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

const DEFAULT_KEYWORDS: &[&str] = &[
    "TEAC",
    "TEAR",
    "TS",
    "Tribunal Supremo",
    "Audiencia Nacional",
    "TJUE",
    "CJEU",
    "IRPF",
    "LIRPF",
    "7p",
    "Beckham",
    "impatriados",
    "IRNR",
    "LIRNR",
    "LIS",
    "IS",
    "IVA",
    "LIVA",
    "inspección",
    "comprobación",
    "sanción",
    "LGT",
    "Modelo 210",
    "Modelo 720",
    "VAT",
    "direct taxation",
];

const DEFAULT_FEEDS: &[(&str, &str)] = &[
    (
        "TS",
        "https://www.poderjudicial.es/cgpj/es/Poder-Judicial/Tribunal-Supremo/ch.En-Portada.formato1/",
    ),
    (
        "AN",
        "https://www.poderjudicial.es/cgpj/es/Poder-Judicial/Audiencia-Nacional/ch.En-Portada.formato1/",
    ),
    (
        "TJUE",
        "https://curia.europa.eu/jcms/rss/press-releases/en.xml",
    ),
];

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_feeds() -> Vec<FeedSource> {
    DEFAULT_FEEDS
        .iter()
        .map(|(id, url)| FeedSource::new(*id, *url))
        .collect()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}
fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}
fn default_excerpt_chars() -> usize {
    DEFAULT_EXCERPT_CHARS
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedSource>,
    #[serde(default)]
    pub output: OutputCfg,
    #[serde(default)]
    pub http: HttpCfg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputCfg {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpCfg {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            feeds: default_feeds(),
            output: OutputCfg::default(),
            http: HttpCfg::default(),
        }
    }
}

impl Default for OutputCfg {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            max_items: DEFAULT_MAX_ITEMS,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl Default for HttpCfg {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl NewsConfig {
    /// Trim/dedup keywords, drop unusable feeds, and pull out-of-range
    /// numbers back to something sane.
    pub fn sanitized(mut self) -> Self {
        self.keywords = clean_list(self.keywords);

        self.feeds.retain(|f| {
            let ok = !f.id.trim().is_empty() && !f.url.trim().is_empty();
            if !ok {
                tracing::warn!(feed = %f.id, url = %f.url, "dropping feed with empty id or url");
            }
            ok
        });
        for f in &mut self.feeds {
            f.id = f.id.trim().to_string();
            f.url = f.url.trim().to_string();
        }

        if self.output.max_items == 0 {
            self.output.max_items = DEFAULT_MAX_ITEMS;
        }
        if self.output.excerpt_chars == 0 {
            self.output.excerpt_chars = DEFAULT_EXCERPT_CHARS;
        }
        if self.http.user_agent.trim().is_empty() {
            self.http.user_agent = default_user_agent();
        }
        self.http.timeout_secs = self.http.timeout_secs.clamp(1, 120);
        self
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<NewsConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading news config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing news config {}", path.display()))
}

/// Load config using env var + fallbacks:
/// 1) $NEWS_CONFIG_PATH
/// 2) config/news.toml
/// 3) config/news.json
/// 4) built-in defaults
pub fn load_config_default() -> Result<NewsConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from(DEFAULT_JSON_PATH);
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    Ok(NewsConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<NewsConfig> {
    let cfg = if hint_ext == "json" {
        serde_json::from_str::<NewsConfig>(s)
            .map_err(anyhow::Error::from)
            .or_else(|e| toml::from_str::<NewsConfig>(s).map_err(|_| e))?
    } else {
        toml::from_str::<NewsConfig>(s)
            .map_err(anyhow::Error::from)
            .or_else(|e| serde_json::from_str::<NewsConfig>(s).map_err(|_| e))?
    };
    Ok(cfg.sanitized())
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    use std::collections::BTreeSet;
    let mut set = BTreeSet::new();
    for it in items {
        let t = it.trim();
        if !t.is_empty() {
            set.insert(t.to_string());
        }
    }
    set.into_iter().collect()
}
