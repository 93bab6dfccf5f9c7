// tests/ingest_config.rs
use legal_news_feed::ingest::config::NewsConfig;
use legal_news_feed::load_config_from;
use std::fs;
use std::path::Path;

#[test]
fn shipped_config_matches_builtin_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/news.toml");
    let shipped = load_config_from(&path).unwrap();
    let builtin = NewsConfig::default().sanitized();

    assert_eq!(shipped.keywords, builtin.keywords);
    assert_eq!(shipped.feeds, builtin.feeds);
    assert_eq!(shipped.output.path, builtin.output.path);
    assert_eq!(shipped.output.max_items, 30);
    assert_eq!(shipped.http.user_agent, "news-bot/1.0");
}

#[test]
fn toml_and_json_files_load() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("news.toml");
    fs::write(
        &p_toml,
        r#"
keywords = ["VAT", " VAT "]

[[feeds]]
id = "EU"
url = "https://eu.test/rss"

[output]
path = "out/snap.json"
"#,
    )
    .unwrap();
    let t = load_config_from(&p_toml).unwrap();
    assert_eq!(t.keywords, vec!["VAT".to_string()]);
    assert_eq!(t.feeds.len(), 1);
    assert_eq!(t.output.path, Path::new("out/snap.json"));
    assert_eq!(t.output.excerpt_chars, 180);

    let p_json = dir.path().join("news.json");
    fs::write(&p_json, r#"{"http":{"user_agent":"custom/2.0"}}"#).unwrap();
    let j = load_config_from(&p_json).unwrap();
    assert_eq!(j.http.user_agent, "custom/2.0");
    assert_eq!(j.feeds.len(), 3);
}

#[test]
fn unreadable_path_is_an_error_naming_the_file() {
    let err = load_config_from(Path::new("definitely/missing/news.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("definitely/missing/news.toml"));
}
