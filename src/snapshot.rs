// src/snapshot.rs
//! The persisted artifact: `{ generatedAt, count, items }`, replaced on every run.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::ingest::types::OutputRecord;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(with = "iso_millis")]
    pub generated_at: DateTime<Utc>,
    /// Deduplicated total before truncation.
    pub count: usize,
    pub items: Vec<OutputRecord>,
}

impl Snapshot {
    /// `records` must already be deduplicated and sorted.
    pub fn build(now: DateTime<Utc>, mut records: Vec<OutputRecord>, max_items: usize) -> Self {
        let count = records.len();
        records.truncate(max_items);
        Self {
            generated_at: now,
            count,
            items: records,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing snapshot")
    }

    /// Write via a sibling temp file + rename, creating parent dirs first.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating output dir {}", dir.display()))?;
        }
        let body = self.to_json_pretty()?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = Path::new(&tmp);
        fs::write(tmp, body).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(tmp, path)
            .with_context(|| format!("moving {} into place", path.display()))?;
        Ok(())
    }
}

fn format_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// `2024-06-01T00:00:00.000Z`
pub(crate) mod iso_millis {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_iso(dt))
    }
}

pub(crate) mod iso_millis_opt {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => s.serialize_str(&format_iso(dt)),
            None => s.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rec(i: usize) -> OutputRecord {
        OutputRecord {
            source: "TS".into(),
            title: format!("t{i}"),
            url: format!("https://x/{i}"),
            date: None,
            excerpt: String::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn build_truncates_but_counts_everything() {
        let snap = Snapshot::build(now(), (0..45).map(rec).collect(), 30);
        assert_eq!(snap.count, 45);
        assert_eq!(snap.items.len(), 30);
        assert_eq!(snap.items[0].title, "t0");
        assert_eq!(snap.items[29].title, "t29");
    }

    #[test]
    fn json_shape_matches_contract() {
        let mut r = rec(1);
        r.date = Some(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap());
        let snap = Snapshot::build(now(), vec![r, rec(2)], 30);
        let v: serde_json::Value = serde_json::from_str(&snap.to_json_pretty().unwrap()).unwrap();

        assert_eq!(v["generatedAt"], "2024-06-01T12:00:00.000Z");
        assert_eq!(v["count"], 2);
        assert_eq!(v["items"][0]["date"], "2024-01-01T08:00:00.000Z");
        assert!(v["items"][1]["date"].is_null());
        let keys: Vec<&String> = v["items"][0].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 5);
        for k in ["source", "title", "url", "date", "excerpt"] {
            assert!(v["items"][0].get(k).is_some(), "missing {k}");
        }
    }

    #[test]
    fn pretty_output_uses_two_space_indent() {
        let snap = Snapshot::build(now(), vec![], 30);
        let s = snap.to_json_pretty().unwrap();
        assert!(s.contains("\n  \"count\": 0"));
        assert!(s.contains("\"items\": []"));
    }

    #[test]
    fn write_creates_dirs_and_replaces_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data").join("news.json");

        Snapshot::build(now(), (0..3).map(rec).collect(), 30)
            .write_to(&path)
            .unwrap();
        Snapshot::build(now(), vec![rec(9)], 30).write_to(&path).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["count"], 1);
        assert_eq!(v["items"][0]["title"], "t9");
        assert!(!tmp.path().join("data").join("news.json.tmp").exists());
    }

    #[test]
    fn unwritable_target_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        // parent "dir" is a regular file
        let blocker = tmp.path().join("data");
        fs::write(&blocker, "x").unwrap();
        let err = Snapshot::build(now(), vec![], 30).write_to(&blocker.join("news.json"));
        assert!(err.is_err());
    }
}
