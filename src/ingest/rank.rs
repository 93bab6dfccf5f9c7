// src/ingest/rank.rs
use std::collections::HashSet;

use crate::ingest::types::OutputRecord;

/// Stable dedup on `url`: the first record seen wins.
/// Returns (kept, removed_count).
pub fn dedup_by_url(records: Vec<OutputRecord>) -> (Vec<OutputRecord>, usize) {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut keep = Vec::with_capacity(records.len());
    let mut dropped = 0usize;
    for rec in records {
        if !seen.insert(rec.url.clone()) {
            dropped += 1;
            continue;
        }
        keep.push(rec);
    }
    (keep, dropped)
}

/// Newest first; undated records go last and keep their relative order.
pub fn sort_by_recency(records: &mut [OutputRecord]) {
    // None < Some(_) for Option, so reversing the comparison puts None last.
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

pub fn dedup_and_rank(records: Vec<OutputRecord>) -> (Vec<OutputRecord>, usize) {
    let (mut kept, dropped) = dedup_by_url(records);
    sort_by_recency(&mut kept);
    (kept, dropped)
}
