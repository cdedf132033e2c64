//! Grouping, activity ranking and load ratios
//!
//! Keys are entity codes (gateway code for network reports, sensor code for
//! gateway reports). Results use `BTreeMap` / sorted vectors so output order
//! is stable across runs.

use crate::utils::math::safe_ratio;
use std::collections::BTreeMap;

/// Count `items` per key
pub fn count_by_key<T, F>(items: &[T], key_of: F) -> BTreeMap<String, u64>
where
    F: Fn(&T) -> &str,
{
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for item in items {
        *counts.entry(key_of(item).to_string()).or_insert(0) += 1;
    }
    counts
}

/// Keys attaining the maximum count (ties preserved)
pub fn most_active(counts: &BTreeMap<String, u64>) -> Vec<String> {
    match counts.values().max() {
        Some(&max) => keys_with_count(counts, max),
        None => Vec::new(),
    }
}

/// Keys attaining the minimum count (ties preserved)
pub fn least_active(counts: &BTreeMap<String, u64>) -> Vec<String> {
    match counts.values().min() {
        Some(&min) => keys_with_count(counts, min),
        None => Vec::new(),
    }
}

fn keys_with_count(counts: &BTreeMap<String, u64>, target: u64) -> Vec<String> {
    counts
        .iter()
        .filter(|(_, &count)| count == target)
        .map(|(key, _)| key.clone())
        .collect()
}

/// Share of `total` per key; empty when `total` is zero
pub fn load_ratios(counts: &BTreeMap<String, u64>, total: u64) -> BTreeMap<String, f64> {
    counts
        .iter()
        .filter_map(|(key, &count)| safe_ratio(count, total).map(|ratio| (key.clone(), ratio)))
        .collect()
}
