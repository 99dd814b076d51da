use crate::types::{ScoredItem, MAX_RANKED_ITEMS};
use std::collections::HashSet;
use tracing::debug;

const SIGNATURE_WORDS: usize = 5;

/// First five words of the title after lowercasing and stripping everything
/// but ASCII letters, digits and whitespace.
pub fn title_signature(title: &str) -> String {
    let normalized: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    normalized
        .split_whitespace()
        .take(SIGNATURE_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop later items whose title signature was already seen.
pub fn collapse_near_duplicates(items: Vec<ScoredItem>) -> Vec<ScoredItem> {
    let total = items.len();
    let mut seen = HashSet::new();

    let mut unique: Vec<ScoredItem> = items
        .into_iter()
        .filter(|scored| seen.insert(title_signature(&scored.item.title)))
        .collect();
    unique.truncate(MAX_RANKED_ITEMS);

    debug!("Near-duplicate collapse kept {}/{} items", unique.len(), total);
    unique
}

/// Last stage of the pipeline: optional collapse, always the length cap.
pub fn finalize(mut items: Vec<ScoredItem>, dedupe_near_dupes: bool) -> Vec<ScoredItem> {
    if dedupe_near_dupes {
        return collapse_near_duplicates(items);
    }
    items.truncate(MAX_RANKED_ITEMS);
    items
}
