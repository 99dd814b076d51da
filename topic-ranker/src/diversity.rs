use crate::types::ScoredItem;
use crate::utils::url::extract_domain;
use std::collections::HashMap;
use tracing::debug;

/// Walk a score-sorted list once and keep at most `per_domain_cap` items per
/// normalized domain. Unparseable URLs all share the `unknown` domain.
pub fn cap_per_domain(sorted_items: Vec<ScoredItem>, per_domain_cap: u32) -> Vec<ScoredItem> {
    let cap = per_domain_cap.max(1) as usize;
    let total = sorted_items.len();
    let mut domain_counts: HashMap<String, usize> = HashMap::new();

    let capped: Vec<ScoredItem> = sorted_items
        .into_iter()
        .filter(|scored| {
            let count = domain_counts.entry(extract_domain(&scored.item.url)).or_insert(0);
            if *count < cap {
                *count += 1;
                true
            } else {
                false
            }
        })
        .collect();

    debug!("Domain cap {} kept {}/{} items", cap, capped.len(), total);
    capped
}
