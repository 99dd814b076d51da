use crate::profile::Profile;
use crate::types::ScoredItem;
use crate::utils::time::{age_hours, parse_pub_date};
use crate::utils::url::extract_domain;
use chrono::{DateTime, Utc};
use tracing::debug;

// Saturation constants of the simplified BM25 curve: tf*(k1+1)/(tf+k1).
const K1: f64 = 1.2;
const K1_PLUS_ONE: f64 = 2.2;

/// Title-only BM25-style text match. Term frequency is the number of
/// non-overlapping literal occurrences of the term in the lowercase title.
pub fn text_score(title: &str, query: &str) -> f64 {
    let title = title.to_lowercase();
    query
        .to_lowercase()
        .split_whitespace()
        .map(|term| {
            let tf = title.matches(term).count() as f64;
            if tf > 0.0 {
                (tf * K1_PLUS_ONE) / (tf + K1)
            } else {
                0.0
            }
        })
        .sum()
}

/// Exponential freshness bonus on the signed age, zero past the window.
pub fn recency_boost(pub_date: Option<&str>, window_hours: u32, alpha: f64, now: DateTime<Utc>) -> f64 {
    if alpha == 0.0 || window_hours == 0 {
        return 0.0;
    }
    let Some(published) = pub_date.and_then(parse_pub_date) else {
        return 0.0;
    };

    let window = window_hours as f64;
    let age = age_hours(published, now);
    if age > window {
        return 0.0;
    }
    // Future timestamps have a negative age and score above alpha.
    alpha * (-age / window).exp()
}

pub fn source_prior(profile: &Profile, url: &str) -> f64 {
    profile
        .source_prior
        .get(&extract_domain(url))
        .copied()
        .unwrap_or(0.0)
}

/// Annotate every item with its total score. Input order is preserved;
/// sorting is left to the caller.
pub fn score(items: Vec<ScoredItem>, query: &str, profile: &Profile, now: DateTime<Utc>) -> Vec<ScoredItem> {
    let window_hours = profile.scoring_window_hours();

    let scored: Vec<ScoredItem> = items
        .into_iter()
        .map(|scored| {
            let item = &scored.item;
            let text = text_score(&item.title, query) * profile.bm25_weight;
            let recency = recency_boost(item.pub_date.as_deref(), window_hours, profile.recency_alpha, now);
            let prior = source_prior(profile, &item.url);
            let total = text + recency + prior + scored.focus_bonus;
            scored.with_score(total)
        })
        .collect();

    debug!("Scored {} items for query '{}'", scored.len(), query);
    scored
}

/// Stable sort by descending score; equal scores keep their incoming order.
pub fn sort_by_score(items: &mut [ScoredItem]) {
    // `sort_by` is a stable merge sort.
    items.sort_by(|a, b| b.score.total_cmp(&a.score));
}
