use crate::types::Item;
use crate::utils::time::parse_pub_date;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Below this many recent items the window is considered too quiet and the
/// unfiltered list is used instead.
pub const MIN_RECENT_ITEMS: usize = 6;

/// Narrow `items` to those published within `window_hours` of `now`.
///
/// Items without a usable timestamp count as recent. When fewer than
/// [`MIN_RECENT_ITEMS`] survive, the input list is used. Either way the
/// result is cut to `max_links`.
pub fn prefilter(items: &[Item], window_hours: u32, max_links: usize, now: DateTime<Utc>) -> Vec<Item> {
    let window = Duration::hours(window_hours as i64);

    let recent: Vec<&Item> = items
        .iter()
        .filter(|item| match item.pub_date.as_deref().and_then(parse_pub_date) {
            Some(published) => now.signed_duration_since(published) <= window,
            None => true,
        })
        .collect();

    debug!(
        "Recency prefilter: {}/{} items within {}h",
        recent.len(),
        items.len(),
        window_hours
    );

    if recent.len() >= MIN_RECENT_ITEMS {
        recent.into_iter().take(max_links).cloned().collect()
    } else {
        items.iter().take(max_links).cloned().collect()
    }
}
