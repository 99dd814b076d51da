#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Once;
use topic_ranker::Item;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init()
            .ok();
    });
}

/// Reference clock shared by every recency-sensitive test.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
}

/// Item without a publish time.
pub fn item(title: &str, url: &str) -> Item {
    Item {
        title: title.to_string(),
        url: url.to_string(),
        source: None,
        pub_date: None,
    }
}

/// Item published `hours_ago` hours before [`fixed_now`], in RSS date format.
pub fn item_aged(title: &str, url: &str, hours_ago: i64) -> Item {
    Item {
        pub_date: Some((fixed_now() - Duration::hours(hours_ago)).to_rfc2822()),
        ..item(title, url)
    }
}

pub fn titles<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a topic_ranker::ScoredItem>,
{
    items.into_iter().map(|s| s.item.title.clone()).collect()
}
