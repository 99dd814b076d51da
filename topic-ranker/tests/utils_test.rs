mod common;

use chrono::Duration;
use common::fixed_now;
use topic_ranker::utils::time::{parse_pub_date, time_ago};
use topic_ranker::utils::url::{extract_domain, normalized_host};

#[test]
fn test_extract_domain() {
    assert_eq!(extract_domain("https://www.reuters.com/markets/x"), "reuters.com");
    assert_eq!(extract_domain("https://WWW.FT.com"), "ft.com");
    assert_eq!(extract_domain("http://news.bbc.co.uk/a"), "news.bbc.co.uk");
    assert_eq!(extract_domain("/relative/path"), "unknown");
    assert_eq!(extract_domain(""), "unknown");
    assert_eq!(normalized_host("mailto:desk@example.com").unwrap(), "");
}

#[test]
fn test_parse_pub_date_formats() {
    let rss = parse_pub_date("Fri, 14 Mar 2025 10:00:00 GMT");
    let atom = parse_pub_date("2025-03-14T10:00:00Z");
    assert!(rss.is_some());
    assert_eq!(rss, atom);
    assert_eq!(parse_pub_date("  "), None);
    assert_eq!(parse_pub_date("yesterday"), None);
}

#[test]
fn test_time_ago_labels() {
    let now = fixed_now();
    let ago = |d: Duration| time_ago(Some((now - d).to_rfc2822().as_str()), now);

    assert_eq!(ago(Duration::seconds(30)), "30s ago");
    assert_eq!(ago(Duration::minutes(5)), "5m ago");
    assert_eq!(ago(Duration::hours(3)), "3h ago");
    assert_eq!(ago(Duration::days(2)), "2d ago");
    assert_eq!(ago(Duration::weeks(3)), "3w ago");
    assert_eq!(time_ago(None, now), "");
}
