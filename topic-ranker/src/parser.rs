use crate::types::{Item, RankError, Result};
use feed_rs::parser;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::{debug, info};

static ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<item\b[^>]*>(.*?)</item>").expect("Invalid item regex"));
static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<link>(.*?)</link>").expect("Invalid link regex"));
static SOURCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<source\b[^>]*>(.*?)</source>").expect("Invalid source regex"));

/// Turns RSS/Atom documents into pipeline items.
pub struct FeedParser {
    seen_urls: HashSet<String>,
}

impl FeedParser {
    pub fn new() -> Self {
        Self {
            seen_urls: HashSet::new(),
        }
    }

    /// Parse `content` and return at most `max` items in document order.
    pub fn parse_items(&mut self, content: &str, max: usize) -> Result<Vec<Item>> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| RankError::Parse(format!("Failed to parse feed: {}", e)))?;
        let publishers = publisher_names(content);

        let mut items = Vec::new();
        for entry in feed.entries {
            if items.len() >= max {
                break;
            }
            if let Some(item) = self.parse_entry(entry, &publishers) {
                items.push(item);
            }
        }

        info!("Parsed feed with {} items", items.len());
        Ok(items)
    }

    fn parse_entry(&mut self, entry: feed_rs::model::Entry, publishers: &HashMap<String, String>) -> Option<Item> {
        // Entries without a title or a link are useless for ranking.
        let title = entry.title.map(|t| t.content.trim().to_string())?;
        if title.is_empty() {
            return None;
        }
        let url = entry.links.first()?.href.trim().to_string();

        if !self.seen_urls.insert(url.clone()) {
            debug!("Skipping duplicate entry with URL: {}", url);
            return None;
        }

        let source = publishers.get(&url).cloned();
        let pub_date = entry.published.or(entry.updated).map(|dt| dt.to_rfc3339());

        Some(Item {
            title,
            url,
            source,
            pub_date,
        })
    }
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Publisher name per item link, read from the text of RSS `<source>`
/// elements. feed-rs only keeps the element's `url` attribute.
fn publisher_names(content: &str) -> HashMap<String, String> {
    let mut names = HashMap::new();
    for item in ITEM_REGEX.captures_iter(content) {
        let body = &item[1];
        let (Some(link), Some(source)) = (LINK_REGEX.captures(body), SOURCE_REGEX.captures(body)) else {
            continue;
        };
        let name = element_text(&source[1]);
        if !name.is_empty() {
            names.entry(element_text(&link[1])).or_insert(name);
        }
    }
    names
}

fn element_text(raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix("<![CDATA[")
        .and_then(|s| s.strip_suffix("]]>"))
        .unwrap_or(raw);
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// One-shot parse with a fresh duplicate tracker.
pub fn parse_items(content: &str, max: usize) -> Result<Vec<Item>> {
    FeedParser::new().parse_items(content, max)
}
