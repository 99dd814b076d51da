use crate::profile::ProfileName;
use crate::types::{Item, ScoredItem};
use crate::utils::text::tokenize;
use crate::utils::url::normalized_host;
use std::collections::BTreeSet;
use tracing::debug;

/// Bonus for a title that mentions one of the focus keywords.
pub const KEYWORD_BONUS: f64 = 0.25;
/// Bonus for an item hosted on one of the focus domains.
pub const DOMAIN_BONUS: f64 = 0.35;

/// Keyword and domain affinity of a profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Focus {
    /// Lowercase, deduplicated, in table order.
    pub keywords: Vec<String>,
    /// Bare hostnames without `www.`.
    pub allow_domains: BTreeSet<String>,
}

impl Focus {
    pub fn new<K, D>(keywords: K, allow_domains: D) -> Self
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !ordered.contains(&keyword) {
                ordered.push(keyword);
            }
        }

        let allow_domains = allow_domains
            .into_iter()
            .map(|d| {
                let d = d.as_ref().trim().to_lowercase();
                d.strip_prefix("www.").map(str::to_string).unwrap_or(d)
            })
            .filter(|d| !d.is_empty())
            .collect();

        Self {
            keywords: ordered,
            allow_domains,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.allow_domains.is_empty()
    }

    /// Title mentions a keyword, as a whole token or anywhere as a substring.
    pub fn keyword_hit(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        let tokens = tokenize(&title);
        self.keywords
            .iter()
            .any(|k| tokens.contains(&k.as_str()) || title.contains(k.as_str()))
    }

    pub fn domain_hit(&self, host: &str) -> bool {
        self.allow_domains.contains(host)
    }

    /// Match an item against both conditions. `None` when the URL does not
    /// parse, which callers treat as "no match at all".
    fn matches(&self, item: &Item) -> Option<FocusMatch> {
        let host = normalized_host(&item.url).ok()?;
        Some(FocusMatch {
            keyword: self.keyword_hit(&item.title),
            domain: self.domain_hit(&host),
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct FocusMatch {
    keyword: bool,
    domain: bool,
}

impl FocusMatch {
    fn any(&self) -> bool {
        self.keyword || self.domain
    }

    fn bonus(&self) -> f64 {
        let mut bonus = 0.0;
        if self.keyword {
            bonus += KEYWORD_BONUS;
        }
        if self.domain {
            bonus += DOMAIN_BONUS;
        }
        bonus
    }
}

/// Focus table for a profile. The default profile has no focus.
pub fn resolve(name: ProfileName) -> Focus {
    match name {
        ProfileName::Technology => Focus::new(
            [
                "chip", "semiconductor", "iphone", "android", "ai", "software", "gpu", "cloud",
                "data center", "app", "startup", "tech", "computing", "verge", "crunch",
            ],
            [
                "techcrunch.com", "theverge.com", "wired.com", "arstechnica.com", "anandtech.com",
                "tomshardware.com", "semianalysis.com", "9to5mac.com", "engadget.com",
            ],
        ),
        ProfileName::Ai => Focus::new(
            [
                "ai", "llm", "model", "gpt", "agent", "ml", "machine learning", "openai",
                "anthropic", "deepmind", "hugging face", "inference", "training",
            ],
            [
                "openai.com", "anthropic.com", "huggingface.co", "deepmind.google",
                "semianalysis.com", "arxiv.org", "paperswithcode.com",
            ],
        ),
        ProfileName::Finance => Focus::new(
            [
                "markets", "stocks", "bond", "fed", "inflation", "earnings", "ipo", "m&a",
                "commodities", "economy",
            ],
            [
                "reuters.com", "bloomberg.com", "ft.com", "wsj.com", "marketwatch.com", "cnbc.com",
            ],
        ),
        ProfileName::Sports => Focus::new(
            [
                "sports", "game", "team", "player", "coach", "season", "league", "nfl", "nba",
                "mlb", "nhl", "soccer", "football", "basketball", "baseball", "hockey",
                "championship", "playoff", "tournament",
            ],
            [
                "espn.com", "si.com", "bleacherreport.com", "sports.yahoo.com", "cbssports.com",
                "nfl.com", "nba.com", "mlb.com",
            ],
        ),
        ProfileName::World => Focus::new(
            [
                "international", "global", "country", "nation", "foreign", "diplomatic", "treaty",
                "summit", "conflict", "war", "peace", "united nations", "embassy", "minister",
                "president", "prime minister",
            ],
            [
                "reuters.com", "bbc.com", "apnews.com", "aljazeera.com", "dw.com", "france24.com",
            ],
        ),
        ProfileName::Default => Focus::default(),
    }
}

/// Keep only items matching the focus. An empty focus keeps everything.
pub fn hard_filter(items: &[Item], focus: &Focus) -> Vec<Item> {
    if focus.is_empty() {
        return items.to_vec();
    }

    let kept: Vec<Item> = items
        .iter()
        .filter(|item| focus.matches(item).map(|m| m.any()).unwrap_or(false))
        .cloned()
        .collect();

    debug!("Hard focus filter kept {}/{} items", kept.len(), items.len());
    kept
}

/// Keep every item and attach a focus bonus instead of filtering.
pub fn soft_boost(items: &[Item], focus: &Focus) -> Vec<ScoredItem> {
    items
        .iter()
        .map(|item| {
            let bonus = focus.matches(item).map(|m| m.bonus()).unwrap_or(0.0);
            ScoredItem::new(item.clone()).with_focus_bonus(bonus)
        })
        .collect()
}
