use serde::{Deserialize, Serialize};

pub use interfaces::defs::{
    DisplayPreferences, Headline, Item, PanelDigest, Preferences, RankingPreferences,
    SearchPreferences, SourcesMode, SummaryStyle,
};

/// Longest shortlist the pipeline will ever hand back.
pub const MAX_RANKED_ITEMS: usize = 20;

/// An item annotated by the booster and the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: Item,
    pub score: f64,
    #[serde(default)]
    pub focus_bonus: f64,
}

impl ScoredItem {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            score: 0.0,
            focus_bonus: 0.0,
        }
    }

    pub fn with_focus_bonus(mut self, focus_bonus: f64) -> Self {
        self.focus_bonus = focus_bonus;
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }
}

impl From<Item> for ScoredItem {
    fn from(item: Item) -> Self {
        Self::new(item)
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub region: String,
    pub language: String,
    pub country: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; TopicRanker/1.0)".to_string(),
            timeout_seconds: 15,
            max_retries: 2,
            retry_delay_seconds: 1,
            region: "US:en".to_string(),
            language: "en-US".to_string(),
            country: "US".to_string(),
        }
    }
}

/// Request-level limits for the panel service.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Retrieval cap per topic; also the recency prefilter's truncation length.
    pub max_links: usize,
    /// How many ranked headlines go to the summarizer.
    pub digest_headlines: usize,
    pub max_topics: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_links: 20,
            digest_headlines: 12,
            max_topics: 8,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RankError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Ranking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, RankError>;
