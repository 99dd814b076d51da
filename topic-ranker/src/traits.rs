use crate::types::{Headline, Item, PanelDigest, Result, SummaryStyle};
use async_trait::async_trait;

/// Source of raw candidate items for a search string (news feeds, APIs, etc.)
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Human-readable name for logs
    fn retriever_name(&self) -> String;

    /// Fetch at most `max` items for `query`, in the source's own order
    async fn retrieve(&self, query: &str, max: usize) -> Result<Vec<Item>>;
}

/// What a summarizer gets to see of a ranked shortlist.
#[derive(Debug, Clone)]
pub struct DigestRequest {
    pub topic: String,
    pub headlines: Vec<Headline>,
    pub urls: Vec<String>,
    pub style: SummaryStyle,
    pub window_hours: u32,
    /// Whether the user allows a language model to be used.
    pub allow_llm: bool,
}

/// Turns a ranked shortlist into narrative text. Never influences ranking.
#[async_trait]
pub trait Summarizer: Send + Sync {
    fn summarizer_name(&self) -> String;

    async fn summarize(&self, request: &DigestRequest) -> Result<PanelDigest>;
}
