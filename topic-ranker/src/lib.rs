pub mod types;
pub mod utils;
pub mod profile;
pub mod focus;
pub mod recency;
pub mod scoring;
pub mod diversity;
pub mod dedupe;
pub mod pipeline;
pub mod traits;
pub mod parser;
pub mod fetcher;
pub mod digest;
pub mod panels;

pub use types::*;
pub use profile::{Profile, ProfileName, ProfileOverrides};
pub use focus::Focus;
pub use pipeline::{rank_topics, FocusDecision, TopicPipeline, TopicRanking};
pub use traits::{DigestRequest, Retriever, Summarizer};
pub use parser::FeedParser;
pub use fetcher::GoogleNewsRetriever;
pub use digest::HeadlineSummarizer;
pub use panels::{Panel, PanelService, SearchRequest, SearchResponse};
