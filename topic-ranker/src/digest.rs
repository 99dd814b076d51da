use crate::traits::{DigestRequest, Summarizer};
use crate::types::{PanelDigest, Result};
use async_trait::async_trait;
use interfaces::baseline::fallback_digest;
use tracing::debug;

/// Offline summarizer: derives the digest from the headlines themselves.
///
/// Used whenever no language model is configured or the user turned it off.
pub struct HeadlineSummarizer;

#[async_trait]
impl Summarizer for HeadlineSummarizer {
    fn summarizer_name(&self) -> String {
        "headline fallback".to_string()
    }

    async fn summarize(&self, request: &DigestRequest) -> Result<PanelDigest> {
        debug!(
            "Building headline digest for '{}' from {} headlines",
            request.topic,
            request.headlines.len()
        );
        Ok(fallback_digest(&request.headlines))
    }
}
