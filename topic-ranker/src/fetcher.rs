use crate::parser::parse_items;
use crate::traits::Retriever;
use crate::types::{FetchConfig, Item, RankError, Result};
use async_trait::async_trait;
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use url::Url;

const GOOGLE_NEWS_SEARCH: &str = "https://news.google.com/rss/search";

/// Retrieval collaborator backed by the Google News RSS search endpoint.
pub struct GoogleNewsRetriever {
    client: Client,
    config: FetchConfig,
}

impl GoogleNewsRetriever {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, config })
    }

    /// Search URL for `query` in the configured locale.
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let url = Url::parse_with_params(
            GOOGLE_NEWS_SEARCH,
            &[
                ("q", query),
                ("hl", self.config.language.as_str()),
                ("gl", self.config.country.as_str()),
                ("ceid", self.config.region.as_str()),
            ],
        )?;
        Ok(url)
    }

    async fn fetch_feed(&self, url: &Url) -> Result<String> {
        let start_time = Instant::now();
        let delay = Duration::from_secs(self.config.retry_delay_seconds);
        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: delay,
            initial_interval: delay,
            max_interval: delay * 16,
            multiplier: 2.0,
            max_elapsed_time: Some(delay * 60),
            ..Default::default()
        };

        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.client.get(url.clone()).send().await {
                Ok(response) if response.status().is_success() => {
                    let content = response.text().await?;
                    debug!(
                        "Fetched {} bytes in {}ms",
                        content.len(),
                        start_time.elapsed().as_millis()
                    );
                    return Ok(content);
                }
                Ok(response) => {
                    let status = response.status();
                    last_error = Some(RankError::General(format!(
                        "HTTP {}: {}",
                        status,
                        status.canonical_reason().unwrap_or("Unknown")
                    )));
                }
                Err(e) => {
                    last_error = Some(RankError::Http(e));
                }
            }

            if attempt < self.config.max_retries {
                if let Some(delay) = backoff.next_backoff() {
                    warn!("Attempt {} failed for {}, retrying in {:?}", attempt + 1, url, delay);
                    tokio::time::sleep(delay).await;
                    continue;
                }
            }
            break;
        }

        error!(
            "Failed to fetch {} after {} attempts",
            url,
            self.config.max_retries + 1
        );
        Err(last_error.unwrap_or_else(|| RankError::General("Unknown fetch error".to_string())))
    }
}

#[async_trait]
impl Retriever for GoogleNewsRetriever {
    fn retriever_name(&self) -> String {
        "Google News RSS".to_string()
    }

    async fn retrieve(&self, query: &str, max: usize) -> Result<Vec<Item>> {
        let url = self.search_url(query)?;
        let content = self.fetch_feed(&url).await?;
        let items = parse_items(&content, max)?;
        info!("Retrieved {} items for '{}'", items.len(), query);
        Ok(items)
    }
}
