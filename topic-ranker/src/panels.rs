use crate::pipeline::{TopicPipeline, TopicRanking};
use crate::profile::ProfileName;
use crate::traits::{DigestRequest, Retriever, Summarizer};
use crate::types::{Headline, Item, PanelDigest, Preferences, RankError, Result, SearchConfig};
use crate::utils::text::split_topics;
use crate::utils::time::time_ago;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelItem {
    #[serde(flatten)]
    pub item: Item,
    pub score: f64,
    pub time_ago: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelMeta {
    pub used_llm: bool,
    pub recent_window_hours: u32,
    pub profile: ProfileName,
    pub profile_fallback: bool,
}

/// One topic's block in the response: digest text plus the shortlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub title: String,
    #[serde(flatten)]
    pub digest: PanelDigest,
    pub items: Vec<PanelItem>,
    pub meta: PanelMeta,
}

impl Panel {
    fn without_items(topic: &str, summary_md: String, meta: PanelMeta) -> Self {
        Self {
            title: topic.to_string(),
            digest: PanelDigest {
                summary_md,
                ..PanelDigest::default()
            },
            items: Vec::new(),
            meta,
        }
    }
}

/// Search string sent to the retriever: the topic, nudged toward the
/// profile with its first two focus keywords.
pub fn enhance_query(topic: &str, pipeline: &TopicPipeline) -> String {
    let keywords = &pipeline.focus().keywords;
    if pipeline.profile_name().is_default() || keywords.is_empty() {
        return topic.to_string();
    }
    let context = keywords.iter().take(2).cloned().collect::<Vec<_>>().join(" OR ");
    format!("{} ({})", topic, context)
}

/// Answers a multi-topic search request: retrieve, rank and summarize each
/// topic independently.
pub struct PanelService {
    retriever: Arc<dyn Retriever>,
    summarizer: Arc<dyn Summarizer>,
    config: SearchConfig,
}

impl PanelService {
    pub fn new(retriever: Arc<dyn Retriever>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            retriever,
            summarizer,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(RankError::General("Search query is empty".to_string()));
        }

        let preferences = request.preferences.as_ref();
        let profile_name = request
            .profile
            .as_deref()
            .or_else(|| preferences.and_then(|p| p.default_profile.as_deref()))
            .map(ProfileName::from_name)
            .unwrap_or_default();

        let topics = split_topics(query, self.config.max_topics);
        info!(
            "Search request '{}': {} topics, profile={}, prefs={}",
            query,
            topics.len(),
            profile_name,
            preferences.is_some()
        );

        let pipeline = TopicPipeline::new(profile_name, preferences).with_max_links(self.config.max_links);
        let panels = join_all(
            topics
                .iter()
                .map(|topic| self.topic_panel(topic, &pipeline, preferences)),
        )
        .await;

        Ok(SearchResponse { panels })
    }

    async fn topic_panel(&self, topic: &str, pipeline: &TopicPipeline, preferences: Option<&Preferences>) -> Panel {
        match self.build_panel(topic, pipeline, preferences).await {
            Ok(panel) => panel,
            Err(e) => {
                error!("Panel for '{}' failed: {}", topic, e);
                Panel::without_items(
                    topic,
                    format!("Error: {}", e),
                    PanelMeta {
                        used_llm: false,
                        recent_window_hours: pipeline.effective_window_hours(),
                        profile: pipeline.profile_name(),
                        profile_fallback: false,
                    },
                )
            }
        }
    }

    async fn build_panel(&self, topic: &str, pipeline: &TopicPipeline, preferences: Option<&Preferences>) -> Result<Panel> {
        let search_query = enhance_query(topic, pipeline);
        let items = self.retriever.retrieve(&search_query, self.config.max_links).await?;
        info!(
            "{} returned {} items for '{}'",
            self.retriever.retriever_name(),
            items.len(),
            search_query
        );

        if items.is_empty() {
            return Ok(Panel::without_items(
                topic,
                format!("No recent news found for \"{}\".", topic),
                PanelMeta {
                    used_llm: false,
                    recent_window_hours: pipeline.effective_window_hours(),
                    profile: pipeline.profile_name(),
                    profile_fallback: false,
                },
            ));
        }

        let now = Utc::now();
        let ranking = pipeline.run_blocking(items, topic.to_string(), now).await?;

        let defaults = Preferences::default();
        let preferences = preferences.unwrap_or(&defaults);
        let digest_request = self.digest_request(&ranking, preferences);
        let digest = self.summarizer.summarize(&digest_request).await?;

        info!(
            "Panel '{}': {} ranked, {} insights, {} tags, summarizer={}",
            topic,
            ranking.ranked_items.len(),
            digest.insights.len(),
            digest.tags.len(),
            self.summarizer.summarizer_name()
        );

        Ok(Panel {
            title: topic.to_string(),
            items: panel_items(&ranking, preferences.display.links_to_show, now),
            meta: PanelMeta {
                used_llm: digest.used_llm,
                recent_window_hours: ranking.effective_window_hours,
                profile: pipeline.profile_name(),
                profile_fallback: ranking.profile_fallback,
            },
            digest,
        })
    }

    fn digest_request(&self, ranking: &TopicRanking, preferences: &Preferences) -> DigestRequest {
        let top = ranking.ranked_items.iter().take(self.config.digest_headlines);
        DigestRequest {
            topic: ranking.topic.clone(),
            headlines: top
                .clone()
                .map(|scored| Headline {
                    title: scored.item.title.clone(),
                    source: scored.item.source.clone(),
                })
                .collect(),
            urls: top.map(|scored| scored.item.url.clone()).collect(),
            style: preferences.search.summary_style,
            window_hours: ranking.effective_window_hours,
            allow_llm: preferences.search.use_open_ai,
        }
    }
}

fn panel_items(ranking: &TopicRanking, links_to_show: usize, now: DateTime<Utc>) -> Vec<PanelItem> {
    ranking
        .ranked_items
        .iter()
        .take(links_to_show)
        .map(|scored| PanelItem {
            item: scored.item.clone(),
            score: scored.score,
            time_ago: time_ago(scored.item.pub_date.as_deref(), now),
        })
        .collect()
}
