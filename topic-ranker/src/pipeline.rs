use crate::dedupe::finalize;
use crate::diversity::cap_per_domain;
use crate::focus::{self, hard_filter, soft_boost, Focus};
use crate::profile::{self, Profile, ProfileName, ProfileOverrides};
use crate::recency::prefilter;
use crate::scoring::{score, sort_by_score};
use crate::types::{Item, Preferences, Result, ScoredItem, SearchConfig};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fewest hard-filter hits that are trusted as the working pool.
pub const HARD_HIT_THRESHOLD: usize = 3;

/// How the profile focus was applied to a topic's pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusDecision {
    /// Enough items matched; only those go on.
    HardFiltered,
    /// Too few matches; every item goes on with a focus bonus attached.
    SoftBoosted,
    /// No focus applied.
    Unfiltered,
}

impl FocusDecision {
    pub fn decide(pool_len: usize, hard_hits: usize, profile_name: ProfileName) -> Self {
        if pool_len == 0 {
            return FocusDecision::Unfiltered;
        }
        match hard_hits {
            n if n >= HARD_HIT_THRESHOLD => FocusDecision::HardFiltered,
            0 if profile_name.is_default() => FocusDecision::Unfiltered,
            _ => FocusDecision::SoftBoosted,
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == FocusDecision::SoftBoosted
    }
}

/// Result of one topic's pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRanking {
    pub topic: String,
    pub ranked_items: Vec<ScoredItem>,
    pub profile_fallback: bool,
    pub effective_window_hours: u32,
    pub focus_decision: FocusDecision,
    pub hard_hits: usize,
}

/// The per-topic ranking pipeline for one profile and one set of preferences.
///
/// Holds only read-only configuration, so one instance can rank any number of
/// topics, in parallel or not.
#[derive(Debug, Clone)]
pub struct TopicPipeline {
    profile_name: ProfileName,
    profile: Profile,
    focus: Focus,
    max_links: usize,
}

impl TopicPipeline {
    pub fn new(profile_name: ProfileName, preferences: Option<&Preferences>) -> Self {
        let overrides = ProfileOverrides::from(preferences);
        Self {
            profile_name,
            profile: profile::resolve(profile_name, &overrides),
            focus: focus::resolve(profile_name),
            max_links: SearchConfig::default().max_links,
        }
    }

    pub fn with_max_links(mut self, max_links: usize) -> Self {
        self.max_links = max_links;
        self
    }

    pub fn profile_name(&self) -> ProfileName {
        self.profile_name
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn effective_window_hours(&self) -> u32 {
        self.profile.effective_window_hours()
    }

    pub fn run(&self, items: &[Item], topic: &str) -> TopicRanking {
        self.run_at(items, topic, Utc::now())
    }

    /// [`run_at`](Self::run_at) on tokio's blocking pool.
    pub async fn run_blocking(&self, items: Vec<Item>, topic: String, now: DateTime<Utc>) -> Result<TopicRanking> {
        let pipeline = self.clone();
        let ranking = tokio::task::spawn_blocking(move || pipeline.run_at(&items, &topic, now)).await?;
        Ok(ranking)
    }

    /// Rank `items` for `topic` as of `now`.
    pub fn run_at(&self, items: &[Item], topic: &str, now: DateTime<Utc>) -> TopicRanking {
        let window_hours = self.effective_window_hours();
        let pool = prefilter(items, window_hours, self.max_links, now);

        let hard_hits = hard_filter(&pool, &self.focus);
        let decision = FocusDecision::decide(pool.len(), hard_hits.len(), self.profile_name);
        info!(
            "Focus for '{}' ({}): pool={}, hard_hits={}, decision={:?}",
            topic,
            self.profile_name,
            pool.len(),
            hard_hits.len(),
            decision
        );

        let hard_hit_count = hard_hits.len();
        let focused: Vec<ScoredItem> = match decision {
            FocusDecision::HardFiltered => hard_hits.into_iter().map(ScoredItem::new).collect(),
            FocusDecision::SoftBoosted => soft_boost(&pool, &self.focus),
            FocusDecision::Unfiltered => pool.into_iter().map(ScoredItem::new).collect(),
        };

        let mut scored = score(focused, topic, &self.profile, now);
        sort_by_score(&mut scored);
        let capped = cap_per_domain(scored, self.profile.per_domain_cap);
        let ranked_items = finalize(capped, self.profile.dedupe_near_dupes);

        debug!("Ranked {} items for '{}'", ranked_items.len(), topic);

        TopicRanking {
            topic: topic.to_string(),
            ranked_items,
            profile_fallback: decision.is_fallback(),
            effective_window_hours: window_hours,
            focus_decision: decision,
            hard_hits: hard_hit_count,
        }
    }
}

/// Rank several topics at once on the blocking pool. Output order follows
/// `topics`.
pub async fn rank_topics(
    pipeline: &TopicPipeline,
    topics: Vec<(String, Vec<Item>)>,
) -> Result<Vec<TopicRanking>> {
    let now = Utc::now();
    join_all(
        topics
            .into_iter()
            .map(|(topic, items)| pipeline.run_blocking(items, topic, now)),
    )
    .await
    .into_iter()
    .collect()
}
