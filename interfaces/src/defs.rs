use serde::de::IgnoredAny;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// One candidate article as handed over by a retrieval collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    // Raw timestamp as it appeared in the feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcesMode {
    #[default]
    All,
    Allowlist,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    #[default]
    Short,
    Medium,
    Long,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchPreferences {
    #[serde(deserialize_with = "lenient_number")]
    pub time_window_hours: Option<f64>,
    pub sources_mode: SourcesMode,
    pub allowlist: Vec<String>,
    pub max_links: u32,
    pub summary_style: SummaryStyle,
    #[serde(rename = "useOpenAI")]
    pub use_open_ai: bool,
}

impl Default for SearchPreferences {
    fn default() -> Self {
        Self {
            time_window_hours: None,
            sources_mode: SourcesMode::All,
            allowlist: vec![],
            max_links: 12,
            summary_style: SummaryStyle::Short,
            use_open_ai: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankingPreferences {
    #[serde(deserialize_with = "lenient_number")]
    pub recency_alpha: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub per_domain_cap: Option<f64>,
    pub bm25_weight: f64,
    pub profile_alpha: f64,
    pub dedupe_near_dupes: bool,
}

impl Default for RankingPreferences {
    fn default() -> Self {
        Self {
            recency_alpha: None,
            per_domain_cap: None,
            bm25_weight: 1.0,
            profile_alpha: 0.0,
            dedupe_near_dupes: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayPreferences {
    pub links_to_show: usize,
    pub show_images: bool,
    pub show_meta: bool,
    pub show_debug_scores: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            links_to_show: 7,
            show_images: true,
            show_meta: true,
            show_debug_scores: false,
        }
    }
}

/// User settings as loaded by the client. Read-only for the ranking side.
///
/// The override fields (`search.time_window_hours`, `ranking.recency_alpha`,
/// `ranking.per_domain_cap`) stay `None` unless the user set them, so that an
/// absent value never masks a profile's own tuning. They are kept as raw
/// numbers; range and integer checks happen when a profile is resolved.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub search: SearchPreferences,
    pub ranking: RankingPreferences,
    pub display: DisplayPreferences,
    pub default_profile: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub source: Option<String>,
}

/// Structured narrative produced by a summarization collaborator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDigest {
    pub summary_md: String,
    pub insights: Vec<String>,
    pub takeaways: Vec<String>,
    pub actions: Vec<String>,
    pub watch: Vec<String>,
    pub tags: Vec<String>,
    pub used_llm: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrOther {
    Number(f64),
    Other(#[allow(dead_code)] IgnoredAny),
}

// A non-numeric override decodes as unset instead of rejecting the whole
// preferences object.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrOther>::deserialize(deserializer)? {
        Some(NumberOrOther::Number(n)) => Some(n),
        Some(NumberOrOther::Other(_)) | None => None,
    })
}

// Object style note:
// Everything in here is created fresh for one request and thrown away once the
// response is built. Nothing carries ranking state between requests.
