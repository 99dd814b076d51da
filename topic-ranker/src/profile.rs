use crate::types::Preferences;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// The fixed set of ranking profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileName {
    #[default]
    Default,
    Technology,
    Finance,
    Ai,
    Sports,
    World,
}

impl ProfileName {
    pub const ALL: [ProfileName; 6] = [
        ProfileName::Default,
        ProfileName::Technology,
        ProfileName::Finance,
        ProfileName::Ai,
        ProfileName::Sports,
        ProfileName::World,
    ];

    /// Lenient lookup: anything unrecognised is the default profile.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "technology" => ProfileName::Technology,
            "finance" => ProfileName::Finance,
            "ai" => ProfileName::Ai,
            "sports" => ProfileName::Sports,
            "world" => ProfileName::World,
            _ => ProfileName::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileName::Default => "default",
            ProfileName::Technology => "technology",
            ProfileName::Finance => "finance",
            ProfileName::Ai => "ai",
            ProfileName::Sports => "sports",
            ProfileName::World => "world",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == ProfileName::Default
    }
}

impl From<&str> for ProfileName {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring weights and thresholds for one topic category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub bm25_weight: f64,
    pub recency_alpha: f64,
    /// Never below 1.
    pub per_domain_cap: u32,
    pub source_prior: BTreeMap<String, f64>,
    pub dedupe_near_dupes: bool,
    pub window_hours: Option<u32>,
}

impl Profile {
    fn base(name: ProfileName) -> Self {
        match name {
            ProfileName::Technology => Self {
                bm25_weight: 1.2,
                recency_alpha: 0.35,
                per_domain_cap: 1,
                source_prior: priors(&[
                    ("techcrunch.com", 0.30),
                    ("theverge.com", 0.25),
                    ("wired.com", 0.25),
                    ("arstechnica.com", 0.30),
                    ("anandtech.com", 0.35),
                ]),
                dedupe_near_dupes: true,
                window_hours: Some(48),
            },
            ProfileName::Finance => Self {
                bm25_weight: 1.0,
                recency_alpha: 0.40,
                per_domain_cap: 1,
                source_prior: priors(&[
                    ("reuters.com", 0.35),
                    ("bloomberg.com", 0.35),
                    ("ft.com", 0.40),
                    ("wsj.com", 0.30),
                ]),
                dedupe_near_dupes: true,
                window_hours: Some(36),
            },
            ProfileName::Ai => Self {
                bm25_weight: 1.1,
                recency_alpha: 0.30,
                per_domain_cap: 1,
                source_prior: priors(&[
                    ("semianalysis.com", 0.40),
                    ("huggingface.co", 0.25),
                    ("arxiv.org", 0.25),
                    ("openai.com", 0.20),
                ]),
                dedupe_near_dupes: true,
                window_hours: Some(72),
            },
            // Sports and world only differ from the default in their focus.
            ProfileName::Default | ProfileName::Sports | ProfileName::World => Self {
                bm25_weight: 1.0,
                recency_alpha: 0.22,
                per_domain_cap: 2,
                source_prior: BTreeMap::new(),
                dedupe_near_dupes: true,
                window_hours: Some(48),
            },
        }
    }

    /// Window used by the prefilter and reported back to the caller.
    pub fn effective_window_hours(&self) -> u32 {
        self.window_hours.unwrap_or(72)
    }

    /// Window used by the recency decay in the scorer.
    pub fn scoring_window_hours(&self) -> u32 {
        self.window_hours.unwrap_or(48)
    }
}

fn priors(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(domain, bonus)| (domain.to_string(), *bonus))
        .collect()
}

/// Per-request adjustments taken from the user's preferences.
///
/// Each field is checked on its own before it replaces the profile value;
/// a bad field is skipped, the rest still apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileOverrides {
    pub per_domain_cap: Option<u32>,
    pub recency_alpha: Option<f64>,
    pub window_hours: Option<u32>,
}

impl ProfileOverrides {
    /// Take the raw numeric overrides from `preferences`. Counts that are not
    /// whole non-negative numbers are dropped here with a warning.
    pub fn from_preferences(preferences: &Preferences) -> Self {
        Self {
            per_domain_cap: whole_number(preferences.ranking.per_domain_cap, "perDomainCap"),
            recency_alpha: preferences.ranking.recency_alpha,
            window_hours: whole_number(preferences.search.time_window_hours, "timeWindowHours"),
        }
    }
}

fn whole_number(value: Option<f64>, field: &str) -> Option<u32> {
    let value = value?;
    if value.is_finite() && value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        warn!("Ignoring {} override {}: not a whole number", field, value);
        None
    }
}

impl From<Option<&Preferences>> for ProfileOverrides {
    fn from(preferences: Option<&Preferences>) -> Self {
        preferences.map(Self::from_preferences).unwrap_or_default()
    }
}

/// Build a fresh profile for `name` with the valid `overrides` applied.
pub fn resolve(name: ProfileName, overrides: &ProfileOverrides) -> Profile {
    let mut profile = Profile::base(name);

    match overrides.per_domain_cap {
        Some(cap) if cap >= 1 => profile.per_domain_cap = cap,
        Some(cap) => warn!("Ignoring per-domain cap override {} for profile {}", cap, name),
        None => {}
    }

    match overrides.recency_alpha {
        Some(alpha) if alpha.is_finite() && alpha > 0.0 && alpha <= 1.0 => {
            profile.recency_alpha = alpha
        }
        // Zero counts as "not set", same as an absent value.
        Some(alpha) if alpha == 0.0 => {}
        Some(alpha) => warn!("Ignoring recency alpha override {} for profile {}", alpha, name),
        None => {}
    }

    match overrides.window_hours {
        Some(hours) if hours > 0 => profile.window_hours = Some(hours),
        _ => {}
    }

    debug!(
        "Resolved profile {}: cap={}, alpha={}, window={:?}",
        name, profile.per_domain_cap, profile.recency_alpha, profile.window_hours
    );
    profile
}
