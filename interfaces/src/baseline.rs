use std::collections::BTreeSet;

use crate::defs::Headline;
use crate::defs::PanelDigest;

const TAKEAWAYS: [&str; 2] = [
    "These developments may impact markets, policies, or public sentiment.",
    "Key stakeholders should monitor upcoming announcements and reactions.",
];

const ACTIONS: [&str; 3] = [
    "Monitor official sources for updates and clarifications.",
    "Set alerts for related keywords to track developments.",
    "Compare coverage across multiple reputable outlets.",
];

const WATCH: [&str; 3] = [
    "Follow-up announcements expected in 24-48 hours.",
    "Watch for official statements and regulatory responses.",
    "Track social media and expert analysis for context.",
];

/// Digest derived from headlines alone, for when no language model is around.
pub fn fallback_digest(headlines: &[Headline]) -> PanelDigest {
    let mut insights: Vec<String> = headlines
        .iter()
        .take(4)
        .map(|h| {
            let title: String = h.title.chars().take(100).collect();
            if title.ends_with('.') { title } else { format!("{}.", title) }
        })
        .collect();
    if insights.is_empty() {
        insights.push("Recent news updates available.".to_owned());
    }

    let mut tags = headline_tags(headlines);
    if tags.is_empty() {
        tags.push("#News".to_owned());
    }

    let bullets = headlines
        .iter()
        .take(5)
        .map(|h| format!("- {}", h.title))
        .collect::<Vec<_>>()
        .join("\n");
    let summary_md = format!(
        "{}\n\n**Why it matters:** These are the latest developments based on recent coverage.",
        bullets
    );

    PanelDigest {
        summary_md,
        insights,
        takeaways: TAKEAWAYS.iter().map(|s| s.to_string()).collect(),
        actions: ACTIONS.iter().map(|s| s.to_string()).collect(),
        watch: WATCH.iter().map(|s| s.to_string()).collect(),
        tags,
        used_llm: false,
    }
}

/// Hashtags from source names first, then capitalized phrases in the titles.
/// At most six, in first-seen order.
pub fn headline_tags(headlines: &[Headline]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut tags = Vec::new();
    let mut push = |tag: String| {
        if seen.insert(tag.clone()) {
            tags.push(tag);
        }
    };

    for headline in headlines.iter().take(6) {
        let Some(source) = &headline.source else { continue };
        let bare = source.strip_prefix("www.").unwrap_or(source);
        let stem = bare.split('.').next().unwrap_or("");
        if stem.chars().count() > 2 {
            let mut chars = stem.chars();
            if let Some(first) = chars.next() {
                push(format!("#{}{}", first.to_uppercase(), chars.as_str()));
            }
        }
    }

    let joined = headlines
        .iter()
        .take(6)
        .map(|h| h.title.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    for phrase in capitalized_phrases(&joined).into_iter().take(4) {
        let len = phrase.chars().count();
        if len > 2 && len < 20 {
            push(format!("#{}", phrase.split_whitespace().collect::<String>()));
        }
    }

    tags.truncate(6);
    tags
}

// Runs of words shaped like "Federal Reserve": one uppercase ASCII letter
// followed by at least one lowercase letter.
fn capitalized_phrases(text: &str) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        let word = word.trim_matches(|c: char| !c.is_ascii_alphanumeric());
        if is_capitalized(word) {
            current.push(word);
        } else if !current.is_empty() {
            phrases.push(current.join(" "));
            current.clear();
        }
    }
    if !current.is_empty() {
        phrases.push(current.join(" "));
    }
    phrases
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let rest = chars.as_str();
            !rest.is_empty() && rest.chars().all(|c| c.is_ascii_lowercase())
        }
        _ => false,
    }
}
