/// URL utilities
pub mod url {
    use url::Url;

    /// Domain reported for URLs that do not parse.
    pub const UNKNOWN_DOMAIN: &str = "unknown";

    /// Hostname without a leading `www.`.
    ///
    /// A URL that parses but carries no host (e.g. `mailto:`) yields an empty
    /// string; only a parse failure is an error.
    pub fn normalized_host(url_str: &str) -> Result<String, url::ParseError> {
        let url = Url::parse(url_str)?;
        let host = url.host_str().unwrap_or("");
        Ok(host.strip_prefix("www.").unwrap_or(host).to_string())
    }

    /// Extract the normalized domain, falling back to [`UNKNOWN_DOMAIN`].
    pub fn extract_domain(url_str: &str) -> String {
        normalized_host(url_str).unwrap_or_else(|_| UNKNOWN_DOMAIN.to_string())
    }
}

/// Time utilities
pub mod time {
    use chrono::{DateTime, Utc};

    /// Parse a feed timestamp. RSS uses RFC 2822, Atom and JSON APIs RFC 3339.
    pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }

    /// Age in fractional hours. Negative for timestamps in the future.
    pub fn age_hours(published: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        now.signed_duration_since(published).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Short relative label such as `5m ago` or `3d ago`; empty when unknown.
    pub fn time_ago(pub_date: Option<&str>, now: DateTime<Utc>) -> String {
        let Some(published) = pub_date.and_then(parse_pub_date) else {
            return String::new();
        };
        let seconds = now.signed_duration_since(published).num_seconds();

        if seconds < 60 {
            format!("{}s ago", seconds)
        } else if seconds < 3600 {
            format!("{}m ago", seconds / 60)
        } else if seconds < 86400 {
            format!("{}h ago", seconds / 3600)
        } else if seconds < 604800 {
            format!("{}d ago", seconds / 86400)
        } else {
            format!("{}w ago", seconds / 604800)
        }
    }
}

/// Text processing utilities
pub mod text {
    /// Lowercase alphanumeric tokens, split on anything else.
    pub fn tokenize(lowercase_text: &str) -> Vec<&str> {
        lowercase_text
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Break a free-text request into topics on `,` and on ` and `
    /// (case-insensitive). Blank pieces are dropped; at most `max_topics` kept.
    pub fn split_topics(query: &str, max_topics: usize) -> Vec<String> {
        let mut topics = Vec::new();
        for piece in query.trim().split(',') {
            let folded = piece.to_ascii_lowercase();
            let mut start = 0;
            // ASCII lowercasing keeps byte offsets aligned with `piece`.
            while let Some(offset) = folded[start..].find(" and ") {
                topics.push(piece[start..start + offset].trim().to_string());
                start += offset + " and ".len();
            }
            topics.push(piece[start..].trim().to_string());
        }

        topics.retain(|t| !t.is_empty());
        topics.truncate(max_topics);
        topics
    }
}
