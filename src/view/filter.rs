// View selection: which posts the feed (and optionally the charts) show.
//
// A post passes when its confidence is at least the threshold and its
// sentiment matches the category filter. Order is preserved.

use anyhow::Result;

use crate::posts::models::{PostRecord, Sentiment};

/// The feed never shows more than this many posts.
pub const FEED_LIMIT: usize = 20;

/// Category filter from the sentiment dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentimentFilter {
    #[default]
    All,
    Only(Sentiment),
}

impl SentimentFilter {
    pub fn matches(&self, sentiment: Sentiment) -> bool {
        match self {
            SentimentFilter::All => true,
            SentimentFilter::Only(wanted) => *wanted == sentiment,
        }
    }
}

impl std::str::FromStr for SentimentFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(SentimentFilter::All);
        }
        Ok(SentimentFilter::Only(s.parse()?))
    }
}

impl std::fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentFilter::All => write!(f, "all"),
            SentimentFilter::Only(s) => write!(f, "{s}"),
        }
    }
}

/// Which posts the charts and headline metrics aggregate over.
///
/// The feed always shows the filtered view. The charts default to the
/// unfiltered active collection; `Filtered` makes them follow the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsScope {
    #[default]
    Active,
    Filtered,
}

impl std::str::FromStr for MetricsScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(MetricsScope::Active),
            "filtered" => Ok(MetricsScope::Filtered),
            other => anyhow::bail!("Unknown metrics scope '{other}' (expected active or filtered)"),
        }
    }
}

impl std::fmt::Display for MetricsScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsScope::Active => write!(f, "active"),
            MetricsScope::Filtered => write!(f, "filtered"),
        }
    }
}

/// Threshold + category filter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewFilter {
    /// Inclusive lower bound on confidence, 0.0 to 1.0.
    pub threshold: f64,
    pub sentiment: SentimentFilter,
}

impl ViewFilter {
    pub fn new(threshold: f64, sentiment: SentimentFilter) -> Self {
        Self {
            threshold,
            sentiment,
        }
    }

    pub fn matches(&self, post: &PostRecord) -> bool {
        post.confidence >= self.threshold && self.sentiment.matches(post.sentiment)
    }

    /// All matching posts, in their original order.
    pub fn apply(&self, posts: &[PostRecord]) -> Vec<PostRecord> {
        posts.iter().filter(|p| self.matches(p)).cloned().collect()
    }

    /// The first FEED_LIMIT matching posts.
    pub fn feed(&self, posts: &[PostRecord]) -> Vec<PostRecord> {
        posts
            .iter()
            .filter(|p| self.matches(p))
            .take(FEED_LIMIT)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<SentimentFilter>().unwrap(), SentimentFilter::All);
        assert_eq!(
            "NEGATIVE".parse::<SentimentFilter>().unwrap(),
            SentimentFilter::Only(Sentiment::Negative)
        );
        assert!("mixed".parse::<SentimentFilter>().is_err());
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!("filtered".parse::<MetricsScope>().unwrap(), MetricsScope::Filtered);
        assert!("everything".parse::<MetricsScope>().is_err());
    }

    #[test]
    fn test_filter_display_round_trip() {
        for f in [
            SentimentFilter::All,
            SentimentFilter::Only(Sentiment::Neutral),
        ] {
            assert_eq!(f.to_string().parse::<SentimentFilter>().unwrap(), f);
        }
    }
}
