// Categorical breakdowns: sentiment mix, source mix, confidence histogram,
// and the strongest positive/negative posts.

use serde::Serialize;

use crate::posts::models::{PostRecord, Sentiment, Source};

/// Upper (exclusive) edges of the first four confidence buckets. The fifth
/// bucket is [0.8, 1.0], closed at the top.
const CONFIDENCE_EDGES: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Axis labels for the confidence histogram.
pub const CONFIDENCE_LABELS: [&str; 5] = ["0-0.2", "0.2-0.4", "0.4-0.6", "0.6-0.8", "0.8-1.0"];

/// Per-category counts and headline percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentBreakdown {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentBreakdown {
    pub fn from_posts(posts: &[PostRecord]) -> Self {
        let mut breakdown = Self {
            total: posts.len(),
            ..Self::default()
        };
        for post in posts {
            match post.sentiment {
                Sentiment::Positive => breakdown.positive += 1,
                Sentiment::Negative => breakdown.negative += 1,
                Sentiment::Neutral => breakdown.neutral += 1,
            }
        }
        breakdown
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    /// Share of `sentiment` as a whole-number percentage. 0 when empty.
    pub fn percent(&self, sentiment: Sentiment) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.count(sentiment) as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Post count per known source, in `Source::KNOWN` order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceDistribution {
    pub counts: [usize; 4],
}

impl SourceDistribution {
    /// Count posts per platform. Posts from unknown sources are skipped.
    pub fn from_posts(posts: &[PostRecord]) -> Self {
        let mut counts = [0usize; 4];
        for post in posts {
            if let Some(idx) = Source::KNOWN.iter().position(|s| *s == post.source) {
                counts[idx] += 1;
            }
        }
        Self { counts }
    }

    pub fn count(&self, source: Source) -> usize {
        Source::KNOWN
            .iter()
            .position(|s| *s == source)
            .map(|idx| self.counts[idx])
            .unwrap_or(0)
    }

    /// (label, count) pairs in chart order.
    pub fn entries(&self) -> impl Iterator<Item = (Source, usize)> + '_ {
        Source::KNOWN.iter().copied().zip(self.counts.iter().copied())
    }
}

/// Five fixed-width confidence buckets over [0, 1].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfidenceHistogram {
    pub buckets: [usize; 5],
}

impl ConfidenceHistogram {
    pub fn from_posts(posts: &[PostRecord]) -> Self {
        let mut buckets = [0usize; 5];
        for post in posts {
            if let Some(idx) = confidence_bucket(post.confidence) {
                buckets[idx] += 1;
            }
        }
        Self { buckets }
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().sum()
    }
}

/// Bucket index for a confidence value. Values outside [0, 1] (or NaN)
/// have no bucket. Exactly 1.0 lands in the top bucket.
pub fn confidence_bucket(confidence: f64) -> Option<usize> {
    if !(0.0..=1.0).contains(&confidence) {
        return None;
    }
    Some(
        CONFIDENCE_EDGES
            .iter()
            .position(|&edge| confidence < edge)
            .unwrap_or(CONFIDENCE_EDGES.len()),
    )
}

/// The highest-confidence positive and negative posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Highlights {
    pub top_positive: Option<PostRecord>,
    pub top_negative: Option<PostRecord>,
}

impl Highlights {
    pub fn from_posts(posts: &[PostRecord]) -> Self {
        Self {
            top_positive: most_confident(posts, Sentiment::Positive).cloned(),
            top_negative: most_confident(posts, Sentiment::Negative).cloned(),
        }
    }
}

/// Highest-confidence post of a category; the earliest one wins ties.
fn most_confident(posts: &[PostRecord], sentiment: Sentiment) -> Option<&PostRecord> {
    posts
        .iter()
        .filter(|p| p.sentiment == sentiment)
        .fold(None, |best: Option<&PostRecord>, post| match best {
            Some(b) if b.confidence >= post.confidence => Some(b),
            _ => Some(post),
        })
}
