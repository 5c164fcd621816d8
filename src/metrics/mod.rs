// Aggregation: everything the dashboard charts, computed on demand from a
// subset of posts and the current instant. Nothing here holds state.

pub mod distribution;
pub mod score;
pub mod series;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::posts::models::PostRecord;
use distribution::{ConfidenceHistogram, Highlights, SentimentBreakdown, SourceDistribution};
use series::{HourBuckets, TimePoint};

/// All chart inputs for one render pass.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub computed_at: DateTime<Utc>,
    pub breakdown: SentimentBreakdown,
    /// Overall score in [-1, 1].
    pub score: f64,
    pub score_series: Vec<TimePoint<f64>>,
    pub volume_series: Vec<TimePoint<usize>>,
    pub sources: SourceDistribution,
    pub confidence: ConfidenceHistogram,
    pub highlights: Highlights,
}

impl Snapshot {
    /// Aggregate `posts` as of `now`, with series reaching `hours` back.
    pub fn compute(posts: &[PostRecord], now: DateTime<Utc>, hours: u32) -> Self {
        let buckets = HourBuckets::new(posts);
        Self {
            computed_at: now,
            breakdown: SentimentBreakdown::from_posts(posts),
            score: score::overall_score(posts),
            score_series: buckets.score_series(now, hours),
            volume_series: buckets.volume_series(now, hours),
            sources: SourceDistribution::from_posts(posts),
            confidence: ConfidenceHistogram::from_posts(posts),
            highlights: Highlights::from_posts(posts),
        }
    }
}
