// Hour-bucketed time series: sentiment score and post volume per hour.
//
// Buckets are aligned to UTC hours. The series runs from `hours` hours
// back through the current hour inclusive, so it always has `hours + 1`
// points. Volume caps its lookback at MAX_VOLUME_HOURS; any range is
// capped at MAX_TIME_RANGE_HOURS.

use std::collections::HashMap;

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::Serialize;

use super::score::score_of;
use crate::posts::models::PostRecord;

/// The volume chart never looks back further than this many hours.
pub const MAX_VOLUME_HOURS: u32 = 12;

/// Longest time range the score series accepts (30 days).
pub const MAX_TIME_RANGE_HOURS: u32 = 720;

const SECONDS_PER_HOUR: i64 = 3600;

/// One labelled point of an hourly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePoint<T> {
    /// "HH:00" label for the chart axis.
    pub label: String,
    /// Start of the hour this point covers.
    pub hour_start: DateTime<Utc>,
    pub value: T,
}

/// Truncate an instant to the start of its UTC hour.
pub fn hour_start(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.duration_trunc(TimeDelta::hours(1)).unwrap_or(ts)
}

fn hour_key(ts: DateTime<Utc>) -> i64 {
    ts.timestamp().div_euclid(SECONDS_PER_HOUR)
}

/// Posts grouped by the UTC hour they fall in.
pub struct HourBuckets<'a> {
    buckets: HashMap<i64, Vec<&'a PostRecord>>,
}

impl<'a> HourBuckets<'a> {
    pub fn new(posts: &'a [PostRecord]) -> Self {
        let mut buckets: HashMap<i64, Vec<&'a PostRecord>> = HashMap::new();
        for post in posts {
            buckets.entry(hour_key(post.timestamp)).or_default().push(post);
        }
        Self { buckets }
    }

    /// Posts whose timestamp lies in `[start, start + 1h)` for the hour
    /// containing `at`.
    pub fn get(&self, at: DateTime<Utc>) -> &[&'a PostRecord] {
        self.buckets
            .get(&hour_key(at))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Hour starts from `hours` back through the hour containing `now`.
    /// `hours` is capped at MAX_TIME_RANGE_HOURS.
    fn hours_back(now: DateTime<Utc>, hours: u32) -> impl Iterator<Item = DateTime<Utc>> {
        (0..=hours.min(MAX_TIME_RANGE_HOURS))
            .rev()
            .map(move |offset| hour_start(now - TimeDelta::hours(i64::from(offset))))
    }

    /// Mean sentiment score per hour. Empty hours score 0.0.
    pub fn score_series(&self, now: DateTime<Utc>, hours: u32) -> Vec<TimePoint<f64>> {
        Self::hours_back(now, hours)
            .map(|start| TimePoint {
                label: start.format("%H:00").to_string(),
                hour_start: start,
                value: score_of(self.get(start).iter().copied()),
            })
            .collect()
    }

    /// Post count per hour, looking back at most MAX_VOLUME_HOURS.
    pub fn volume_series(&self, now: DateTime<Utc>, hours: u32) -> Vec<TimePoint<usize>> {
        Self::hours_back(now, hours.min(MAX_VOLUME_HOURS))
            .map(|start| TimePoint {
                label: start.format("%H:00").to_string(),
                hour_start: start,
                value: self.get(start).len(),
            })
            .collect()
    }
}

/// Convenience wrapper: score series straight from a slice.
pub fn score_series(posts: &[PostRecord], now: DateTime<Utc>, hours: u32) -> Vec<TimePoint<f64>> {
    HourBuckets::new(posts).score_series(now, hours)
}

/// Convenience wrapper: volume series straight from a slice.
pub fn volume_series(
    posts: &[PostRecord],
    now: DateTime<Utc>,
    hours: u32,
) -> Vec<TimePoint<usize>> {
    HourBuckets::new(posts).volume_series(now, hours)
}
