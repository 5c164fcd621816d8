// Unit tests for the aggregation layer.
//
// Covers the overall score, hourly score/volume series, source
// distribution, confidence histogram, sentiment breakdown and highlights.
// Everything is pure, so these build small post sets by hand.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sentiwatch::metrics::distribution::{
    ConfidenceHistogram, Highlights, SentimentBreakdown, SourceDistribution,
};
use sentiwatch::metrics::score::overall_score;
use sentiwatch::metrics::series::{score_series, volume_series, MAX_VOLUME_HOURS};
use sentiwatch::metrics::Snapshot;
use sentiwatch::posts::models::{PostRecord, Sentiment, Source};
use sentiwatch::posts::synthetic::{generate, SentimentMix};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 9, 12, 30, 0).unwrap()
}

fn post(id: &str, sentiment: Sentiment, confidence: f64, timestamp: DateTime<Utc>) -> PostRecord {
    PostRecord {
        id: id.to_string(),
        text: format!("post {id}"),
        timestamp,
        source: Source::Twitter,
        sentiment,
        confidence,
        user_followers: 100,
        retweets: 1,
        likes: 2,
    }
}

// ============================================================
// Overall score
// ============================================================

#[test]
fn score_example_positive_and_negative() {
    let posts = vec![
        post("a", Sentiment::Positive, 0.8, now()),
        post("b", Sentiment::Negative, 0.5, now()),
    ];
    let score = overall_score(&posts);
    assert!((score - 0.15).abs() < 1e-9, "Expected 0.15, got {score}");
}

#[test]
fn score_empty_subset_is_zero() {
    assert_eq!(overall_score(&[]), 0.0);
}

#[test]
fn score_neutral_only_is_zero() {
    let posts = vec![
        post("a", Sentiment::Neutral, 0.9, now()),
        post("b", Sentiment::Neutral, 0.4, now()),
    ];
    assert_eq!(overall_score(&posts), 0.0);
}

#[test]
fn score_all_max_confidence_positive_is_one() {
    let posts = vec![
        post("a", Sentiment::Positive, 1.0, now()),
        post("b", Sentiment::Positive, 1.0, now()),
    ];
    assert!((overall_score(&posts) - 1.0).abs() < f64::EPSILON);
}

#[test]
fn score_stays_in_range_for_generated_subsets() {
    let mut rng = StdRng::seed_from_u64(11);
    let posts = generate(300, &SentimentMix::default(), now(), &mut rng);
    for len in [1, 2, 7, 50, 300] {
        let score = overall_score(&posts[..len]);
        assert!(
            (-1.0..=1.0).contains(&score),
            "Score {score} out of range for subset of {len}"
        );
    }
}

// ============================================================
// Time series
// ============================================================

#[test]
fn score_series_has_one_point_per_hour_inclusive() {
    let series = score_series(&[], now(), 24);
    assert_eq!(series.len(), 25);
    assert_eq!(series.first().unwrap().label, "12:00");
    assert_eq!(series.last().unwrap().label, "12:00");
    assert_eq!(
        series.last().unwrap().hour_start,
        Utc.with_ymd_and_hms(2025, 9, 9, 12, 0, 0).unwrap()
    );
    assert!(series.iter().all(|p| p.value == 0.0));
}

#[test]
fn score_series_buckets_by_hour() {
    let posts = vec![
        // Current hour: +0.9 and -0.3 -> 0.3
        post("a", Sentiment::Positive, 0.9, now() - Duration::minutes(5)),
        post("b", Sentiment::Negative, 0.3, now() - Duration::minutes(29)),
        // Previous hour: -0.6
        post("c", Sentiment::Negative, 0.6, now() - Duration::minutes(31)),
    ];
    let series = score_series(&posts, now(), 3);
    assert_eq!(series.len(), 4);
    let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["09:00", "10:00", "11:00", "12:00"]);
    assert!((series[3].value - 0.3).abs() < 1e-9);
    assert!((series[2].value + 0.6).abs() < 1e-9);
    assert_eq!(series[1].value, 0.0);
}

#[test]
fn hour_bucket_is_half_open() {
    let top_of_hour = Utc.with_ymd_and_hms(2025, 9, 9, 12, 0, 0).unwrap();
    let posts = vec![
        post("on_boundary", Sentiment::Positive, 0.5, top_of_hour),
        post("just_before", Sentiment::Positive, 0.5, top_of_hour - Duration::seconds(1)),
    ];
    let volume = volume_series(&posts, now(), 1);
    assert_eq!(volume.len(), 2);
    assert_eq!(volume[0].value, 1, "11:59:59 belongs to the 11:00 bucket");
    assert_eq!(volume[1].value, 1, "12:00:00 belongs to the 12:00 bucket");
}

#[test]
fn posts_outside_window_are_not_counted() {
    let posts = vec![
        post("old", Sentiment::Positive, 0.9, now() - Duration::hours(30)),
        post("future", Sentiment::Positive, 0.9, now() + Duration::hours(2)),
    ];
    let volume = volume_series(&posts, now(), 24);
    assert!(volume.iter().all(|p| p.value == 0));
}

#[test]
fn volume_series_caps_lookback() {
    let series = volume_series(&[], now(), 24);
    assert_eq!(series.len(), MAX_VOLUME_HOURS as usize + 1);

    let short = volume_series(&[], now(), 6);
    assert_eq!(short.len(), 7);
}

#[test]
fn zero_hour_range_is_current_hour_only() {
    let posts = vec![post("a", Sentiment::Negative, 0.4, now())];
    let series = score_series(&posts, now(), 0);
    assert_eq!(series.len(), 1);
    assert!((series[0].value + 0.4).abs() < 1e-9);
}

// ============================================================
// Source distribution
// ============================================================

#[test]
fn source_distribution_counts_known_sources() {
    let mut posts = vec![
        post("a", Sentiment::Positive, 0.5, now()),
        post("b", Sentiment::Positive, 0.5, now()),
        post("c", Sentiment::Positive, 0.5, now()),
        post("d", Sentiment::Positive, 0.5, now()),
    ];
    posts[1].source = Source::Reddit;
    posts[2].source = Source::Facebook;
    posts[3].source = Source::Unknown;

    let dist = SourceDistribution::from_posts(&posts);
    assert_eq!(dist.count(Source::Twitter), 1);
    assert_eq!(dist.count(Source::Reddit), 1);
    assert_eq!(dist.count(Source::Instagram), 0);
    assert_eq!(dist.count(Source::Facebook), 1);
    assert_eq!(dist.count(Source::Unknown), 0);
    assert_eq!(dist.counts.iter().sum::<usize>(), 3, "Unknown source is ignored");
}

// ============================================================
// Confidence histogram
// ============================================================

#[test]
fn histogram_places_boundaries_in_upper_bucket() {
    let posts: Vec<PostRecord> = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0]
        .iter()
        .enumerate()
        .map(|(i, c)| post(&i.to_string(), Sentiment::Neutral, *c, now()))
        .collect();
    let hist = ConfidenceHistogram::from_posts(&posts);
    assert_eq!(hist.buckets, [1, 1, 1, 1, 2]);
}

#[test]
fn histogram_sums_to_subset_size() {
    let mut rng = StdRng::seed_from_u64(5);
    let posts = generate(137, &SentimentMix::default(), now(), &mut rng);
    for len in [0, 1, 42, 137] {
        let hist = ConfidenceHistogram::from_posts(&posts[..len]);
        assert_eq!(hist.total(), len);
    }
}

// ============================================================
// Breakdown and highlights
// ============================================================

#[test]
fn breakdown_counts_and_percentages() {
    let posts = vec![
        post("a", Sentiment::Positive, 0.5, now()),
        post("b", Sentiment::Negative, 0.5, now()),
        post("c", Sentiment::Negative, 0.5, now()),
    ];
    let b = SentimentBreakdown::from_posts(&posts);
    assert_eq!(b.total, 3);
    assert_eq!(b.positive, 1);
    assert_eq!(b.negative, 2);
    assert_eq!(b.neutral, 0);
    assert_eq!(b.percent(Sentiment::Positive), 33);
    assert_eq!(b.percent(Sentiment::Negative), 67);
    assert_eq!(b.percent(Sentiment::Neutral), 0);
}

#[test]
fn highlights_pick_most_confident_earliest_on_tie() {
    let posts = vec![
        post("p1", Sentiment::Positive, 0.7, now()),
        post("p2", Sentiment::Positive, 0.95, now()),
        post("p3", Sentiment::Positive, 0.95, now()),
        post("n1", Sentiment::Negative, 0.6, now()),
    ];
    let h = Highlights::from_posts(&posts);
    assert_eq!(h.top_positive.unwrap().id, "p2");
    assert_eq!(h.top_negative.unwrap().id, "n1");
}

#[test]
fn highlights_empty_when_category_missing() {
    let posts = vec![post("x", Sentiment::Neutral, 0.9, now())];
    let h = Highlights::from_posts(&posts);
    assert!(h.top_positive.is_none());
    assert!(h.top_negative.is_none());
}

#[test]
fn snapshot_combines_all_aggregates() {
    let posts = vec![
        post("a", Sentiment::Positive, 0.8, now()),
        post("b", Sentiment::Negative, 0.5, now() - Duration::hours(1)),
    ];
    let snap = Snapshot::compute(&posts, now(), 12);
    assert_eq!(snap.computed_at, now());
    assert_eq!(snap.breakdown.total, 2);
    assert!((snap.score - 0.15).abs() < 1e-9);
    assert_eq!(snap.score_series.len(), 13);
    assert_eq!(snap.volume_series.len(), 13);
    assert_eq!(snap.volume_series.iter().map(|p| p.value).sum::<usize>(), 2);
    assert_eq!(snap.confidence.total(), 2);
    assert_eq!(snap.sources.count(Source::Twitter), 2);
}
