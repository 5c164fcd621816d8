// Synthetic record generator: pads the dataset so the dashboard has
// enough density to look alive.
//
// Each record gets a category drawn from an explicit discrete distribution
// (SentimentMix), a template text for that category, a confidence sampled
// from the category's range, a timestamp within the past 24 hours, a random
// source and random engagement counters.

use chrono::{DateTime, Duration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;

use super::models::{PostRecord, Sentiment, Source};

const POSITIVE_TEXTS: [&str; 5] = [
    "Excellent service! Highly recommend!",
    "Best purchase I've made this year!",
    "Outstanding quality and fast delivery",
    "Five stars! Will buy again",
    "Amazing product, exceeded expectations",
];

const NEGATIVE_TEXTS: [&str; 5] = [
    "Waste of money, very disappointed",
    "Poor quality, broke after one day",
    "Customer service is terrible",
    "Not worth the price at all",
    "Worst product I've ever bought",
];

const NEUTRAL_TEXTS: [&str; 5] = [
    "It's okay, nothing special though",
    "Average product for the price",
    "Decent but could be better",
    "Not bad, not great either",
    "Standard quality, as expected",
];

/// Synthetic timestamps fall within this many minutes before `now`.
const LOOKBACK_MINUTES: i64 = 24 * 60;

/// Probability of each sentiment category for generated records.
///
/// Weights are relative; they don't have to sum to 1.0. Negative weights
/// count as zero. If no weight is positive every draw is Neutral. The
/// default is 40% positive, 30% negative, 30% neutral.
#[derive(Debug, Clone, Copy)]
pub struct SentimentMix {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl Default for SentimentMix {
    fn default() -> Self {
        Self {
            positive: 0.4,
            negative: 0.3,
            neutral: 0.3,
        }
    }
}

impl SentimentMix {
    /// Draw one category according to the weights.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Sentiment {
        let positive = self.positive.max(0.0);
        let negative = self.negative.max(0.0);
        let neutral = self.neutral.max(0.0);
        let total = positive + negative + neutral;
        if total <= 0.0 {
            return Sentiment::Neutral;
        }
        let roll = rng.random::<f64>() * total;
        if roll < positive {
            Sentiment::Positive
        } else if roll < positive + negative {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Inclusive confidence range sampled for each category.
pub fn confidence_range(sentiment: Sentiment) -> (f64, f64) {
    match sentiment {
        Sentiment::Positive => (0.7, 1.0),
        Sentiment::Negative => (0.6, 0.95),
        Sentiment::Neutral => (0.5, 0.9),
    }
}

fn template_texts(sentiment: Sentiment) -> &'static [&'static str] {
    match sentiment {
        Sentiment::Positive => &POSITIVE_TEXTS,
        Sentiment::Negative => &NEGATIVE_TEXTS,
        Sentiment::Neutral => &NEUTRAL_TEXTS,
    }
}

/// Generate `count` synthetic records relative to `now`.
///
/// Identifiers are `generated_<i>` and unique within the batch.
pub fn generate<R: Rng>(
    count: usize,
    mix: &SentimentMix,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<PostRecord> {
    (0..count)
        .map(|i| {
            let sentiment = mix.sample(rng);
            let text = template_texts(sentiment)
                .choose(rng)
                .copied()
                .unwrap_or_default();

            let (lo, hi) = confidence_range(sentiment);
            let raw = lo + rng.random::<f64>() * (hi - lo);
            // Three decimals, same precision as the published dataset
            let confidence = ((raw * 1000.0).round() / 1000.0).clamp(lo, hi);

            let minutes_ago = rng.random_range(0..LOOKBACK_MINUTES);
            let source = Source::KNOWN
                .choose(rng)
                .copied()
                .unwrap_or(Source::Twitter);

            PostRecord {
                id: format!("generated_{i}"),
                text: text.to_string(),
                timestamp: now - Duration::minutes(minutes_ago),
                source,
                sentiment,
                confidence,
                user_followers: rng.random_range(100..10_100),
                retweets: rng.random_range(0..500),
                likes: rng.random_range(0..1000),
            }
        })
        .collect()
}
