// Aggregate sentiment score.
//
// Each post contributes +confidence (positive), -confidence (negative) or
// 0 (neutral). The score is the mean contribution, clamped to [-1, 1].

use crate::posts::models::PostRecord;

/// Mean signed confidence over `posts`. Empty input scores 0.0.
pub fn overall_score(posts: &[PostRecord]) -> f64 {
    score_of(posts.iter())
}

/// Same as `overall_score`, over any iterator of borrowed posts.
pub fn score_of<'a>(posts: impl IntoIterator<Item = &'a PostRecord>) -> f64 {
    let (sum, count) = posts
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), post| {
            (sum + post.signed_confidence(), count + 1)
        });
    if count == 0 {
        return 0.0;
    }
    (sum / count as f64).clamp(-1.0, 1.0)
}

/// Map a score in [-1, 1] onto a 0-100 gauge reading.
pub fn gauge_percent(score: f64) -> f64 {
    ((score.clamp(-1.0, 1.0) + 1.0) / 2.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_percent_endpoints() {
        assert_eq!(gauge_percent(-1.0), 0.0);
        assert_eq!(gauge_percent(0.0), 50.0);
        assert_eq!(gauge_percent(1.0), 100.0);
        assert_eq!(gauge_percent(3.0), 100.0);
    }

    #[test]
    fn test_empty_scores_zero() {
        assert_eq!(overall_score(&[]), 0.0);
    }
}
