// Data models: the post record and its categorical fields.
//
// These types flow through every layer: loader, stream, aggregator, view
// and renderer. The JSON shape matches the published dataset (snake_case
// fields, "YYYY-MM-DD HH:MM:SS" timestamps).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single sentiment-labeled social media post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub text: String,
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Utc>,
    pub source: Source,
    pub sentiment: Sentiment,
    /// Classifier confidence in the sentiment label, 0.0 to 1.0.
    pub confidence: f64,
    pub user_followers: u64,
    pub retweets: u64,
    pub likes: u64,
}

impl PostRecord {
    /// Signed contribution of this post to an aggregate score:
    /// +confidence for positive, -confidence for negative, 0 for neutral.
    pub fn signed_confidence(&self) -> f64 {
        match self.sentiment {
            Sentiment::Positive => self.confidence,
            Sentiment::Negative => -self.confidence,
            Sentiment::Neutral => 0.0,
        }
    }
}

/// Sentiment category assigned upstream. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => anyhow::bail!("Unknown sentiment '{other}' (expected positive, negative or neutral)"),
        }
    }
}

/// Platform a post came from.
///
/// Anything outside the four known platforms deserializes to `Unknown`,
/// which keeps the record loadable while the source distribution skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Twitter,
    Reddit,
    Instagram,
    Facebook,
    #[serde(other)]
    Unknown,
}

impl Source {
    /// The known platforms, in chart order.
    pub const KNOWN: [Source; 4] = [
        Source::Twitter,
        Source::Reddit,
        Source::Instagram,
        Source::Facebook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Twitter => "twitter",
            Source::Reddit => "reddit",
            Source::Instagram => "instagram",
            Source::Facebook => "facebook",
            Source::Unknown => "unknown",
        }
    }

    /// Display label used on charts ("Twitter", "Reddit", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Source::Twitter => "Twitter",
            Source::Reddit => "Reddit",
            Source::Instagram => "Instagram",
            Source::Facebook => "Facebook",
            Source::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serde codec for post timestamps.
///
/// Writes `YYYY-MM-DD HH:MM:SS` in UTC. Reads that form, the same with a
/// `T` separator, or full RFC 3339.
pub mod timestamp_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parse a timestamp string in any of the accepted forms.
    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        for fmt in [FORMAT, "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Ok(naive.and_utc());
            }
        }
        Err(format!("invalid timestamp '{raw}'"))
    }
}
