// Dataset loading: one best-effort fetch with an embedded fallback.
//
// The DatasetSource trait is the swap point: the CLI uses the HTTP source
// by default and the file source when a local path is configured. Whatever
// the source, a failed load never stops the dashboard. We log the error and
// continue with a fixed three-record dataset.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use tracing::{info, warn};

use super::models::{PostRecord, Sentiment, Source};
use super::synthetic::{self, SentimentMix};

/// Published sample dataset the dashboard was built around.
pub const DEFAULT_DATA_URL: &str = "https://ppl-ai-code-interpreter-files.s3.amazonaws.com/web/direct-files/7bc74c79deb4c98848a63b755dc928b7/1bb7a55d-aa8b-4e26-9795-d81159db982a/5c91624f.json";

/// Where a dataset can be read from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch the full list of post records.
    async fn fetch(&self) -> Result<Vec<PostRecord>>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// Fetches a JSON array of post records over HTTP.
pub struct HttpDatasetSource {
    client: reqwest::Client,
    url: String,
}

impl HttpDatasetSource {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("sentiwatch/0.1")
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    async fn fetch(&self) -> Result<Vec<PostRecord>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Dataset request failed: {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Dataset server returned {status}");
        }

        response
            .json::<Vec<PostRecord>>()
            .await
            .context("Failed to parse dataset JSON")
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads a JSON array of post records from a local file.
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileDatasetSource {
    async fn fetch(&self) -> Result<Vec<PostRecord>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Where the loaded dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    /// The source answered; synthetic records were appended.
    Source,
    /// The source failed; the embedded fallback is in use.
    Fallback,
}

/// The outcome of the startup load.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub records: Vec<PostRecord>,
    pub origin: DatasetOrigin,
}

/// Load the dataset from `source`, padding it with `synthetic_count`
/// generated records. On any failure, return the embedded fallback instead
/// (without synthetic padding). No retries.
pub async fn load_dataset<R: Rng>(
    source: &dyn DatasetSource,
    synthetic_count: usize,
    mix: &SentimentMix,
    now: DateTime<Utc>,
    rng: &mut R,
) -> LoadedDataset {
    match source.fetch().await {
        Ok(mut records) => {
            let fetched = records.len();
            records.extend(synthetic::generate(synthetic_count, mix, now, rng));
            info!(
                source = %source.describe(),
                fetched,
                synthetic = synthetic_count,
                total = records.len(),
                "Sentiment data loaded"
            );
            LoadedDataset {
                records,
                origin: DatasetOrigin::Source,
            }
        }
        Err(e) => {
            warn!(
                source = %source.describe(),
                error = %e,
                "Failed to load sentiment data, using embedded fallback"
            );
            LoadedDataset {
                records: fallback_dataset(),
                origin: DatasetOrigin::Fallback,
            }
        }
    }
}

/// The fixed three-record dataset used when the source is unavailable.
pub fn fallback_dataset() -> Vec<PostRecord> {
    vec![
        fallback_record(
            "post_1",
            "I love this new product! It's amazing and works perfectly!",
            (10, 40, 26),
            Source::Reddit,
            Sentiment::Positive,
            0.652,
            (7598, 471, 711),
        ),
        fallback_record(
            "post_2",
            "This is terrible. Worst experience ever.",
            (18, 35, 10),
            Source::Twitter,
            Sentiment::Negative,
            0.883,
            (3542, 12, 45),
        ),
        fallback_record(
            "post_3",
            "The weather is nice today. Going for a walk.",
            (14, 22, 33),
            Source::Instagram,
            Sentiment::Neutral,
            0.721,
            (892, 3, 67),
        ),
    ]
}

fn fallback_record(
    id: &str,
    text: &str,
    (hour, min, sec): (u32, u32, u32),
    source: Source,
    sentiment: Sentiment,
    confidence: f64,
    (user_followers, retweets, likes): (u64, u64, u64),
) -> PostRecord {
    PostRecord {
        id: id.to_string(),
        text: text.to_string(),
        timestamp: Utc
            .with_ymd_and_hms(2025, 9, 9, hour, min, sec)
            .single()
            .unwrap_or_default(),
        source,
        sentiment,
        confidence,
        user_followers,
        retweets,
        likes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct FailingSource;

    #[async_trait]
    impl DatasetSource for FailingSource {
        async fn fetch(&self) -> Result<Vec<PostRecord>> {
            anyhow::bail!("connection refused")
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    struct StaticSource(Vec<PostRecord>);

    #[async_trait]
    impl DatasetSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<PostRecord>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_uses_fallback_without_padding() {
        let mut rng = StdRng::seed_from_u64(3);
        let loaded =
            load_dataset(&FailingSource, 50, &SentimentMix::default(), Utc::now(), &mut rng).await;
        assert_eq!(loaded.origin, DatasetOrigin::Fallback);
        assert_eq!(loaded.records, fallback_dataset());
    }

    #[tokio::test]
    async fn test_successful_fetch_is_padded_with_synthetic_records() {
        let mut rng = StdRng::seed_from_u64(3);
        let source = StaticSource(fallback_dataset());
        let loaded =
            load_dataset(&source, 10, &SentimentMix::default(), Utc::now(), &mut rng).await;
        assert_eq!(loaded.origin, DatasetOrigin::Source);
        assert_eq!(loaded.records.len(), 13);
        assert_eq!(loaded.records[0].id, "post_1");
        assert_eq!(loaded.records[3].id, "generated_0");
    }

    #[tokio::test]
    async fn test_file_source_reads_dataset() {
        let path = std::env::temp_dir().join(format!("sentiwatch_loader_test_{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&fallback_dataset()).unwrap()).unwrap();

        let records = FileDatasetSource::new(&path).fetch().await.unwrap();
        assert_eq!(records, fallback_dataset());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_file_source_malformed_json_is_an_error() {
        let path = std::env::temp_dir().join(format!("sentiwatch_loader_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{not json").unwrap();

        assert!(FileDatasetSource::new(&path).fetch().await.is_err());

        let _ = std::fs::remove_file(&path);
    }
}
