use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::metrics::series::MAX_TIME_RANGE_HOURS;
use crate::posts::loader::DEFAULT_DATA_URL;
use crate::view::filter::{MetricsScope, SentimentFilter, ViewFilter};

/// Central configuration loaded from environment variables.
///
/// Every value has a default, so an empty environment gives a working
/// dashboard against the published dataset. The .env file is loaded
/// automatically at startup via dotenvy; CLI flags override on top.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote JSON dataset (SENTIWATCH_DATA_URL).
    pub data_url: String,
    /// Local JSON dataset; takes precedence over the URL when set
    /// (SENTIWATCH_DATA_FILE).
    pub data_file: Option<PathBuf>,
    /// Synthetic records appended after a successful load.
    pub synthetic_count: usize,
    /// Time between simulated arrivals while monitoring.
    pub tick_interval: Duration,
    /// How many hours back the score series reaches, at most
    /// MAX_TIME_RANGE_HOURS.
    pub time_range_hours: u32,
    pub threshold: f64,
    pub sentiment: SentimentFilter,
    pub metrics_scope: MetricsScope,
    /// Re-render the feed on every tick.
    pub auto_refresh: bool,
    /// Directory the export file is written to.
    pub export_dir: PathBuf,
    /// Fixed RNG seed for reproducible runs. Unset means OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            data_file: None,
            synthetic_count: 50,
            tick_interval: Duration::from_secs(3),
            time_range_hours: 24,
            threshold: 0.0,
            sentiment: SentimentFilter::All,
            metrics_scope: MetricsScope::Active,
            auto_refresh: true,
            export_dir: PathBuf::from("."),
            seed: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys keep their
    /// defaults; malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("SENTIWATCH_DATA_URL") {
            config.data_url = url;
        }
        config.data_file = lookup("SENTIWATCH_DATA_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup("SENTIWATCH_SYNTHETIC_COUNT") {
            config.synthetic_count = parse_var("SENTIWATCH_SYNTHETIC_COUNT", &raw)?;
        }
        if let Some(raw) = lookup("SENTIWATCH_TICK_SECS") {
            let secs: f64 = parse_var("SENTIWATCH_TICK_SECS", &raw)?;
            config.tick_interval = tick_interval_from_secs(secs)?;
        }
        if let Some(raw) = lookup("SENTIWATCH_TIME_RANGE_HOURS") {
            config.time_range_hours = parse_var("SENTIWATCH_TIME_RANGE_HOURS", &raw)?;
        }
        if let Some(raw) = lookup("SENTIWATCH_THRESHOLD") {
            config.threshold = parse_var("SENTIWATCH_THRESHOLD", &raw)?;
        }
        if let Some(raw) = lookup("SENTIWATCH_SENTIMENT") {
            config.sentiment = raw
                .parse()
                .context("Invalid SENTIWATCH_SENTIMENT")?;
        }
        if let Some(raw) = lookup("SENTIWATCH_METRICS_SCOPE") {
            config.metrics_scope = raw
                .parse()
                .context("Invalid SENTIWATCH_METRICS_SCOPE")?;
        }
        if let Some(raw) = lookup("SENTIWATCH_AUTO_REFRESH") {
            config.auto_refresh = parse_bool("SENTIWATCH_AUTO_REFRESH", &raw)?;
        }
        if let Some(dir) = lookup("SENTIWATCH_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("SENTIWATCH_SEED") {
            config.seed = Some(parse_var("SENTIWATCH_SEED", &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges. Call again after applying CLI overrides.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            anyhow::bail!(
                "Confidence threshold must be between 0 and 1 (got {}).\n\
                 Set SENTIWATCH_THRESHOLD or pass --threshold.",
                self.threshold
            );
        }
        if self.time_range_hours > MAX_TIME_RANGE_HOURS {
            anyhow::bail!(
                "Time range must be at most {MAX_TIME_RANGE_HOURS} hours (got {}).\n\
                 Set SENTIWATCH_TIME_RANGE_HOURS or pass --hours.",
                self.time_range_hours
            );
        }
        if self.tick_interval.is_zero() {
            anyhow::bail!("Tick interval must be greater than zero.");
        }
        Ok(())
    }

    /// The feed filter described by this config.
    pub fn view_filter(&self) -> ViewFilter {
        ViewFilter::new(self.threshold, self.sentiment)
    }
}

/// Convert a seconds value from config or CLI into a tick interval.
pub fn tick_interval_from_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        anyhow::bail!("Tick interval must be a positive number of seconds (got {secs})");
    }
    Ok(Duration::from_secs_f64(secs))
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid value for {key}: '{raw}'"))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid value for {key}: '{raw}' (expected true or false)"),
    }
}
