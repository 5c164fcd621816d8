use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use sentiwatch::config::{self, Config};
use sentiwatch::dashboard::{Dashboard, DashboardSettings};
use sentiwatch::output::terminal::TerminalRenderer;
use sentiwatch::posts::loader::{
    self, DatasetOrigin, DatasetSource, FileDatasetSource, HttpDatasetSource,
};
use sentiwatch::posts::synthetic::{self, SentimentMix};
use sentiwatch::stream::clock::{Clock, SystemClock};
use sentiwatch::stream::monitor::{self, MonitorHandle, MonitorOptions};

/// sentiwatch: live sentiment dashboard for social media posts.
///
/// Loads a sentiment-labeled dataset, simulates real-time arrivals, and
/// renders score, volume, source and confidence charts plus a filtered feed.
#[derive(Parser)]
#[command(name = "sentiwatch", version, about)]
struct Cli {
    #[command(flatten)]
    view: ViewArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the view settings (defaults come from the environment).
#[derive(Args)]
struct ViewArgs {
    /// Minimum confidence for posts in the feed (0.0-1.0)
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Feed category: all, positive, negative or neutral
    #[arg(long, global = true)]
    sentiment: Option<String>,

    /// Hours of history in the score series (at most 720)
    #[arg(long, global = true)]
    hours: Option<u32>,

    /// What the charts aggregate: active (unfiltered) or filtered
    #[arg(long, global = true)]
    scope: Option<String>,

    /// Read the dataset from a local JSON file instead of the URL
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Seed for synthetic data and simulated arrivals
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and render every widget once
    Snapshot,

    /// Start monitoring: simulate arrivals and re-render on every tick
    Watch {
        /// Stop after this many ticks (default: run until Ctrl-C)
        #[arg(long)]
        ticks: Option<u64>,

        /// Seconds between ticks (default: 3)
        #[arg(long)]
        interval: Option<f64>,

        /// Don't re-render the feed on each tick
        #[arg(long)]
        no_auto_refresh: bool,
    },

    /// Show only the filtered post feed
    Feed,

    /// Write the active collection to sentiment_analysis_data.json
    Export {
        /// Output directory (default: SENTIWATCH_EXPORT_DIR or .)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Print synthetic records as JSON
    Generate {
        /// Number of records to generate
        #[arg(long, default_value = "5")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sentiwatch=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    apply_view_args(&mut config, &cli.view)?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match cli.command {
        Commands::Generate { count } => {
            let records =
                synthetic::generate(count, &SentimentMix::default(), clock.now(), &mut rng);
            println!("{}", sentiwatch::output::export::to_json(&records)?);
        }

        Commands::Snapshot => {
            let dashboard = build_dashboard(&config, clock, rng).await?;
            let mut renderer = TerminalRenderer::new();
            dashboard.render_all(&mut renderer);
        }

        Commands::Feed => {
            let dashboard = build_dashboard(&config, clock, rng).await?;
            let mut renderer = TerminalRenderer::new();
            dashboard.render_feed(&mut renderer);
        }

        Commands::Export { dir } => {
            let dashboard = build_dashboard(&config, clock, rng).await?;
            let dir = dir.unwrap_or_else(|| config.export_dir.clone());
            let path = dashboard.export(&dir)?;
            println!(
                "{}",
                format!(
                    "Exported {} posts to {}",
                    dashboard.store().active().len(),
                    path.display()
                )
                .bold()
            );
        }

        Commands::Watch {
            ticks,
            interval,
            no_auto_refresh,
        } => {
            let tick_interval = match interval {
                Some(secs) => config::tick_interval_from_secs(secs)?,
                None => config.tick_interval,
            };

            let mut dashboard = build_dashboard(&config, clock, rng).await?;
            if no_auto_refresh {
                dashboard.set_auto_refresh(false);
            }

            let mut renderer = TerminalRenderer::new();
            dashboard.render_all(&mut renderer);

            let (handle, stop_rx) = MonitorHandle::channel();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Ctrl-C received, stopping monitor");
                    handle.stop();
                }
            });

            println!(
                "\n{}",
                format!(
                    "Monitoring every {:.1}s. Press Ctrl-C to stop.",
                    tick_interval.as_secs_f64()
                )
                .dimmed()
            );

            let options = MonitorOptions {
                interval: tick_interval,
                max_ticks: ticks,
            };
            let processed = monitor::run(&mut dashboard, &mut renderer, options, stop_rx).await?;

            // Final analytics pass, same as the refresh button
            dashboard.refresh(&mut renderer);
            println!("\n{}", "Monitoring stopped.".bold());
            println!("  Ticks processed: {processed}");
            println!(
                "  Simulated posts buffered: {}",
                dashboard.store().buffer_len()
            );
        }
    }

    Ok(())
}

/// Apply CLI view flags on top of the environment config, then re-validate.
fn apply_view_args(config: &mut Config, args: &ViewArgs) -> Result<()> {
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(ref sentiment) = args.sentiment {
        config.sentiment = sentiment.parse()?;
    }
    if let Some(hours) = args.hours {
        config.time_range_hours = hours;
    }
    if let Some(ref scope) = args.scope {
        config.metrics_scope = scope.parse()?;
    }
    if let Some(ref path) = args.data_file {
        config.data_file = Some(path.clone());
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()
}

/// Load the dataset (with a spinner while the source is queried) and build
/// the dashboard around it.
async fn build_dashboard(
    config: &Config,
    clock: Arc<dyn Clock>,
    mut rng: StdRng,
) -> Result<Dashboard> {
    let source: Box<dyn DatasetSource> = match config.data_file {
        Some(ref path) => Box::new(FileDatasetSource::new(path)),
        None => Box::new(HttpDatasetSource::new(&config.data_url)?),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Loading sentiment data from {}", source.describe()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let loaded = loader::load_dataset(
        source.as_ref(),
        config.synthetic_count,
        &SentimentMix::default(),
        clock.now(),
        &mut rng,
    )
    .await;

    spinner.finish_and_clear();

    match loaded.origin {
        DatasetOrigin::Source => {
            println!("Sentiment data loaded: {} posts", loaded.records.len());
        }
        DatasetOrigin::Fallback => {
            println!(
                "{} dataset unavailable, showing {} embedded sample posts",
                "Warning:".yellow(),
                loaded.records.len()
            );
        }
    }

    let settings = DashboardSettings {
        filter: config.view_filter(),
        time_range_hours: config.time_range_hours,
        metrics_scope: config.metrics_scope,
        auto_refresh: config.auto_refresh,
    };

    Ok(Dashboard::new(loaded.records, settings, clock, rng))
}
