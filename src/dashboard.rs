// Dashboard controller. Owns the application state and sequences every
// update: simulated arrival, aggregate recompute, render.
//
// There is exactly one mutator. The monitor loop calls `on_tick`; CLI
// commands call the setters and `render_all`/`refresh`/`export`. Rendering
// goes through the RenderPort trait so the controller never knows how
// charts are drawn.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use tracing::info;

use crate::metrics::series::MAX_TIME_RANGE_HOURS;
use crate::metrics::Snapshot;
use crate::output::export;
use crate::output::traits::RenderPort;
use crate::posts::models::PostRecord;
use crate::posts::store::RecordStore;
use crate::stream::clock::Clock;
use crate::stream::tick::SimulatedStream;
use crate::view::filter::{MetricsScope, SentimentFilter, ViewFilter};

/// Whether simulated arrivals are currently being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorStatus {
    Monitoring,
    #[default]
    Stopped,
}

impl MonitorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorStatus::Monitoring => "Monitoring",
            MonitorStatus::Stopped => "Stopped",
        }
    }
}

/// User-controlled view settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardSettings {
    pub filter: ViewFilter,
    pub time_range_hours: u32,
    pub metrics_scope: MetricsScope,
    pub auto_refresh: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            filter: ViewFilter::default(),
            time_range_hours: 24,
            metrics_scope: MetricsScope::Active,
            auto_refresh: true,
        }
    }
}

pub struct Dashboard {
    store: RecordStore,
    stream: SimulatedStream,
    settings: DashboardSettings,
    status: MonitorStatus,
    clock: Arc<dyn Clock>,
    rng: StdRng,
}

impl Dashboard {
    pub fn new(
        dataset: Vec<PostRecord>,
        settings: DashboardSettings,
        clock: Arc<dyn Clock>,
        rng: StdRng,
    ) -> Self {
        Self {
            store: RecordStore::new(dataset),
            stream: SimulatedStream::new(),
            settings,
            status: MonitorStatus::Stopped,
            clock,
            rng,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn status(&self) -> MonitorStatus {
        self.status
    }

    // -- Controls --

    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("Confidence threshold must be between 0 and 1 (got {threshold})");
        }
        self.settings.filter.threshold = threshold;
        Ok(())
    }

    pub fn set_sentiment_filter(&mut self, sentiment: SentimentFilter) {
        self.settings.filter.sentiment = sentiment;
    }

    pub fn set_time_range(&mut self, hours: u32) -> Result<()> {
        if hours > MAX_TIME_RANGE_HOURS {
            anyhow::bail!("Time range must be at most {MAX_TIME_RANGE_HOURS} hours (got {hours})");
        }
        self.settings.time_range_hours = hours;
        Ok(())
    }

    pub fn set_metrics_scope(&mut self, scope: MetricsScope) {
        self.settings.metrics_scope = scope;
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.settings.auto_refresh = enabled;
        info!(enabled, "Auto-refresh toggled");
    }

    pub fn start(&mut self) {
        self.status = MonitorStatus::Monitoring;
        info!("Monitoring started");
    }

    pub fn stop(&mut self) {
        self.status = MonitorStatus::Stopped;
        info!("Monitoring stopped");
    }

    // -- Views --

    /// Posts the feed shows: the filtered active collection, capped.
    pub fn feed(&self) -> Vec<PostRecord> {
        self.settings.filter.feed(self.store.active())
    }

    /// Posts the charts and headline metrics aggregate over, per the
    /// configured MetricsScope.
    pub fn chart_posts(&self) -> Cow<'_, [PostRecord]> {
        match self.settings.metrics_scope {
            MetricsScope::Active => Cow::Borrowed(self.store.active()),
            MetricsScope::Filtered => Cow::Owned(self.settings.filter.apply(self.store.active())),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::compute(
            &self.chart_posts(),
            self.clock.now(),
            self.settings.time_range_hours,
        )
    }

    // -- Update cycles --

    /// Add one simulated arrival. Does nothing unless monitoring.
    pub fn tick(&mut self) -> Option<PostRecord> {
        if self.status != MonitorStatus::Monitoring {
            return None;
        }
        let now = self.clock.now();
        self.stream.tick(&mut self.store, now, &mut self.rng)
    }

    /// One monitor iteration: arrival, recompute, render. The feed is only
    /// re-rendered when auto-refresh is on.
    pub fn on_tick(&mut self, port: &mut dyn RenderPort) -> Option<PostRecord> {
        let arrival = self.tick();
        let snapshot = self.snapshot();
        port.render_metrics(&snapshot);
        port.render_charts(&snapshot);
        if self.settings.auto_refresh {
            self.render_feed(port);
        }
        arrival
    }

    /// Full render of every widget.
    pub fn render_all(&self, port: &mut dyn RenderPort) {
        let snapshot = self.snapshot();
        port.render_status(self.status);
        port.render_metrics(&snapshot);
        port.render_charts(&snapshot);
        port.render_highlights(&snapshot.highlights);
        self.render_feed(port);
    }

    pub fn render_feed(&self, port: &mut dyn RenderPort) {
        port.render_feed(&self.feed(), self.clock.now());
    }

    /// Recompute highlights and charts on demand.
    pub fn refresh(&self, port: &mut dyn RenderPort) {
        let snapshot = self.snapshot();
        port.render_highlights(&snapshot.highlights);
        port.render_charts(&snapshot);
    }

    /// Write the active collection to the export file in `dir`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        export::write_export(self.store.active(), dir)
    }
}
