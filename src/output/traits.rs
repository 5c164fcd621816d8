// Rendering port: the seam between the dashboard and whatever draws it.
//
// The terminal renderer is the shipped implementation. Tests record calls
// through their own implementation.

use chrono::{DateTime, Utc};

use crate::dashboard::MonitorStatus;
use crate::metrics::distribution::Highlights;
use crate::metrics::Snapshot;
use crate::posts::models::PostRecord;

pub trait RenderPort {
    /// Monitoring indicator.
    fn render_status(&mut self, status: MonitorStatus);

    /// Headline counts, percentages and the overall score gauge.
    fn render_metrics(&mut self, snapshot: &Snapshot);

    /// Sentiment pie, score series, volume, sources, confidence histogram.
    fn render_charts(&mut self, snapshot: &Snapshot);

    fn render_highlights(&mut self, highlights: &Highlights);

    /// The filtered feed, newest first. `now` is for relative times.
    fn render_feed(&mut self, posts: &[PostRecord], now: DateTime<Utc>);
}
