// Monitor: the timer-driven loop behind `sentiwatch watch`.
//
// One tokio interval drives the dashboard's tick cycle. The first tick
// fires immediately on start. Each tick runs to completion before the next
// is awaited, so ticks never overlap. Stopping flips a watch channel; the
// loop notices between ticks and exits without aborting anything.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::dashboard::Dashboard;
use crate::output::traits::RenderPort;

/// How the monitor loop runs.
#[derive(Debug, Clone, Copy)]
pub struct MonitorOptions {
    /// Time between ticks (default 3 seconds).
    pub interval: Duration,
    /// Stop after this many ticks. None runs until stopped.
    pub max_ticks: Option<u64>,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_ticks: None,
        }
    }
}

/// Stop control for a running monitor.
pub struct MonitorHandle {
    stop_tx: watch::Sender<bool>,
}

impl MonitorHandle {
    /// Create a handle and the receiver the monitor loop listens on.
    pub fn channel() -> (Self, watch::Receiver<bool>) {
        let (stop_tx, stop_rx) = watch::channel(false);
        (Self { stop_tx }, stop_rx)
    }

    /// Ask the monitor to stop before its next tick.
    pub fn stop(&self) {
        // Err only means the loop already exited
        let _ = self.stop_tx.send(true);
    }
}

/// Run the monitor until stopped or `max_ticks` is reached.
///
/// Returns the number of ticks processed. The dashboard is left in the
/// Stopped state either way.
pub async fn run(
    dashboard: &mut Dashboard,
    port: &mut dyn RenderPort,
    options: MonitorOptions,
    mut stop_rx: watch::Receiver<bool>,
) -> Result<u64> {
    if options.interval.is_zero() {
        anyhow::bail!("Monitor interval must be greater than zero");
    }

    dashboard.start();
    port.render_status(dashboard.status());

    let mut interval = tokio::time::interval(options.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks = 0u64;
    // Once every handle is dropped nothing can stop us but max_ticks
    let mut stop_open = true;
    info!(interval = ?options.interval, "Monitor loop running");

    loop {
        if options.max_ticks.is_some_and(|max| ticks >= max) || *stop_rx.borrow() {
            break;
        }

        tokio::select! {
            _ = interval.tick() => {
                let arrival = dashboard.on_tick(port);
                ticks += 1;
                debug!(
                    tick = ticks,
                    arrival = arrival.as_ref().map(|p| p.id.as_str()).unwrap_or("-"),
                    buffered = dashboard.store().buffer_len(),
                    "Tick complete"
                );
            }
            changed = stop_rx.changed(), if stop_open => {
                match changed {
                    Ok(()) if *stop_rx.borrow() => break,
                    Ok(()) => {}
                    Err(_) => stop_open = false,
                }
            }
        }
    }

    dashboard.stop();
    port.render_status(dashboard.status());
    info!(ticks, "Monitor loop finished");
    Ok(ticks)
}
