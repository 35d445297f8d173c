//! Fixed-rate tick scheduling
//!
//! Ticks run one at a time. A tick that overruns its interval delays the next
//! one instead of overlapping it.

use super::{Monitor, TickReport, Watermark};
use crate::notify::Notifier;
use crate::search::ProductSource;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Drives a [`Monitor`] on a fixed interval
pub struct Scheduler<S, N> {
    monitor: Monitor<S, N>,
    interval: Duration,
}

impl<S: ProductSource, N: Notifier> Scheduler<S, N> {
    pub fn new(monitor: Monitor<S, N>, interval: Duration) -> Self {
        Self { monitor, interval }
    }

    pub fn monitor(&self) -> &Monitor<S, N> {
        &self.monitor
    }

    /// Tick until `shutdown` resolves, starting immediately
    ///
    /// `on_report` sees every tick's report. Returns the final watermark.
    /// Shutdown is only observed between ticks.
    pub async fn run<F, R>(&self, initial: Watermark, shutdown: F, mut on_report: R) -> Watermark
    where
        F: Future<Output = ()>,
        R: FnMut(&TickReport),
    {
        tracing::info!(interval_secs = self.interval.as_secs(), "Starting monitor");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut watermark = initial;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping monitor");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let report = self.monitor.tick(watermark).await;
            watermark = report.watermark;
            on_report(&report);
        }

        watermark
    }
}
