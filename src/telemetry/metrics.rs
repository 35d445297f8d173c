//! Prometheus metrics

use crate::monitor::{TickOutcome, TickReport};
use std::net::SocketAddr;

const TICKS_TOTAL: &str = "rinkan_monitor_ticks_total";
const PAGES_FETCHED_TOTAL: &str = "rinkan_monitor_pages_fetched_total";
const NOTIFICATIONS_SENT_TOTAL: &str = "rinkan_monitor_notifications_sent_total";
const NOTIFICATIONS_FAILED_TOTAL: &str = "rinkan_monitor_notifications_failed_total";
const TICK_DURATION_SECONDS: &str = "rinkan_monitor_tick_duration_seconds";
const WATERMARK_SECONDS: &str = "rinkan_monitor_watermark_timestamp_seconds";

/// Serve metrics for scraping on the given address
pub fn init_metrics(addr: SocketAddr) -> anyhow::Result<()> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus metrics listening");
    Ok(())
}

/// Metric label for a tick outcome
pub fn outcome_label(outcome: &TickOutcome) -> &'static str {
    match outcome {
        TickOutcome::Completed => "completed",
        TickOutcome::Aborted { .. } => "aborted",
    }
}

/// Record a finished tick
pub fn record_tick(report: &TickReport) {
    metrics::counter!(TICKS_TOTAL, "outcome" => outcome_label(&report.outcome)).increment(1);
    metrics::counter!(PAGES_FETCHED_TOTAL).increment(u64::from(report.pages_fetched));
    metrics::counter!(NOTIFICATIONS_SENT_TOTAL)
        .increment(u64::try_from(report.notified).unwrap_or(u64::MAX));
    metrics::counter!(NOTIFICATIONS_FAILED_TOTAL)
        .increment(u64::try_from(report.failed_notifications).unwrap_or(u64::MAX));
    metrics::histogram!(TICK_DURATION_SECONDS).record(report.duration.as_secs_f64());

    if let Some(mark) = report.watermark.get() {
        metrics::gauge!(WATERMARK_SECONDS).set(mark.timestamp() as f64);
    }
}
