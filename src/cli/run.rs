//! Run command implementation

use crate::config::Config;
use crate::monitor::{Monitor, Scheduler, Watermark};
use crate::telemetry;
use chrono::Utc;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the tick interval in seconds
    #[arg(long)]
    pub interval: Option<u64>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let monitor = Monitor::from_config(config)?;
        let interval = match self.interval {
            Some(0) => anyhow::bail!("--interval must be greater than zero"),
            Some(secs) => Duration::from_secs(secs),
            None => config.monitor.tick_interval(),
        };
        let initial = Watermark::initial(config.monitor.initial_watermark, Utc::now());

        tracing::info!(
            mode = ?monitor.filter().mode(),
            pagination = monitor.settings().pagination,
            initial_watermark = ?initial.get(),
            "Monitor configured"
        );

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Could not listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };

        let scheduler = Scheduler::new(monitor, interval);
        let last = scheduler.run(initial, shutdown, telemetry::record_tick).await;

        tracing::info!(watermark = ?last.get(), "Monitor stopped");
        Ok(())
    }
}
