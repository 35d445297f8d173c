//! Once command implementation

use crate::config::Config;
use crate::monitor::{Monitor, Watermark};
use crate::telemetry;
use chrono::{DateTime, Utc};
use clap::Args;

#[derive(Args, Debug)]
pub struct OnceArgs {
    /// Report products listed after this time (RFC 3339) instead of the configured policy
    #[arg(long)]
    pub since: Option<DateTime<Utc>>,
}

impl OnceArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let monitor = Monitor::from_config(config)?;
        let watermark = match self.since {
            Some(since) => Watermark::at(since),
            None => Watermark::initial(config.monitor.initial_watermark, Utc::now()),
        };

        let report = monitor.tick(watermark).await;
        telemetry::record_tick(&report);
        println!("{}", serde_json::to_string_pretty(&report)?);

        if !report.is_completed() {
            anyhow::bail!("tick aborted");
        }
        Ok(())
    }
}
