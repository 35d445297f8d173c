//! Monitor module
//!
//! Tick orchestration: fetch new listings, filter them, notify matches and
//! carry the watermark forward between ticks.

mod scheduler;
mod tick;
mod watermark;

pub use scheduler::Scheduler;
pub use tick::{Monitor, TickOutcome, TickReport, TickSettings};
pub use watermark::Watermark;

use crate::config::{Config, MonitorConfig};
use crate::filter::KeywordFilter;
use crate::notify::DiscordWebhook;
use crate::search::SearchClient;

impl From<&MonitorConfig> for TickSettings {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            pagination: config.pagination,
            max_pages: config.max_pages,
            notification_delay: config.notification_delay(),
        }
    }
}

impl Monitor<SearchClient, DiscordWebhook> {
    /// Build a monitor talking to the configured search API and webhook
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let source = SearchClient::from_config(config)?;
        let notifier = DiscordWebhook::from_config(config)?;

        Ok(Self::new(
            source,
            notifier,
            KeywordFilter::new(&config.keywords),
            TickSettings::from(&config.monitor),
        ))
    }
}
