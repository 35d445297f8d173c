//! Configuration types for rinkan-monitor

use crate::error::ConfigError;
use crate::search::Color;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Default Rinkan search endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://api.rinkan-online.com/api/search";
/// Default base URL for product detail pages
pub const DEFAULT_PRODUCT_PAGE_URL: &str = "https://rinkan-online.com/products";

/// Root configuration structure
///
/// The filter fields sit at the top level so that the plain JSON layout
/// (`keywords`, `colors`, `categories`, `brand`, `discord_webhook_url`) loads as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Keywords matched against a product's model name
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Color filters, enabled when the flag is true
    #[serde(default)]
    pub colors: BTreeMap<Color, bool>,
    /// Category filters passed straight through to the search API
    #[serde(default)]
    pub categories: Vec<String>,
    /// Exact-match brand filter
    #[serde(default)]
    pub brand: Option<String>,
    /// Discord webhook that receives notifications
    pub discord_webhook_url: String,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Polling behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between tick starts
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,

    /// Walk result pages until a stale product is found, instead of reading page one only
    #[serde(default = "default_true")]
    pub pagination: bool,

    /// Watermark used for the first tick after startup
    #[serde(default)]
    pub initial_watermark: InitialWatermark,

    /// Pause after every notification, to stay under the webhook rate limit
    #[serde(default = "default_notification_delay_ms")]
    pub notification_delay_ms: u64,

    /// Per-request HTTP timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on pages fetched in a single tick
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

/// Where the watermark starts when the process boots
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InitialWatermark {
    /// Suppress everything already listed at startup
    #[default]
    Now,
    /// Report everything currently in stock on the first tick
    Unset,
}

fn default_true() -> bool {
    true
}
fn default_tick_interval_secs() -> u64 {
    300 // 5 minutes
}
fn default_notification_delay_ms() -> u64 {
    2000
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_max_pages() -> u32 {
    20
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
            pagination: true,
            initial_watermark: InitialWatermark::Now,
            notification_delay_ms: default_notification_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            max_pages: default_max_pages(),
        }
    }
}

impl MonitorConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    pub fn notification_delay(&self) -> Duration {
        Duration::from_millis(self.notification_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Remote endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_product_page_url")]
    pub product_page_url: String,
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}
fn default_product_page_url() -> String {
    DEFAULT_PRODUCT_PAGE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            product_page_url: default_product_page_url(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Serve Prometheus metrics on this port when set
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, or JSON when the extension is `.json`
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config: Config = if is_json {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Brand filter, with an empty string treated as absent
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref().map(str::trim).filter(|b| !b.is_empty())
    }

    /// Reject settings that would make the monitor misbehave at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discord_webhook_url.trim().is_empty() {
            return Err(ConfigError::Missing("discord_webhook_url"));
        }
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "keywords",
                reason: "keywords must not be blank".to_string(),
            });
        }
        if self.monitor.tick_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "monitor.tick_interval_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.monitor.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "monitor.request_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.monitor.max_pages == 0 {
            return Err(ConfigError::Invalid {
                field: "monitor.max_pages",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
