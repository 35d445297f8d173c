//! Telemetry module
//!
//! Logging and metrics

mod logging;
mod metrics;

pub use self::logging::init_logging;
pub use self::metrics::{init_metrics, outcome_label, record_tick};

use crate::config::TelemetryConfig;
use std::net::{Ipv4Addr, SocketAddr};

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)?;

    if let Some(port) = config.metrics_port {
        init_metrics(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))?;
    }

    Ok(())
}
