//! rinkan-monitor: new-listing alerts for Rinkan
//!
//! This library provides the components for:
//! - Building the search query from user filters
//! - Polling the search API, newest listings first
//! - Keyword matching against model names
//! - Discord webhook notifications
//! - Watermark-based tick orchestration and scheduling
//! - Logging and metrics

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod monitor;
pub mod notify;
pub mod search;
pub mod telemetry;
