//! CLI interface for rinkan-monitor
//!
//! Provides subcommands for:
//! - `run`: Poll on the configured interval until interrupted
//! - `once`: Run a single tick and print its report
//! - `config`: Show the resolved configuration and search query

mod once;
mod run;

pub use once::OnceArgs;
pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rinkan-monitor")]
#[command(about = "Watches Rinkan for newly listed products and posts matches to Discord")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll on the configured interval until interrupted
    Run(RunArgs),
    /// Run a single tick and print its report
    Once(OnceArgs),
    /// Show the resolved configuration and search query
    Config,
}
