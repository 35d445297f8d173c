use clap::Parser;
use rinkan_monitor::cli::{Cli, Commands};
use rinkan_monitor::config::Config;
use rinkan_monitor::search::QueryParams;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .map_err(|e| anyhow::anyhow!("Could not load config from {}: {}", cli.config, e))?;

    // Initialize telemetry
    rinkan_monitor::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting monitor");
            args.execute(&config).await?;
        }
        Commands::Once(args) => {
            tracing::info!("Running a single tick");
            args.execute(&config).await?;
        }
        Commands::Config => {
            let params = QueryParams::from_config(&config);
            println!("Current configuration:");
            println!("  Keywords: {:?} ({:?})", config.keywords, params.mode());
            println!("  Brand: {}", config.brand().unwrap_or("-"));
            println!("  Categories: {:?}", config.categories);
            println!(
                "  Tick: every {}s, pagination={}, initial watermark={:?}",
                config.monitor.tick_interval_secs,
                config.monitor.pagination,
                config.monitor.initial_watermark
            );
            println!(
                "  Notification delay: {}ms",
                config.monitor.notification_delay_ms
            );
            println!("  Search URL: {}", config.api.search_url);
            println!("  Query:");
            for (key, value) in params.pairs() {
                println!("    {}={}", key, value);
            }
        }
    }

    Ok(())
}
