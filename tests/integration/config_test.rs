//! Configuration loading tests

use rinkan_monitor::config::{Config, InitialWatermark};
use rinkan_monitor::search::{QueryParams, SearchMode};

#[test]
fn test_example_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();

    assert_eq!(config.monitor.initial_watermark, InitialWatermark::Now);
    assert!(config.monitor.pagination);

    let params = QueryParams::from_config(&config);
    assert_eq!(params.mode(), SearchMode::Delegated);
    assert_eq!(params.values("color[]").collect::<Vec<_>>(), vec!["ブラック", "ブルー"]);
}
