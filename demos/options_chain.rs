//! Generates chains for the configured underlyings and prints their summaries.
//!
//! Run with:
//! ```bash
//! RUST_LOG=debug cargo run --example options_chain
//! cargo run --example options_chain -- path/to/config.toml
//! ```

use option_chain_analytics::Result;
use option_chain_analytics::book::ChainBookManager;
use option_chain_analytics::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let manager = ChainBookManager::from_config(&config);
    let collected = manager.collect_all(&config.underlyings);
    info!(contracts = collected, "collection finished");

    println!("=== Chain Summaries ===");
    for summary in manager.chain_summaries(None) {
        println!("{summary}");
    }

    println!("\n=== Top Volume ===");
    for contract in manager.top_volume(5) {
        println!(
            "{:<22} {:>4} strike {:>7.2} vol {:>5} OI {:>6} IV {:.2}%",
            contract.symbol,
            contract.option_type,
            contract.strike,
            contract.volume,
            contract.open_interest,
            contract.implied_volatility * 100.0
        );
    }

    for underlying in manager.underlying_symbols() {
        let analysis = manager.analysis(&underlying)?;
        println!(
            "\n{}: {} options, avg IV {:.2}%, most active {} ({})",
            analysis.underlying,
            analysis.total_options,
            analysis.avg_iv * 100.0,
            analysis.max_volume_option.symbol,
            analysis.max_volume_option.volume
        );
        println!("{}", manager.get(&underlying)?.stats());
    }

    println!("\n{}", manager.stats());
    Ok(())
}
