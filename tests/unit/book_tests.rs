//! Integration tests for the chain book.

use chrono::NaiveDate;
use option_chain_analytics::Error;
use option_chain_analytics::book::ChainBookManager;
use option_chain_analytics::chain::ChainGenerator;
use option_chain_analytics::config::{ChainConfig, Config};
use option_chain_analytics::market::{SpotPriceSource, StaticSpotPrices};
use option_chain_analytics::pricing::{Greeks, OptionPricer, PricingParams};
use std::sync::Arc;

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

struct FixedSpot(f64);

impl SpotPriceSource for FixedSpot {
    fn spot_price(&self, _underlying: &str) -> f64 {
        self.0
    }
}

struct IntrinsicPricer;

impl OptionPricer for IntrinsicPricer {
    fn price(&self, params: &PricingParams) -> f64 {
        params
            .option_type
            .intrinsic(params.spot, params.strike)
            .max(0.01)
    }

    fn greeks(&self, _params: &PricingParams) -> Greeks {
        Greeks::zero()
    }
}

#[test]
fn test_manager_from_default_config() {
    let config = Config::default();
    let manager = ChainBookManager::from_config(&config);

    let total = manager.collect_all(&config.underlyings);
    assert_eq!(total, 90 * config.underlyings.len());
    assert_eq!(manager.len(), config.underlyings.len());
}

#[test]
fn test_manager_with_injected_collaborators() {
    let generator = ChainGenerator::with_pricer(ChainConfig::default(), IntrinsicPricer);
    let manager = ChainBookManager::new(generator, Arc::new(FixedSpot(100.0)));

    manager.collect_on("ANY", fixed_date()).unwrap();
    let book = manager.get("ANY").unwrap();
    assert_eq!(book.spot_price(), 100.0);

    for contract in book.contracts() {
        assert!(contract.greeks.is_zero());
        assert!(contract.price >= 0.01);
    }
}

#[test]
fn test_manager_invalid_spot_is_error() {
    let manager = ChainBookManager::new(
        ChainGenerator::new(ChainConfig::default()),
        Arc::new(FixedSpot(f64::NAN)),
    );

    let err = manager.collect_on("PETR4", fixed_date()).unwrap_err();
    assert!(matches!(err, Error::InvalidSpotPrice { .. }));
    assert_eq!(manager.collect_all(&["PETR4", "VALE3"]), 0);
    assert!(manager.is_empty());
}

#[test]
fn test_manager_queries() {
    let manager = ChainBookManager::new(
        ChainGenerator::new(ChainConfig::default()),
        Arc::new(StaticSpotPrices::default()),
    );
    for symbol in ["VALE3", "PETR4", "ITUB4"] {
        manager.collect_on(symbol, fixed_date()).unwrap();
    }

    assert_eq!(manager.underlying_symbols(), vec!["ITUB4", "PETR4", "VALE3"]);

    let options = manager.options_by_underlying("PETR4", 100).unwrap();
    assert_eq!(options.len(), 90);
    assert!(options.windows(2).all(|w| w[0].expiry_date <= w[1].expiry_date));
    assert!(manager.options_by_underlying("BBDC4", 10).is_err());

    let summaries = manager.chain_summaries(None);
    assert_eq!(summaries.len(), 9);
    assert_eq!(summaries[0].underlying, "ITUB4");

    let top = manager.top_volume(5);
    assert!(top.len() <= 5);
    assert!(top.windows(2).all(|w| w[0].volume >= w[1].volume));

    let stats = manager.stats();
    assert_eq!(stats.underlying_count, 3);
    assert_eq!(stats.total_contracts, 270);
    assert_eq!(stats.total_expirations, 9);
}

#[test]
fn test_export_json_round_trips_contracts() {
    let manager = ChainBookManager::from_config(&Config::default());
    manager.collect_on("PETR4", fixed_date()).unwrap();

    let json = manager.export_json("PETR4").unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let first = &value["contracts"][0];
    assert_eq!(first["symbol"], "PETR4C260020261118");
    assert_eq!(first["option_type"], "CALL");
    assert_eq!(first["expiry_date"], "2026-11-18");
    assert!(first["delta"].is_number());
    assert_eq!(value["generated_on"], "2026-10-19");
}
