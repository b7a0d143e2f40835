//! Integration tests for chain generation and summaries.

use chrono::NaiveDate;
use option_chain_analytics::chain::{
    ChainGenerator, OptionContract, analyze_chain, generate_chain, summarize_chain,
};
use option_chain_analytics::config::ChainConfig;
use option_chain_analytics::pricing::{OptionType, black_scholes_price};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

#[test]
fn test_petr4_chain_shape() {
    let chain = generate_chain("PETR4", 32.50);

    let expiries: BTreeSet<NaiveDate> = chain.iter().map(|c| c.expiry_date).collect();
    assert_eq!(expiries.len(), 3);

    for expiry in &expiries {
        let count = chain.iter().filter(|c| c.expiry_date == *expiry).count();
        assert!(count <= 30);
    }
    assert!(chain.iter().all(|c| (26.0..=39.0).contains(&c.strike)));
    assert!(chain.len() <= 90);
}

#[test]
fn test_generation_is_deterministic() {
    let generator = ChainGenerator::new(ChainConfig::default());

    let first = generator.generate_on("VALE3", 55.80, fixed_date());
    let second = generator.generate_on("VALE3", 55.80, fixed_date());
    assert_eq!(first, second);
}

#[test]
fn test_call_and_put_per_strike() {
    let chain =
        ChainGenerator::new(ChainConfig::default()).generate_on("ITUB4", 28.90, fixed_date());

    for pair in chain.chunks(2) {
        assert_eq!(pair[0].option_type, OptionType::Call);
        assert_eq!(pair[1].option_type, OptionType::Put);
        assert_eq!(pair[0].strike, pair[1].strike);
        assert_eq!(pair[0].expiry_date, pair[1].expiry_date);
    }

    let symbols: HashSet<&str> = chain.iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(symbols.len(), chain.len());
}

#[test]
fn test_contract_invariants() {
    let chain =
        ChainGenerator::new(ChainConfig::default()).generate_on("PETR4", 32.50, fixed_date());

    for c in &chain {
        assert!(c.open_interest >= c.volume, "{}", c.symbol);
        assert!((0.10..=1.00).contains(&c.implied_volatility), "{}", c.symbol);
        assert!(c.price >= 0.01);
        assert!(c.bid <= c.price && c.price <= c.ask);
        assert!(c.bid_ask_spread >= 0.0 && c.bid_ask_spread < 0.11);
        assert!(c.intrinsic_value >= 0.0);
        assert_eq!(c.underlying, "PETR4");
    }
}

#[test]
fn test_engine_price_without_noise_is_bounded_by_chain_noise() {
    let generator = ChainGenerator::new(ChainConfig::default());
    let chain = generator.generate_on("PETR4", 32.50, fixed_date());
    let rate = generator.config().risk_free_rate;

    for c in chain.iter().filter(|c| c.days_to_expiry == 60) {
        let t = f64::from(c.days_to_expiry) / 365.0;
        let theoretical =
            black_scholes_price(32.50, c.strike, t, rate, c.implied_volatility, c.option_type);
        if theoretical > 1.0 {
            let ratio = c.price / theoretical;
            assert!((0.85..=1.15).contains(&ratio), "{}: ratio {ratio}", c.symbol);
        }
    }
}

#[test]
fn test_summaries_one_per_expiry() {
    let chain =
        ChainGenerator::new(ChainConfig::default()).generate_on("PETR4", 32.50, fixed_date());
    let summaries = summarize_chain(&chain, 32.50);

    assert_eq!(summaries.len(), 3);
    assert!(summaries.windows(2).all(|w| w[0].expiry_date < w[1].expiry_date));

    for s in &summaries {
        assert_eq!(s.total_calls, 15);
        assert_eq!(s.total_puts, 15);
        assert_eq!(s.strike_range_min, 26.0);
        assert_eq!(s.strike_range_max, 39.0);
        assert_eq!(s.atm_strike, 32.5);
        assert!(s.max_volume_call.starts_with("PETR4C"));
        assert!(s.max_oi_put.starts_with("PETR4P"));

        let group: Vec<&OptionContract> =
            chain.iter().filter(|c| c.expiry_date == s.expiry_date).collect();
        assert_eq!(s.total_volume, group.iter().map(|c| c.volume).sum::<u64>());
        assert!(group.iter().all(|c| c.days_to_expiry == s.days_to_expiry));
    }
}

#[test]
fn test_calls_only_summary() {
    let calls: Vec<OptionContract> =
        ChainGenerator::new(ChainConfig::default())
            .generate_on("PETR4", 32.50, fixed_date())
            .into_iter()
            .filter(OptionContract::is_call)
            .collect();

    let summaries = summarize_chain(&calls, 32.50);
    assert_eq!(summaries.len(), 3);
    for s in &summaries {
        assert_eq!(s.total_puts, 0);
        assert_eq!(s.avg_iv_puts, 0.0);
        assert_eq!(s.pcr_volume, 0.0);
        assert_eq!(s.pcr_oi, 0.0);
        assert!(s.max_volume_put.is_empty());
        assert!(s.avg_iv_calls > 0.0);
    }
}

#[test]
fn test_summarize_empty_chain() {
    assert!(summarize_chain(&[], 32.50).is_empty());
    assert!(analyze_chain("PETR4", &[]).is_none());
}

#[test]
fn test_analyze_chain_totals() {
    let chain =
        ChainGenerator::new(ChainConfig::default()).generate_on("WEGE3", 45.20, fixed_date());
    let analysis = analyze_chain("WEGE3", &chain).unwrap();

    assert_eq!(analysis.total_options, chain.len());
    assert_eq!(analysis.total_calls + analysis.total_puts, chain.len());
    assert_eq!(
        analysis.max_volume_option.volume,
        chain.iter().map(|c| c.volume).max().unwrap()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_generated_contracts_hold_invariants(spot in 1.0f64..500.0) {
        let chain = ChainGenerator::new(ChainConfig::default())
            .generate_on("PROP3", spot, fixed_date());

        prop_assert!(!chain.is_empty());
        prop_assert_eq!(chain.len() % 2, 0);
        for c in &chain {
            prop_assert!(c.open_interest >= c.volume);
            prop_assert!((0.10..=1.00).contains(&c.implied_volatility));
            prop_assert!(c.strike > 0.0);
            prop_assert!(c.price >= 0.01);
        }
    }
}
