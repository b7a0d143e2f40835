//! Integration tests for the pricing module.

use approx::assert_abs_diff_eq;
use option_chain_analytics::pricing::{
    MIN_OPTION_PRICE, OptionType, black_scholes_price, calculate_greeks,
};
use proptest::prelude::*;

#[test]
fn test_near_the_money_sanity_bound() {
    let price = black_scholes_price(100.0, 100.0, 0.25, 0.1075, 0.30, OptionType::Call);
    assert!(price > 5.0 && price < 15.0, "price = {price}");
}

#[test]
fn test_degenerate_inputs_hit_floor() {
    for (spot, strike, t, vol) in [
        (0.0, 100.0, 0.25, 0.3),
        (100.0, 0.0, 0.25, 0.3),
        (100.0, 100.0, 0.0, 0.3),
        (100.0, 100.0, -1.0, 0.3),
        (100.0, 100.0, 0.25, 0.0),
        (100.0, 100.0, 0.25, -0.2),
    ] {
        for option_type in [OptionType::Call, OptionType::Put] {
            let price = black_scholes_price(spot, strike, t, 0.1075, vol, option_type);
            assert_eq!(price, MIN_OPTION_PRICE);
        }
    }
}

#[test]
fn test_greeks_zero_for_expired_or_flat_volatility() {
    assert!(calculate_greeks(100.0, 100.0, 0.0, 0.1075, 0.3, OptionType::Call).is_zero());
    assert!(calculate_greeks(100.0, 100.0, -0.5, 0.1075, 0.3, OptionType::Put).is_zero());
    assert!(calculate_greeks(100.0, 100.0, 0.25, 0.1075, 0.0, OptionType::Call).is_zero());
}

#[test]
fn test_call_and_put_share_gamma_and_vega() {
    let call = calculate_greeks(50.0, 55.0, 0.5, 0.1075, 0.35, OptionType::Call);
    let put = calculate_greeks(50.0, 55.0, 0.5, 0.1075, 0.35, OptionType::Put);

    assert_eq!(call.gamma, put.gamma);
    assert_eq!(call.vega, put.vega);
    assert_abs_diff_eq!(call.delta - put.delta, 1.0, epsilon = 2e-4);
}

proptest! {
    #[test]
    fn prop_price_never_below_floor(
        spot in -50.0f64..500.0,
        strike in -50.0f64..500.0,
        t in -1.0f64..3.0,
        r in -0.05f64..0.25,
        vol in -0.5f64..2.0,
        is_call in any::<bool>(),
    ) {
        let option_type = if is_call { OptionType::Call } else { OptionType::Put };
        let price = black_scholes_price(spot, strike, t, r, vol, option_type);
        prop_assert!(price >= MIN_OPTION_PRICE);
        prop_assert!(price.is_finite());
    }

    #[test]
    fn prop_call_above_no_arbitrage_bound(
        spot in 1.0f64..500.0,
        strike in 1.0f64..500.0,
        t in 0.01f64..3.0,
        r in 0.0f64..0.25,
        vol in 0.05f64..1.5,
    ) {
        let call = black_scholes_price(spot, strike, t, r, vol, OptionType::Call);
        let bound = (spot - strike * (-r * t).exp()).max(0.0);
        prop_assert!(call >= bound - 1e-9, "call {call} < bound {bound}");
    }

    #[test]
    fn prop_put_call_parity(
        spot in 10.0f64..200.0,
        strike in 10.0f64..200.0,
        t in 0.05f64..2.0,
        r in 0.0f64..0.2,
        vol in 0.1f64..1.0,
    ) {
        let call = black_scholes_price(spot, strike, t, r, vol, OptionType::Call);
        let put = black_scholes_price(spot, strike, t, r, vol, OptionType::Put);
        prop_assume!(call > MIN_OPTION_PRICE && put > MIN_OPTION_PRICE);

        let forward_gap = spot - strike * (-r * t).exp();
        prop_assert!((call - put - forward_gap).abs() < 1e-6);
    }

    #[test]
    fn prop_delta_ranges(
        spot in 1.0f64..500.0,
        strike in 1.0f64..500.0,
        t in 0.01f64..3.0,
        r in 0.0f64..0.25,
        vol in 0.05f64..1.5,
    ) {
        let call = calculate_greeks(spot, strike, t, r, vol, OptionType::Call);
        let put = calculate_greeks(spot, strike, t, r, vol, OptionType::Put);

        prop_assert!((0.0..=1.0).contains(&call.delta));
        prop_assert!((-1.0..=0.0).contains(&put.delta));
        prop_assert!(call.gamma >= 0.0);
        prop_assert!(call.vega >= 0.0);
    }
}
