//! Synthetic market models: volatility smile, price noise, spreads and
//! liquidity.
//!
//! Every draw is keyed on the attributes that identify the contract, so the
//! same inputs always yield the same synthetic market.

use super::seed::SeedKey;
use crate::pricing::OptionType;
use chrono::NaiveDate;

/// Lower clamp on synthetic implied volatility.
pub const MIN_IMPLIED_VOL: f64 = 0.10;
/// Upper clamp on synthetic implied volatility.
pub const MAX_IMPLIED_VOL: f64 = 1.00;

/// Expiries shorter than this (about 36 days) count as short-dated.
pub const SHORT_DATED_YEARS: f64 = 0.1;
/// Expiries longer than this (about 6 months) count as long-dated.
pub const LONG_DATED_YEARS: f64 = 0.5;

const BASE_IV_FLOOR: f64 = 0.25;
const BASE_IV_STEPS: u64 = 35;

fn tag(option_type: OptionType) -> u8 {
    option_type.code() as u8
}

/// Base IV in `[0.25, 0.60)` in 1% steps, keyed on spot and strike.
#[must_use]
pub fn base_implied_volatility(seed: u64, spot: f64, strike: f64) -> f64 {
    let step = SeedKey::new("iv")
        .with_seed(seed)
        .with_f64(spot)
        .with_f64(strike)
        .below(BASE_IV_STEPS);
    BASE_IV_FLOOR + step as f64 / 100.0
}

/// Applies the smile and term-structure adjustments to a base IV and clamps
/// the result to `[0.10, 1.00]`.
///
/// OTM puts (`moneyness > 1`) get a skew multiplier growing with moneyness,
/// OTM calls a smaller one. Short-dated expiries are lifted by 20%,
/// long-dated ones lowered by 10%.
#[must_use]
pub fn smile_adjusted_volatility(
    base: f64,
    moneyness: f64,
    time_to_expiry: f64,
    option_type: OptionType,
) -> f64 {
    let mut iv = base;

    match option_type {
        OptionType::Put if moneyness > 1.0 => iv *= 1.1 + 0.2 * (moneyness - 1.0),
        OptionType::Call if moneyness < 1.0 => iv *= 1.05 + 0.1 * (1.0 - moneyness),
        _ => {}
    }

    if time_to_expiry < SHORT_DATED_YEARS {
        iv *= 1.2;
    } else if time_to_expiry > LONG_DATED_YEARS {
        iv *= 0.9;
    }

    if iv.is_nan() {
        return MIN_IMPLIED_VOL;
    }
    iv.clamp(MIN_IMPLIED_VOL, MAX_IMPLIED_VOL)
}

/// Synthetic implied volatility for one contract.
#[must_use]
pub fn implied_volatility(
    seed: u64,
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    option_type: OptionType,
) -> f64 {
    let base = base_implied_volatility(seed, spot, strike);
    smile_adjusted_volatility(base, spot / strike, time_to_expiry, option_type)
}

/// Multiplicative market noise in `[0.90, 1.10)`.
#[must_use]
pub fn price_noise(
    seed: u64,
    underlying: &str,
    strike: f64,
    expiry: NaiveDate,
    option_type: OptionType,
) -> f64 {
    let step = SeedKey::new("noise")
        .with_seed(seed)
        .with_str(underlying)
        .with_f64(strike)
        .with_date(expiry)
        .with_tag(tag(option_type))
        .below(20);
    1.0 + (step as f64 - 10.0) / 100.0
}

/// Bid/ask spread as a fraction of price, in `[0.05, 0.10)`.
#[must_use]
pub fn spread_fraction(seed: u64, strike: f64, option_type: OptionType) -> f64 {
    let step = SeedKey::new("spread")
        .with_seed(seed)
        .with_f64(strike)
        .with_tag(tag(option_type))
        .below(10);
    0.05 + step as f64 / 200.0
}

/// Volume multiplier from moneyness, expiry and IV.
///
/// At-the-money strikes (within 5%) trade 3x, near-the-money (within 10%) 2x;
/// short-dated expiries 2x, long-dated 0.5x; IV above 40% adds 1.5x.
#[must_use]
pub fn liquidity_multiplier(moneyness: f64, time_to_expiry: f64, implied_vol: f64) -> f64 {
    let mut factor = 1.0;

    if (0.95..=1.05).contains(&moneyness) {
        factor *= 3.0;
    } else if (0.90..=1.10).contains(&moneyness) {
        factor *= 2.0;
    }

    if time_to_expiry < SHORT_DATED_YEARS {
        factor *= 2.0;
    } else if time_to_expiry > LONG_DATED_YEARS {
        factor *= 0.5;
    }

    if implied_vol > 0.40 {
        factor *= 1.5;
    }

    factor
}

/// Synthetic traded volume: a base in `[0, 1000)` shaped by
/// [`liquidity_multiplier`].
#[must_use]
pub fn volume(
    seed: u64,
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    option_type: OptionType,
    implied_vol: f64,
) -> u64 {
    let base = SeedKey::new("volume")
        .with_seed(seed)
        .with_f64(spot)
        .with_f64(strike)
        .with_tag(tag(option_type))
        .below(1000);
    let shaped = base as f64 * liquidity_multiplier(spot / strike, time_to_expiry, implied_vol);
    shaped as u64
}

/// Open interest as `volume` times an integer multiplier in `[2, 7)`.
#[must_use]
pub fn open_interest(seed: u64, strike: f64, option_type: OptionType, volume: u64) -> u64 {
    let multiplier = 2 + SeedKey::new("open_interest")
        .with_seed(seed)
        .with_f64(strike)
        .with_tag(tag(option_type))
        .below(5);
    volume.saturating_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_base_iv_range() {
        for k in 0..200 {
            let iv = base_implied_volatility(0, 32.5, 20.0 + f64::from(k) * 0.5);
            assert!((0.25..0.60).contains(&iv), "iv = {iv}");
        }
    }

    #[test]
    fn test_smile_otm_put_skew() {
        // 60-day expiry: no term adjustment.
        let t = 60.0 / 365.0;
        let otm_put = smile_adjusted_volatility(0.30, 1.2, t, OptionType::Put);
        assert_relative_eq!(otm_put, 0.30 * (1.1 + 0.2 * 0.2), epsilon = 1e-12);

        let itm_put = smile_adjusted_volatility(0.30, 0.9, t, OptionType::Put);
        assert_relative_eq!(itm_put, 0.30, epsilon = 1e-12);

        let otm_call = smile_adjusted_volatility(0.30, 0.8, t, OptionType::Call);
        assert_relative_eq!(otm_call, 0.30 * (1.05 + 0.1 * 0.2), epsilon = 1e-12);
        assert!(otm_put > otm_call);
    }

    #[test]
    fn test_smile_term_structure() {
        let short = smile_adjusted_volatility(0.30, 1.0, 30.0 / 365.0, OptionType::Call);
        let long = smile_adjusted_volatility(0.30, 1.0, 200.0 / 365.0, OptionType::Call);
        assert_relative_eq!(short, 0.36, epsilon = 1e-12);
        assert_relative_eq!(long, 0.27, epsilon = 1e-12);
    }

    #[test]
    fn test_smile_clamped() {
        assert_eq!(
            smile_adjusted_volatility(0.59, 3.0, 0.01, OptionType::Put),
            MAX_IMPLIED_VOL
        );
        assert_eq!(
            smile_adjusted_volatility(0.01, 1.0, 1.0, OptionType::Call),
            MIN_IMPLIED_VOL
        );
        assert_eq!(
            smile_adjusted_volatility(f64::NAN, 1.0, 1.0, OptionType::Call),
            MIN_IMPLIED_VOL
        );
    }

    #[test]
    fn test_noise_and_spread_ranges() {
        let expiry = NaiveDate::from_ymd_opt(2026, 11, 18).unwrap();
        for k in 0..100 {
            let strike = 10.0 + f64::from(k) * 0.5;
            for option_type in [OptionType::Call, OptionType::Put] {
                let noise = price_noise(0, "PETR4", strike, expiry, option_type);
                assert!((0.90..1.10).contains(&noise));
                let spread = spread_fraction(0, strike, option_type);
                assert!((0.05..0.10).contains(&spread));
            }
        }
    }

    #[test]
    fn test_liquidity_multiplier() {
        assert_eq!(liquidity_multiplier(1.0, 0.08, 0.30), 6.0);
        assert_eq!(liquidity_multiplier(0.92, 0.3, 0.30), 2.0);
        assert_eq!(liquidity_multiplier(0.80, 0.6, 0.45), 0.75);
        assert_eq!(liquidity_multiplier(1.03, 0.08, 0.45), 9.0);
    }

    #[test]
    fn test_open_interest_multiple_of_volume() {
        for k in 0..100 {
            let strike = 20.0 + f64::from(k);
            let oi = open_interest(7, strike, OptionType::Call, 120);
            assert_eq!(oi % 120, 0);
            assert!((240..840).contains(&oi));
        }
        assert_eq!(open_interest(7, 30.0, OptionType::Put, 0), 0);
    }
}
