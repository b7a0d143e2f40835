//! Synthetic option chain generator.
//!
//! Produces a multi-expiry, multi-strike grid of calls and puts around a spot
//! price, priced through an injected [`OptionPricer`].

use super::contract::{OptionContract, contract_symbol};
use super::models;
use crate::config::ChainConfig;
use crate::pricing::{BlackScholes, MIN_OPTION_PRICE, OptionPricer, OptionType, PricingParams};
use crate::utils::{
    days_to_expiry_str, days_until, round_dp, round_to_increment, time_to_expiry_str, years_until,
};
use chrono::{Days, Local, NaiveDate};
use tracing::{debug, warn};

/// Per-expiry values shared by every contract at that expiry.
struct ExpirySlice<'a> {
    underlying: &'a str,
    spot: f64,
    expiry: NaiveDate,
    time_to_expiry: f64,
    days_to_expiry: u32,
}

/// Generates synthetic option chains.
///
/// Stateless apart from its configuration: the same underlying, spot and
/// generation date always produce the same chain.
///
/// ## Example
///
/// ```rust
/// use option_chain_analytics::chain::ChainGenerator;
/// use option_chain_analytics::config::ChainConfig;
///
/// let generator = ChainGenerator::new(ChainConfig::default());
/// let chain = generator.generate("PETR4", 32.50);
/// assert_eq!(chain.len(), 90);
/// ```
#[derive(Debug, Clone)]
pub struct ChainGenerator<P = BlackScholes> {
    config: ChainConfig,
    pricer: P,
}

impl Default for ChainGenerator<BlackScholes> {
    fn default() -> Self {
        Self::new(ChainConfig::default())
    }
}

impl ChainGenerator<BlackScholes> {
    /// Creates a generator that prices with [`BlackScholes`].
    #[must_use]
    pub fn new(config: ChainConfig) -> Self {
        Self::with_pricer(config, BlackScholes)
    }
}

impl<P: OptionPricer> ChainGenerator<P> {
    /// Creates a generator with an explicit pricer.
    #[must_use]
    pub fn with_pricer(config: ChainConfig, pricer: P) -> Self {
        Self { config, pricer }
    }

    /// Returns the generator configuration.
    #[must_use]
    pub const fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Expiry dates generated on `today`, one per configured offset.
    #[must_use]
    pub fn expiries(&self, today: NaiveDate) -> Vec<NaiveDate> {
        self.config
            .expiry_offsets_days
            .iter()
            .filter_map(|&offset| today.checked_add_days(Days::new(u64::from(offset))))
            .collect()
    }

    /// Strike ladder around `spot`: `2n + 1` evenly spaced strikes spanning
    /// `spot * (1 ± range)`, rounded to the configured increment, ascending.
    /// Non-positive strikes are dropped and duplicates produced by rounding
    /// are collapsed.
    #[must_use]
    pub fn strikes(&self, spot: f64) -> Vec<f64> {
        if !(spot.is_finite() && spot > 0.0) {
            return Vec::new();
        }

        let per_side = i64::from(self.config.strikes_per_side);
        let step = spot * self.config.strike_range_pct / per_side as f64;

        let mut strikes: Vec<f64> = (-per_side..=per_side)
            .map(|i| spot + i as f64 * step)
            .map(|raw| round_to_increment(raw, self.config.strike_increment))
            .map(|strike| round_dp(strike, 2))
            .filter(|&strike| strike.is_finite() && strike > 0.0)
            .collect();
        strikes.dedup();
        strikes
    }

    /// Days from `today` to a `YYYY-MM-DD` expiry, or the configured
    /// fallback when the string cannot be parsed.
    #[must_use]
    pub fn days_to_expiry(&self, expiry: &str, today: NaiveDate) -> u32 {
        days_to_expiry_str(expiry, today, self.config.fallback_days_to_expiry)
    }

    /// Years from `today` to a `YYYY-MM-DD` expiry, with the same fallback
    /// as [`Self::days_to_expiry`].
    #[must_use]
    pub fn time_to_expiry(&self, expiry: &str, today: NaiveDate) -> f64 {
        time_to_expiry_str(expiry, today, self.config.fallback_days_to_expiry)
    }

    /// Generates the chain for `underlying` as of the local current date.
    #[must_use]
    pub fn generate(&self, underlying: &str, spot: f64) -> Vec<OptionContract> {
        self.generate_on(underlying, spot, Local::now().date_naive())
    }

    /// Generates the chain for `underlying` as of `today`.
    ///
    /// Returns calls and puts for every (expiry, strike) pair, in expiry then
    /// strike order with the call first. An invalid spot yields an empty
    /// chain.
    #[must_use]
    pub fn generate_on(&self, underlying: &str, spot: f64, today: NaiveDate) -> Vec<OptionContract> {
        let strikes = self.strikes(spot);
        if strikes.is_empty() {
            warn!(underlying, spot, "no valid strikes, chain is empty");
            return Vec::new();
        }

        let expiries = self.expiries(today);
        let mut contracts = Vec::with_capacity(expiries.len() * strikes.len() * 2);

        for expiry in expiries {
            let slice = ExpirySlice {
                underlying,
                spot,
                expiry,
                time_to_expiry: years_until(expiry, today),
                days_to_expiry: days_until(expiry, today),
            };

            for &strike in &strikes {
                contracts.push(self.build_contract(&slice, strike, OptionType::Call));
                contracts.push(self.build_contract(&slice, strike, OptionType::Put));
            }

            debug!(
                underlying,
                %expiry,
                days = slice.days_to_expiry,
                strikes = strikes.len(),
                "generated expiry"
            );
        }

        contracts
    }

    fn build_contract(
        &self,
        slice: &ExpirySlice<'_>,
        strike: f64,
        option_type: OptionType,
    ) -> OptionContract {
        let seed = self.config.seed;
        let spot = slice.spot;
        let t = slice.time_to_expiry;

        let implied_vol = models::implied_volatility(seed, spot, strike, t, option_type);
        let params = PricingParams::new(
            spot,
            strike,
            t,
            self.config.risk_free_rate,
            implied_vol,
            option_type,
        );

        let noise = models::price_noise(seed, slice.underlying, strike, slice.expiry, option_type);
        let price = (self.pricer.price(&params) * noise).max(MIN_OPTION_PRICE);

        let spread = models::spread_fraction(seed, strike, option_type);
        let bid = price * (1.0 - spread / 2.0);
        let ask = price * (1.0 + spread / 2.0);

        let volume = models::volume(seed, spot, strike, t, option_type, implied_vol);
        let open_interest = models::open_interest(seed, strike, option_type, volume);

        let intrinsic = option_type.intrinsic(spot, strike);

        OptionContract {
            symbol: contract_symbol(slice.underlying, option_type, strike, slice.expiry),
            underlying: slice.underlying.to_string(),
            option_type,
            strike,
            expiry_date: slice.expiry,
            price: round_dp(price, 2),
            bid: round_dp(bid, 2),
            ask: round_dp(ask, 2),
            mid_price: round_dp((bid + ask) / 2.0, 2),
            bid_ask_spread: round_dp((ask - bid) / price, 4),
            volume,
            open_interest,
            implied_volatility: round_dp(implied_vol, 4),
            greeks: self.pricer.greeks(&params),
            intrinsic_value: round_dp(intrinsic, 2),
            time_value: round_dp(price - intrinsic, 2),
            moneyness: round_dp(spot / strike, 4),
            days_to_expiry: slice.days_to_expiry,
        }
    }
}

/// Generates a chain with the default configuration and Black-Scholes pricing.
#[must_use]
pub fn generate_chain(underlying: &str, spot_price: f64) -> Vec<OptionContract> {
    ChainGenerator::new(ChainConfig::default()).generate(underlying, spot_price)
}
