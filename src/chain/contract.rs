//! Generated option contract record.

use crate::pricing::{Greeks, OptionType};
use crate::utils::format_expiry_yyyymmdd;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Builds a contract symbol: underlying, `C`/`P`, strike in cents, expiry as
/// `YYYYMMDD`.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use option_chain_analytics::chain::contract_symbol;
/// use option_chain_analytics::pricing::OptionType;
///
/// let expiry = NaiveDate::from_ymd_opt(2026, 11, 18).unwrap();
/// assert_eq!(
///     contract_symbol("PETR4", OptionType::Call, 32.5, expiry),
///     "PETR4C325020261118"
/// );
/// ```
#[must_use]
pub fn contract_symbol(
    underlying: &str,
    option_type: OptionType,
    strike: f64,
    expiry: NaiveDate,
) -> String {
    let strike_cents = (strike * 100.0).round() as u64;
    format!(
        "{}{}{}{}",
        underlying,
        option_type.code(),
        strike_cents,
        format_expiry_yyyymmdd(expiry)
    )
}

/// One synthetic option contract.
///
/// Created fresh by every chain generation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Contract symbol, see [`contract_symbol`].
    pub symbol: String,
    /// Underlying instrument.
    pub underlying: String,
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: f64,
    /// Expiration date.
    pub expiry_date: NaiveDate,
    /// Theoretical price with market noise applied.
    pub price: f64,
    /// Bid price.
    pub bid: f64,
    /// Ask price.
    pub ask: f64,
    /// Midpoint of bid and ask.
    pub mid_price: f64,
    /// `(ask - bid) / price`.
    pub bid_ask_spread: f64,
    /// Traded volume.
    pub volume: u64,
    /// Open interest, always a multiple of volume.
    pub open_interest: u64,
    /// Synthetic implied volatility in `[0.10, 1.00]`.
    pub implied_volatility: f64,
    /// Sensitivities at generation time.
    #[serde(flatten)]
    pub greeks: Greeks,
    /// Payoff if exercised now.
    pub intrinsic_value: f64,
    /// `price - intrinsic_value`. Can be slightly negative because noise is
    /// applied after pricing.
    pub time_value: f64,
    /// `spot / strike`.
    pub moneyness: f64,
    /// Calendar days to expiry, at least 1.
    pub days_to_expiry: u32,
}

impl OptionContract {
    /// Returns true for calls.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        self.option_type.is_call()
    }

    /// Returns true for puts.
    #[must_use]
    pub const fn is_put(&self) -> bool {
        !self.option_type.is_call()
    }
}
