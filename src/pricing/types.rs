//! Value types shared by the pricing engine and the chain generator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Intrinsic value at the given spot: `max(0, S - K)` for calls,
    /// `max(0, K - S)` for puts.
    #[must_use]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }

    /// Single-letter code used in contract symbols.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }

    /// Returns true for calls.
    #[must_use]
    pub const fn is_call(self) -> bool {
        matches!(self, Self::Call)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => f.pad("CALL"),
            Self::Put => f.pad("PUT"),
        }
    }
}

/// Inputs to a Black-Scholes evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingParams {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to expiry in years.
    pub time_to_expiry: f64,
    /// Continuously compounded risk-free rate.
    pub risk_free_rate: f64,
    /// Annualized volatility.
    pub volatility: f64,
    /// Call or put.
    pub option_type: OptionType,
}

impl PricingParams {
    /// Creates a new parameter set.
    #[must_use]
    pub const fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            option_type,
        }
    }

    /// Same parameters for the opposite option type.
    #[must_use]
    pub const fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }
}

/// Option sensitivities.
///
/// Theta is per calendar day, vega per 1% volatility move and rho per 1%
/// rate move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Sensitivity to spot.
    pub delta: f64,
    /// Sensitivity of delta to spot.
    pub gamma: f64,
    /// Daily time decay.
    pub theta: f64,
    /// Sensitivity to a 1% volatility move.
    pub vega: f64,
    /// Sensitivity to a 1% rate move.
    pub rho: f64,
}

impl Greeks {
    /// Creates a new set of Greeks.
    #[must_use]
    pub const fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// All-zero Greeks, returned for degenerate inputs.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Returns true if every sensitivity is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Returns true if every sensitivity is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.delta, self.gamma, self.theta, self.vega, self.rho]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Rounds all sensitivities to `dp` decimal places.
    #[must_use]
    pub fn rounded(&self, dp: i32) -> Self {
        use crate::utils::round_dp;
        Self::new(
            round_dp(self.delta, dp),
            round_dp(self.gamma, dp),
            round_dp(self.theta, dp),
            round_dp(self.vega, dp),
            round_dp(self.rho, dp),
        )
    }
}
