//! Black-Scholes-Merton closed form for European options.
//!
//! Both entry points are total: degenerate or ill-conditioned inputs map to
//! a documented floor instead of an error. The floor is applied at the
//! boundary of [`black_scholes_price`] and [`calculate_greeks`]; the inner
//! helpers return `None` when no meaningful value exists.

use super::types::{Greeks, OptionType, PricingParams};
use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;
use tracing::debug;

/// Lowest theoretical price ever returned.
pub const MIN_OPTION_PRICE: f64 = 0.01;

/// Decimal places kept on Greeks.
pub const GREEKS_DECIMALS: i32 = 4;

/// Standard normal cumulative distribution function.
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    Normal::new(0.0, 1.0).map_or(f64::NAN, |normal| normal.cdf(x))
}

/// Standard normal probability density function.
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Something that can price an option and compute its Greeks.
///
/// The chain generator is written against this trait so callers can inject
/// the pricing model explicitly.
pub trait OptionPricer {
    /// Theoretical price, never below [`MIN_OPTION_PRICE`].
    fn price(&self, params: &PricingParams) -> f64;

    /// Greeks, all zero for degenerate inputs.
    fn greeks(&self, params: &PricingParams) -> Greeks;
}

/// Stateless Black-Scholes pricer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackScholes;

impl BlackScholes {
    /// Creates a new pricer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OptionPricer for BlackScholes {
    fn price(&self, params: &PricingParams) -> f64 {
        try_price(params).map_or_else(
            || {
                debug!(?params, "degenerate pricing inputs, using price floor");
                MIN_OPTION_PRICE
            },
            |price| price.max(MIN_OPTION_PRICE),
        )
    }

    fn greeks(&self, params: &PricingParams) -> Greeks {
        try_greeks(params).map_or_else(Greeks::zero, |g| g.rounded(GREEKS_DECIMALS))
    }
}

/// Black-Scholes price of a European option.
///
/// Returns [`MIN_OPTION_PRICE`] if `spot`, `strike`, `time_to_expiry` or
/// `volatility` is not strictly positive, or if the computation is not
/// finite. Otherwise returns `max(0.01, price)`.
///
/// # Examples
///
/// ```rust
/// use option_chain_analytics::pricing::{black_scholes_price, OptionType};
///
/// let price = black_scholes_price(100.0, 100.0, 0.25, 0.1075, 0.30, OptionType::Call);
/// assert!(price > 5.0 && price < 15.0);
/// ```
#[must_use]
pub fn black_scholes_price(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    option_type: OptionType,
) -> f64 {
    BlackScholes.price(&PricingParams::new(
        spot,
        strike,
        time_to_expiry,
        risk_free_rate,
        volatility,
        option_type,
    ))
}

/// Black-Scholes Greeks rounded to 4 decimal places.
///
/// Returns all-zero Greeks when `time_to_expiry <= 0`, `volatility <= 0`, or
/// the computation cannot be carried out.
#[must_use]
pub fn calculate_greeks(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    option_type: OptionType,
) -> Greeks {
    BlackScholes.greeks(&PricingParams::new(
        spot,
        strike,
        time_to_expiry,
        risk_free_rate,
        volatility,
        option_type,
    ))
}

/// `(d1, d2)` or `None` when the inputs are outside the model's domain.
fn d1_d2(params: &PricingParams) -> Option<(f64, f64)> {
    let PricingParams {
        spot,
        strike,
        time_to_expiry: t,
        risk_free_rate: r,
        volatility: sigma,
        ..
    } = *params;

    if !(spot > 0.0 && strike > 0.0 && t > 0.0 && sigma > 0.0) || !r.is_finite() {
        return None;
    }

    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((spot / strike).ln() + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    (d1.is_finite() && d2.is_finite()).then_some((d1, d2))
}

fn try_price(params: &PricingParams) -> Option<f64> {
    let (d1, d2) = d1_d2(params)?;
    let discounted_strike = params.strike * (-params.risk_free_rate * params.time_to_expiry).exp();

    let price = match params.option_type {
        OptionType::Call => params.spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionType::Put => discounted_strike * norm_cdf(-d2) - params.spot * norm_cdf(-d1),
    };
    price.is_finite().then_some(price)
}

fn try_greeks(params: &PricingParams) -> Option<Greeks> {
    let (d1, d2) = d1_d2(params)?;
    let PricingParams {
        spot,
        strike,
        time_to_expiry: t,
        risk_free_rate: r,
        volatility: sigma,
        option_type,
    } = *params;

    let sqrt_t = t.sqrt();
    let pdf_d1 = norm_pdf(d1);
    let discounted_strike = strike * (-r * t).exp();

    let gamma = pdf_d1 / (spot * sigma * sqrt_t);
    let vega = spot * pdf_d1 * sqrt_t / 100.0;
    let theta_decay = -(spot * pdf_d1 * sigma) / (2.0 * sqrt_t);

    let (delta, theta, rho) = match option_type {
        OptionType::Call => (
            norm_cdf(d1),
            (theta_decay - r * discounted_strike * norm_cdf(d2)) / 365.0,
            t * discounted_strike * norm_cdf(d2) / 100.0,
        ),
        OptionType::Put => (
            norm_cdf(d1) - 1.0,
            (theta_decay + r * discounted_strike * norm_cdf(-d2)) / 365.0,
            -t * discounted_strike * norm_cdf(-d2) / 100.0,
        ),
    };

    let greeks = Greeks::new(delta, gamma, theta, vega, rho);
    greeks.is_finite().then_some(greeks)
}
