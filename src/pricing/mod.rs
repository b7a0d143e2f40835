//! Option pricing engine.
//!
//! Closed-form Black-Scholes-Merton prices and Greeks for European calls and
//! puts. The engine is a pure leaf: it holds no state and performs no I/O.
//!
//! ## Components
//!
//! - [`black_scholes_price`]: theoretical price, floored at [`MIN_OPTION_PRICE`]
//! - [`calculate_greeks`]: delta, gamma, theta, vega and rho
//! - [`OptionPricer`]: trait the chain generator prices through
//! - [`BlackScholes`]: the stateless [`OptionPricer`] implementation
//!
//! ## Example
//!
//! ```rust
//! use option_chain_analytics::pricing::{calculate_greeks, OptionType};
//!
//! let greeks = calculate_greeks(100.0, 100.0, 0.25, 0.1075, 0.30, OptionType::Put);
//! assert!(greeks.delta < 0.0 && greeks.delta >= -1.0);
//! ```

mod black_scholes;
mod types;

pub use black_scholes::{
    BlackScholes, GREEKS_DECIMALS, MIN_OPTION_PRICE, OptionPricer, black_scholes_price,
    calculate_greeks, norm_cdf, norm_pdf,
};
pub use types::{Greeks, OptionType, PricingParams};
