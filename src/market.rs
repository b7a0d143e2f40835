//! Spot price lookup.
//!
//! The analytics core never fetches quotes itself. Callers hand the chain
//! book a [`SpotPriceSource`]; [`StaticSpotPrices`] serves the configured
//! reference prices and a documented default for anything else.

use crate::config::SpotConfig;
use std::collections::BTreeMap;

/// Something that can quote the current price of an underlying.
pub trait SpotPriceSource: Send + Sync {
    /// Current spot price for `underlying`.
    fn spot_price(&self, underlying: &str) -> f64;
}

/// Spot prices from a fixed table with a default for unknown symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticSpotPrices {
    prices: BTreeMap<String, f64>,
    default_price: f64,
}

impl Default for StaticSpotPrices {
    fn default() -> Self {
        Self::from_config(&SpotConfig::default())
    }
}

impl StaticSpotPrices {
    /// Creates a source from configuration.
    #[must_use]
    pub fn from_config(config: &SpotConfig) -> Self {
        Self {
            prices: config.prices.clone(),
            default_price: config.default_price,
        }
    }

    /// Sets or replaces the price of one underlying.
    #[must_use]
    pub fn with_price(mut self, underlying: impl Into<String>, price: f64) -> Self {
        self.prices.insert(underlying.into(), price);
        self
    }

    /// Returns the price used for unknown underlyings.
    #[must_use]
    pub const fn default_price(&self) -> f64 {
        self.default_price
    }

    /// Returns true if `underlying` has an explicit price.
    #[must_use]
    pub fn contains(&self, underlying: &str) -> bool {
        self.prices.contains_key(underlying)
    }
}

impl SpotPriceSource for StaticSpotPrices {
    fn spot_price(&self, underlying: &str) -> f64 {
        self.prices
            .get(underlying)
            .copied()
            .unwrap_or(self.default_price)
    }
}
