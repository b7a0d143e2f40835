//! Configuration for chain generation and spot price defaults.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Chain generation parameters.
    #[serde(default)]
    pub chain: ChainConfig,
    /// Spot price defaults.
    #[serde(default)]
    pub spot: SpotConfig,
    /// Underlyings collected by [`crate::book::ChainBookManager::collect_all`] callers.
    #[serde(default = "default_underlyings")]
    pub underlyings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain: ChainConfig::default(),
            spot: SpotConfig::default(),
            underlyings: default_underlyings(),
        }
    }
}

impl Config {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, `Error::ConfigParse` if
    /// it is not valid TOML and `Error::InvalidConfig` if a value is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigParse` or `Error::InvalidConfig`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` describing the first offending value.
    pub fn validate(&self) -> Result<()> {
        self.chain.validate()?;
        self.spot.validate()
    }
}

/// Parameters of the synthetic chain generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Annual risk-free rate used for pricing (short-term reference rate).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Calendar-day offsets from today for each generated expiry.
    #[serde(default = "default_expiry_offsets")]
    pub expiry_offsets_days: Vec<u32>,
    /// Half-width of the strike ladder as a fraction of spot.
    #[serde(default = "default_strike_range_pct")]
    pub strike_range_pct: f64,
    /// Strikes generated on each side of spot.
    #[serde(default = "default_strikes_per_side")]
    pub strikes_per_side: u32,
    /// Strikes are rounded to the nearest multiple of this value.
    #[serde(default = "default_strike_increment")]
    pub strike_increment: f64,
    /// Seed mixed into every pseudo-random draw.
    #[serde(default)]
    pub seed: u64,
    /// Day count used when an expiry string cannot be parsed.
    #[serde(default = "default_fallback_days")]
    pub fallback_days_to_expiry: u32,
}

fn default_risk_free_rate() -> f64 {
    0.1075
}

fn default_expiry_offsets() -> Vec<u32> {
    vec![30, 60, 90]
}

fn default_strike_range_pct() -> f64 {
    0.20
}

fn default_strikes_per_side() -> u32 {
    7
}

fn default_strike_increment() -> f64 {
    0.5
}

fn default_fallback_days() -> u32 {
    30
}

fn default_underlyings() -> Vec<String> {
    vec!["PETR4".to_string(), "VALE3".to_string()]
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            expiry_offsets_days: default_expiry_offsets(),
            strike_range_pct: default_strike_range_pct(),
            strikes_per_side: default_strikes_per_side(),
            strike_increment: default_strike_increment(),
            seed: 0,
            fallback_days_to_expiry: default_fallback_days(),
        }
    }
}

impl ChainConfig {
    /// Checks generator parameters.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(Error::invalid_config("risk_free_rate must be finite"));
        }
        if self.expiry_offsets_days.is_empty() {
            return Err(Error::invalid_config("expiry_offsets_days must not be empty"));
        }
        if self.expiry_offsets_days.contains(&0) {
            return Err(Error::invalid_config(
                "expiry_offsets_days must be strictly in the future",
            ));
        }
        if !(self.strike_range_pct.is_finite() && self.strike_range_pct > 0.0) {
            return Err(Error::invalid_config("strike_range_pct must be positive"));
        }
        if self.strikes_per_side == 0 {
            return Err(Error::invalid_config("strikes_per_side must be at least 1"));
        }
        if !(self.strike_increment.is_finite() && self.strike_increment > 0.0) {
            return Err(Error::invalid_config("strike_increment must be positive"));
        }
        Ok(())
    }
}

/// Spot prices used when no live quote is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotConfig {
    /// Price returned for underlyings missing from `prices`.
    #[serde(default = "default_spot_price")]
    pub default_price: f64,
    /// Reference prices by underlying symbol.
    #[serde(default = "default_spot_prices")]
    pub prices: BTreeMap<String, f64>,
}

fn default_spot_price() -> f64 {
    30.0
}

fn default_spot_prices() -> BTreeMap<String, f64> {
    [
        ("PETR4", 32.50),
        ("VALE3", 55.80),
        ("ITUB4", 28.90),
        ("BBDC4", 22.40),
        ("ABEV3", 12.30),
        ("WEGE3", 45.20),
        ("MGLU3", 8.75),
        ("JBSS3", 28.60),
        ("SUZB3", 52.30),
        ("CSNA3", 18.90),
    ]
    .into_iter()
    .map(|(symbol, price)| (symbol.to_string(), price))
    .collect()
}

impl Default for SpotConfig {
    fn default() -> Self {
        Self {
            default_price: default_spot_price(),
            prices: default_spot_prices(),
        }
    }
}

impl SpotConfig {
    /// Checks that every configured price is positive.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the offending entry.
    pub fn validate(&self) -> Result<()> {
        if !(self.default_price.is_finite() && self.default_price > 0.0) {
            return Err(Error::invalid_config("spot.default_price must be positive"));
        }
        if let Some((symbol, _)) = self
            .prices
            .iter()
            .find(|(_, price)| !(price.is_finite() && **price > 0.0))
        {
            return Err(Error::invalid_config(format!(
                "spot.prices.{symbol} must be positive"
            )));
        }
        Ok(())
    }
}
