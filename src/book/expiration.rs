//! Expiry chain module.
//!
//! This module provides the [`ExpiryChain`]: every contract of one underlying
//! at a single expiration, together with its [`ChainSummary`].

use crate::chain::{ChainSummary, OptionContract};
use crate::error::{Error, Result};
use chrono::NaiveDate;

/// All contracts for a single expiration date.
///
/// ## Architecture
///
/// ```text
/// ExpiryChain (per expiry date)
///   ├── ChainSummary
///   └── OptionContract (call/put per strike, generation order)
/// ```
#[derive(Debug, Clone)]
pub struct ExpiryChain {
    /// The underlying asset symbol.
    underlying: String,
    /// The expiration date.
    expiry: NaiveDate,
    /// Contracts in generation order.
    contracts: Vec<OptionContract>,
    /// Statistics derived from `contracts`.
    summary: ChainSummary,
}

impl ExpiryChain {
    /// Creates an expiry chain from its contracts and their summary.
    ///
    /// # Arguments
    ///
    /// * `contracts` - Contracts sharing the summary's underlying and expiry
    /// * `summary` - The summary computed from `contracts`
    #[must_use]
    pub fn new(contracts: Vec<OptionContract>, summary: ChainSummary) -> Self {
        Self {
            underlying: summary.underlying.clone(),
            expiry: summary.expiry_date,
            contracts,
            summary,
        }
    }

    /// Returns the underlying asset symbol.
    #[must_use]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Returns the expiration date.
    #[must_use]
    pub const fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    /// Returns the chain summary.
    #[must_use]
    pub const fn summary(&self) -> &ChainSummary {
        &self.summary
    }

    /// Returns the contracts in generation order.
    #[must_use]
    pub fn contracts(&self) -> &[OptionContract] {
        &self.contracts
    }

    /// Iterates over the calls.
    pub fn calls(&self) -> impl Iterator<Item = &OptionContract> {
        self.contracts.iter().filter(|c| c.is_call())
    }

    /// Iterates over the puts.
    pub fn puts(&self) -> impl Iterator<Item = &OptionContract> {
        self.contracts.iter().filter(|c| c.is_put())
    }

    /// Returns the number of contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns true if there are no contracts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Returns the days to expiry at generation time.
    #[must_use]
    pub const fn days_to_expiry(&self) -> u32 {
        self.summary.days_to_expiry
    }

    /// Returns all strike prices (sorted, unique).
    pub fn strike_prices(&self) -> Vec<f64> {
        let mut strikes: Vec<f64> = self.contracts.iter().map(|c| c.strike).collect();
        strikes.sort_by(f64::total_cmp);
        strikes.dedup();
        strikes
    }

    /// Returns the strike closest to spot at generation time.
    #[must_use]
    pub const fn atm_strike(&self) -> f64 {
        self.summary.atm_strike
    }

    /// Finds a contract by symbol.
    ///
    /// # Errors
    ///
    /// Returns `Error::ContractNotFound` if no contract has this symbol.
    pub fn contract(&self, symbol: &str) -> Result<&OptionContract> {
        self.contracts
            .iter()
            .find(|c| c.symbol == symbol)
            .ok_or_else(|| Error::contract_not_found(symbol))
    }
}
