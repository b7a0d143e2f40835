//! Underlying chain book module.
//!
//! This module provides the [`UnderlyingChainBook`] and [`ChainBookManager`]
//! for collecting and querying generated chains across underlyings.

use super::expiration::ExpiryChain;
use crate::chain::{
    ChainAnalysis, ChainGenerator, ChainSummary, OptionContract, analyze_chain, summarize_chain,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::market::{SpotPriceSource, StaticSpotPrices};
use crate::pricing::{BlackScholes, OptionPricer};
use chrono::{Local, NaiveDate};
use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Generated chain for a single underlying asset.
///
/// Contains every expiration of one generation run. A new collection
/// replaces the whole book.
///
/// ## Architecture
///
/// ```text
/// UnderlyingChainBook (per underlying)
///   └── ExpiryChain (per expiry)
///         ├── ChainSummary
///         └── OptionContract (per strike, call and put)
/// ```
#[derive(Debug, Clone)]
pub struct UnderlyingChainBook {
    /// The underlying asset symbol.
    underlying: String,
    /// Spot price used for generation and summaries.
    spot_price: f64,
    /// Date the chain was generated on.
    generated_on: NaiveDate,
    /// Expiry chains indexed by expiration date.
    expiries: BTreeMap<NaiveDate, ExpiryChain>,
}

impl UnderlyingChainBook {
    /// Creates a book from generated contracts, summarizing each expiry with
    /// `spot_price`.
    ///
    /// # Arguments
    ///
    /// * `underlying` - The underlying asset symbol (e.g., "PETR4")
    /// * `spot_price` - Spot used for generation
    /// * `generated_on` - Generation date
    /// * `contracts` - The generated chain
    #[must_use]
    pub fn new(
        underlying: impl Into<String>,
        spot_price: f64,
        generated_on: NaiveDate,
        contracts: Vec<OptionContract>,
    ) -> Self {
        let underlying = underlying.into();
        let summaries = summarize_chain(&contracts, spot_price);

        let mut by_expiry: BTreeMap<NaiveDate, Vec<OptionContract>> = BTreeMap::new();
        for contract in contracts
            .into_iter()
            .filter(|c| c.underlying == underlying)
        {
            by_expiry.entry(contract.expiry_date).or_default().push(contract);
        }

        let expiries = summaries
            .into_iter()
            .filter(|s| s.underlying == underlying)
            .map(|summary| {
                let contracts = by_expiry.remove(&summary.expiry_date).unwrap_or_default();
                (summary.expiry_date, ExpiryChain::new(contracts, summary))
            })
            .collect();

        Self {
            underlying,
            spot_price,
            generated_on,
            expiries,
        }
    }

    /// Returns the underlying asset symbol.
    #[must_use]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Returns the spot price used for generation.
    #[must_use]
    pub const fn spot_price(&self) -> f64 {
        self.spot_price
    }

    /// Returns the generation date.
    #[must_use]
    pub const fn generated_on(&self) -> NaiveDate {
        self.generated_on
    }

    /// Returns the number of expirations.
    #[must_use]
    pub fn expiration_count(&self) -> usize {
        self.expiries.len()
    }

    /// Returns true if there are no expirations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }

    /// Returns all expiration dates (ascending).
    pub fn expiration_dates(&self) -> Vec<NaiveDate> {
        self.expiries.keys().copied().collect()
    }

    /// Iterates over the expiry chains in ascending expiry order.
    pub fn expirations(&self) -> impl Iterator<Item = &ExpiryChain> {
        self.expiries.values()
    }

    /// Gets an expiry chain.
    ///
    /// # Errors
    ///
    /// Returns `Error::ExpirationNotFound` if the expiration does not exist.
    pub fn get_expiration(&self, expiry: NaiveDate) -> Result<&ExpiryChain> {
        self.expiries
            .get(&expiry)
            .ok_or_else(|| Error::expiration_not_found(expiry.to_string()))
    }

    /// Iterates over every contract, in expiry then generation order.
    pub fn contracts(&self) -> impl Iterator<Item = &OptionContract> {
        self.expiries.values().flat_map(|e| e.contracts().iter())
    }

    /// Returns the total contract count across all expirations.
    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.expiries.values().map(ExpiryChain::len).sum()
    }

    /// Returns up to `limit` contracts ordered by expiry, option type (calls
    /// first) and strike.
    pub fn options(&self, limit: usize) -> Vec<OptionContract> {
        let mut options: Vec<&OptionContract> = self.contracts().collect();
        options.sort_by(|a, b| {
            a.expiry_date
                .cmp(&b.expiry_date)
                .then(a.option_type.cmp(&b.option_type))
                .then(a.strike.total_cmp(&b.strike))
        });
        options.into_iter().take(limit).cloned().collect()
    }

    /// Finds a contract by symbol in any expiration.
    ///
    /// # Errors
    ///
    /// Returns `Error::ContractNotFound` if no contract has this symbol.
    pub fn contract(&self, symbol: &str) -> Result<&OptionContract> {
        self.contracts()
            .find(|c| c.symbol == symbol)
            .ok_or_else(|| Error::contract_not_found(symbol))
    }

    /// Returns the per-expiry summaries in ascending expiry order.
    pub fn summaries(&self) -> Vec<ChainSummary> {
        self.expiries.values().map(|e| e.summary().clone()).collect()
    }

    /// Returns underlying-level totals, `None` for an empty book.
    #[must_use]
    pub fn analysis(&self) -> Option<ChainAnalysis> {
        analyze_chain(&self.underlying, &self.options(usize::MAX))
    }

    /// Returns a serializable snapshot of the book.
    #[must_use]
    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            underlying: self.underlying.clone(),
            spot_price: self.spot_price,
            generated_on: self.generated_on,
            summaries: self.summaries(),
            contracts: self.contracts().cloned().collect(),
        }
    }

    /// Returns statistics about this underlying.
    #[must_use]
    pub fn stats(&self) -> UnderlyingStats {
        UnderlyingStats {
            underlying: self.underlying.clone(),
            spot_price: self.spot_price,
            expiration_count: self.expiration_count(),
            total_contracts: self.contract_count(),
            total_volume: self.contracts().map(|c| c.volume).sum(),
            total_open_interest: self.contracts().map(|c| c.open_interest).sum(),
        }
    }
}

/// Serializable view of one underlying's chain.
#[derive(Debug, Clone, Serialize)]
pub struct ChainSnapshot {
    /// The underlying asset symbol.
    pub underlying: String,
    /// Spot price used for generation.
    pub spot_price: f64,
    /// Generation date.
    pub generated_on: NaiveDate,
    /// Per-expiry summaries.
    pub summaries: Vec<ChainSummary>,
    /// Every contract, in expiry then generation order.
    pub contracts: Vec<OptionContract>,
}

/// Statistics about an underlying chain book.
#[derive(Debug, Clone)]
pub struct UnderlyingStats {
    /// The underlying asset symbol.
    pub underlying: String,
    /// Spot price used for generation.
    pub spot_price: f64,
    /// Number of expirations.
    pub expiration_count: usize,
    /// Total number of contracts.
    pub total_contracts: usize,
    /// Total traded volume.
    pub total_volume: u64,
    /// Total open interest.
    pub total_open_interest: u64,
}

impl std::fmt::Display for UnderlyingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} @ {:.2}: {} expirations, {} contracts, volume {}, OI {}",
            self.underlying,
            self.spot_price,
            self.expiration_count,
            self.total_contracts,
            self.total_volume,
            self.total_open_interest
        )
    }
}

/// Collects and serves generated chains for all underlyings.
///
/// The generator and the spot price source are injected; the manager owns no
/// process-wide state. Uses `DashMap` for thread-safe concurrent access.
///
/// ## Architecture
///
/// ```text
/// ChainBookManager (root)
///   ├── ChainGenerator ── OptionPricer
///   ├── SpotPriceSource
///   └── UnderlyingChainBook (per underlying: PETR4, VALE3, etc.)
///         └── ExpiryChain (per expiry)
/// ```
pub struct ChainBookManager<P = BlackScholes> {
    /// Chain books indexed by underlying symbol.
    books: DashMap<String, Arc<UnderlyingChainBook>>,
    /// Chain generator.
    generator: ChainGenerator<P>,
    /// Spot price lookup used for generation and summaries.
    spot_source: Arc<dyn SpotPriceSource>,
}

impl ChainBookManager<BlackScholes> {
    /// Creates a manager with Black-Scholes pricing and static spot prices
    /// taken from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ChainGenerator::new(config.chain.clone()),
            Arc::new(StaticSpotPrices::from_config(&config.spot)),
        )
    }
}

impl<P: OptionPricer> ChainBookManager<P> {
    /// Creates a new chain book manager.
    ///
    /// # Arguments
    ///
    /// * `generator` - Chain generator used by [`Self::collect`]
    /// * `spot_source` - Spot price lookup
    #[must_use]
    pub fn new(generator: ChainGenerator<P>, spot_source: Arc<dyn SpotPriceSource>) -> Self {
        Self {
            books: DashMap::new(),
            generator,
            spot_source,
        }
    }

    /// Returns the chain generator.
    #[must_use]
    pub const fn generator(&self) -> &ChainGenerator<P> {
        &self.generator
    }

    /// Returns the number of underlyings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Returns true if there are no underlyings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Generates, summarizes and stores the chain for `underlying` as of the
    /// local current date. Returns the number of stored contracts.
    ///
    /// # Errors
    ///
    /// See [`Self::collect_on`].
    pub fn collect(&self, underlying: &str) -> Result<usize> {
        self.collect_on(underlying, Local::now().date_naive())
    }

    /// Generates, summarizes and stores the chain for `underlying` as of
    /// `today`, replacing any previous book for it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSpotPrice` if the spot lookup yields a
    /// non-positive or non-finite price, and `Error::NoDataAvailable` if the
    /// generated chain is empty.
    pub fn collect_on(&self, underlying: &str, today: NaiveDate) -> Result<usize> {
        let spot = self.spot_source.spot_price(underlying);
        if !(spot.is_finite() && spot > 0.0) {
            warn!(underlying, spot, "rejected spot price");
            return Err(Error::invalid_spot(underlying, spot));
        }

        let contracts = self.generator.generate_on(underlying, spot, today);
        if contracts.is_empty() {
            return Err(Error::no_data(format!("empty chain for {underlying}")));
        }

        let book = UnderlyingChainBook::new(underlying, spot, today, contracts);
        let count = book.contract_count();
        info!(
            underlying,
            spot,
            contracts = count,
            expirations = book.expiration_count(),
            "collected option chain"
        );
        self.books.insert(underlying.to_string(), Arc::new(book));
        Ok(count)
    }

    /// Collects every underlying in `underlyings`, skipping failures.
    /// Returns the total number of stored contracts.
    pub fn collect_all<S: AsRef<str>>(&self, underlyings: &[S]) -> usize {
        underlyings
            .iter()
            .map(AsRef::as_ref)
            .filter_map(|underlying| match self.collect(underlying) {
                Ok(count) => Some(count),
                Err(err) => {
                    warn!(underlying, error = %err, "chain collection failed");
                    None
                }
            })
            .sum()
    }

    /// Gets an underlying chain book.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnderlyingNotFound` if the underlying was never collected.
    pub fn get(&self, underlying: &str) -> Result<Arc<UnderlyingChainBook>> {
        self.books
            .get(underlying)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| Error::underlying_not_found(underlying))
    }

    /// Returns true if an underlying exists.
    #[must_use]
    pub fn contains(&self, underlying: &str) -> bool {
        self.books.contains_key(underlying)
    }

    /// Removes an underlying chain book.
    pub fn remove(&self, underlying: &str) -> bool {
        self.books.remove(underlying).is_some()
    }

    /// Returns all underlying symbols (sorted).
    pub fn underlying_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.books.iter().map(|e| e.key().clone()).collect();
        symbols.sort_unstable();
        symbols
    }

    fn sorted_books(&self) -> Vec<Arc<UnderlyingChainBook>> {
        let mut books: Vec<Arc<UnderlyingChainBook>> =
            self.books.iter().map(|e| Arc::clone(e.value())).collect();
        books.sort_by(|a, b| a.underlying().cmp(b.underlying()));
        books
    }

    /// Returns up to `limit` contracts of `underlying` ordered by expiry,
    /// option type and strike.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnderlyingNotFound` if the underlying was never collected.
    pub fn options_by_underlying(&self, underlying: &str, limit: usize) -> Result<Vec<OptionContract>> {
        Ok(self.get(underlying)?.options(limit))
    }

    /// Returns chain summaries ordered by underlying, then expiry descending.
    /// With `Some(underlying)` only that underlying is returned.
    pub fn chain_summaries(&self, underlying: Option<&str>) -> Vec<ChainSummary> {
        self.sorted_books()
            .iter()
            .filter(|book| underlying.is_none_or(|u| book.underlying() == u))
            .flat_map(|book| book.summaries().into_iter().rev())
            .collect()
    }

    /// Returns up to `limit` contracts with positive volume across all
    /// underlyings, highest volume first.
    pub fn top_volume(&self, limit: usize) -> Vec<OptionContract> {
        let books = self.sorted_books();
        let mut traded: Vec<&OptionContract> = books
            .iter()
            .flat_map(|book| book.contracts())
            .filter(|c| c.volume > 0)
            .collect();
        traded.sort_by(|a, b| b.volume.cmp(&a.volume));
        traded.into_iter().take(limit).cloned().collect()
    }

    /// Returns underlying-level totals.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnderlyingNotFound` if the underlying was never
    /// collected, `Error::NoDataAvailable` if its book is empty.
    pub fn analysis(&self, underlying: &str) -> Result<ChainAnalysis> {
        self.get(underlying)?
            .analysis()
            .ok_or_else(|| Error::no_data(format!("no contracts for {underlying}")))
    }

    /// Serializes the chain of `underlying` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnderlyingNotFound` or `Error::Serialization`.
    pub fn export_json(&self, underlying: &str) -> Result<String> {
        let snapshot = self.get(underlying)?.snapshot();
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Returns the total contract count across all underlyings.
    #[must_use]
    pub fn total_contract_count(&self) -> usize {
        self.books.iter().map(|e| e.value().contract_count()).sum()
    }

    /// Returns the total expiration count across all underlyings.
    #[must_use]
    pub fn total_expiration_count(&self) -> usize {
        self.books.iter().map(|e| e.value().expiration_count()).sum()
    }

    /// Returns statistics about the whole book.
    #[must_use]
    pub fn stats(&self) -> BookStats {
        let (total_volume, total_open_interest) = self
            .books
            .iter()
            .map(|e| e.value().stats())
            .fold((0, 0), |(volume, oi), s| {
                (volume + s.total_volume, oi + s.total_open_interest)
            });

        BookStats {
            underlying_count: self.len(),
            total_expirations: self.total_expiration_count(),
            total_contracts: self.total_contract_count(),
            total_volume,
            total_open_interest,
        }
    }
}

/// Global statistics about the chain book.
#[derive(Debug, Clone)]
pub struct BookStats {
    /// Number of underlyings.
    pub underlying_count: usize,
    /// Total number of expirations.
    pub total_expirations: usize,
    /// Total number of contracts.
    pub total_contracts: usize,
    /// Total traded volume.
    pub total_volume: u64,
    /// Total open interest.
    pub total_open_interest: u64,
}

impl std::fmt::Display for BookStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} underlyings, {} expirations, {} contracts, volume {}, OI {}",
            self.underlying_count,
            self.total_expirations,
            self.total_contracts,
            self.total_volume,
            self.total_open_interest
        )
    }
}
