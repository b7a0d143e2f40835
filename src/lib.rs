//! # Option Chain Analytics - Synthetic Option Chains and Summaries
//!
//! A Rust library for pricing European options, generating realistic
//! multi-expiry option chains around a spot price and summarizing them per
//! expiration.
//!
//! ## Key Features
//!
//! - **Black-Scholes Pricing**: Prices and Greeks (delta, gamma, theta, vega,
//!   rho) behind the [`pricing::OptionPricer`] trait, with a 0.01 price floor
//!   for degenerate inputs.
//!
//! - **Synthetic Chain Generation**: Strike ladders, an implied volatility
//!   smile, bid/ask spreads, volume and open interest, all drawn from
//!   deterministic seeds so the same inputs always give the same chain.
//!
//! - **Per-Expiry Summaries**: Call/put counts, put/call ratios, IV skew, ATM
//!   strike and the most active contracts of each expiry.
//!
//! - **Thread-Safe Chain Book**: Uses `DashMap` for concurrent access to the
//!   collected chains of many underlyings.
//!
//! - **Result-Based Error Handling**: All fallible operations return
//!   `Result<T, Error>` with descriptive error types.
//!
//! ## Architecture
//!
//! ```text
//! ChainBookManager (manages all underlyings: PETR4, VALE3, etc.)
//!   ├── SpotPriceSource (spot lookup)
//!   ├── ChainGenerator (strikes x expiries x call/put)
//!   │     └── OptionPricer (BlackScholes)
//!   └── UnderlyingChainBook (per underlying)
//!         └── ExpiryChain (per expiry date)
//!               ├── ChainSummary
//!               └── OptionContract
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pricing`] | Black-Scholes price, Greeks and pricing types |
//! | [`chain`] | Chain generation, contract models and summaries |
//! | [`book`] | Collected chains with query and export operations |
//! | [`market`] | Spot price sources |
//! | [`config`] | TOML configuration with defaults |
//! | [`error`] | Error types and `Result` type alias |
//! | [`utils`] | Date and rounding helpers |
//!
//! ## Example Usage
//!
//! ### Pricing a Single Option
//!
//! ```rust
//! use option_chain_analytics::pricing::{OptionType, black_scholes_price, calculate_greeks};
//!
//! let price = black_scholes_price(100.0, 100.0, 0.25, 0.05, 0.20, OptionType::Call);
//! assert!((price - 4.615).abs() < 0.01);
//!
//! let greeks = calculate_greeks(100.0, 100.0, 0.25, 0.05, 0.20, OptionType::Call);
//! assert!(greeks.delta > 0.5 && greeks.delta < 0.6);
//! ```
//!
//! ### Collecting Chains
//!
//! ```rust
//! use option_chain_analytics::book::ChainBookManager;
//! use option_chain_analytics::config::Config;
//!
//! let manager = ChainBookManager::from_config(&Config::default());
//! let contracts = manager.collect_all(&["PETR4", "VALE3"]);
//! assert_eq!(contracts, 180);
//!
//! for summary in manager.chain_summaries(Some("PETR4")) {
//!     println!("{summary}");
//! }
//! ```
//!
//! ## Benchmarks
//!
//! - **pricing_bench**: Black-Scholes price and Greeks
//! - **chain_bench**: Chain generation and summarization
//! - **book_bench**: Chain book collection and queries
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench
//! cargo bench -- pricing_benches
//! ```
//!
//! ## Dependencies
//!
//! - **statrs** (0.17): Error function for the normal CDF
//! - **rand** / **rand_chacha**: Seeded deterministic draws
//! - **chrono** (0.4): Expiration dates
//! - **dashmap** (6): Concurrent map for the chain book
//! - **thiserror** (2.0): Error handling
//! - **serde** / **serde_json** / **toml**: Serialization and configuration
//! - **tracing** (0.1): Structured logging

pub mod book;
pub mod chain;
pub mod config;
pub mod error;
pub mod market;
pub mod pricing;
pub mod utils;

pub use error::{Error, Result};
