//! Synthetic option chains.
//!
//! ## Pipeline
//!
//! ```text
//! ChainGenerator (spot, config)
//!   ├── strike ladder (spot ± range, rounded)
//!   ├── expiries (today + offsets)
//!   └── per (expiry, strike, call/put)
//!         ├── models: IV smile, noise, spread, volume, open interest
//!         └── OptionPricer: price and Greeks
//!               └── OptionContract
//! summarize_chain (contracts, spot)
//!   └── ChainSummary (per underlying + expiry)
//! ```
//!
//! ## Components
//!
//! - [`ChainGenerator`]: builds a chain through an injected pricer
//! - [`generate_chain`]: default-configured generation entry point
//! - [`OptionContract`]: one generated contract
//! - [`summarize_chain`] / [`ChainSummary`]: per-expiry statistics
//! - [`analyze_chain`] / [`ChainAnalysis`]: underlying-level totals
//! - [`SeedKey`]: deterministic hash-seeded draws
//!
//! ## Example
//!
//! ```rust
//! use option_chain_analytics::chain::{generate_chain, summarize_chain};
//!
//! let chain = generate_chain("PETR4", 32.50);
//! let summaries = summarize_chain(&chain, 32.50);
//! assert_eq!(summaries.len(), 3);
//! assert!(summaries.iter().all(|s| s.atm_strike == 32.5));
//! ```

mod contract;
mod generator;
pub mod models;
mod seed;
mod summary;

pub use contract::{OptionContract, contract_symbol};
pub use generator::{ChainGenerator, generate_chain};
pub use seed::SeedKey;
pub use summary::{ChainAnalysis, ChainSummary, TopContract, analyze_chain, summarize_chain};
