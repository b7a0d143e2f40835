//! Chain book module.
//!
//! This module stores generated chains and answers the queries built on
//! them: per-underlying option listings, expiry summaries, top volume and
//! JSON export.
//!
//! ## Architecture
//!
//! ```text
//! ChainBookManager (manages all underlyings: PETR4, VALE3, etc.)
//!   └── UnderlyingChainBook (per underlying, one generation run)
//!         └── ExpiryChain (per expiry date)
//!               ├── ChainSummary
//!               └── OptionContract (call/put per strike)
//! ```
//!
//! ## Components
//!
//! - [`ChainBookManager`]: Collects chains through a generator and a spot source
//! - [`UnderlyingChainBook`]: All expirations for a single underlying
//! - [`ExpiryChain`]: All contracts for a single expiration
//! - [`ChainSnapshot`]: Serializable export of one underlying
//! - [`BookStats`] / [`UnderlyingStats`]: Aggregated counters

mod expiration;
mod underlying;

pub use expiration::ExpiryChain;
pub use underlying::{
    BookStats, ChainBookManager, ChainSnapshot, UnderlyingChainBook, UnderlyingStats,
};
