//! Benchmarks for option-chain-analytics library.
//!
//! This module provides benchmarks for the pricing, generation and chain
//! book components:
//!
//! - **pricing_bench**: Black-Scholes price and Greeks
//! - **chain_bench**: Chain generation and summarization
//! - **book_bench**: Chain book collection and queries


use criterion::{criterion_group, criterion_main};

// Black-Scholes benchmarks
criterion_group!(
    pricing_benches,
    pricing_bench::pricing_operations,
    pricing_bench::pricing_scaling,
);

// Chain generation benchmarks
criterion_group!(
    chain_benches,
    chain_bench::chain_generation,
    chain_bench::chain_summary,
    chain_bench::chain_scaling,
);

// Chain book benchmarks
criterion_group!(
    book_benches,
    book_bench::book_manager_operations,
    book_bench::book_manager_scaling,
);

criterion_main!(pricing_benches, chain_benches, book_benches);
