//! Integration tests for option-chain-analytics.

mod book_tests;
mod chain_tests;
mod pricing_tests;
