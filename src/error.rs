//! Error types for the option chain analytics library.
//!
//! The numeric core (pricing, generation, summarization) never fails: it maps
//! degenerate inputs to documented floor values. Errors only surface from the
//! chain book, configuration loading and expiry parsing.

use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No chain has been collected for the requested underlying.
    #[error("underlying not found: {0}")]
    UnderlyingNotFound(String),

    /// The requested expiration is not part of the chain.
    #[error("expiration not found: {0}")]
    ExpirationNotFound(String),

    /// No contract with the requested symbol exists.
    #[error("contract not found: {0}")]
    ContractNotFound(String),

    /// The operation needs data that is not available.
    #[error("no data available: {0}")]
    NoDataAvailable(String),

    /// The spot price lookup returned a non-positive or non-finite value.
    #[error("invalid spot price for {underlying}: {price}")]
    InvalidSpotPrice {
        /// The underlying symbol that was looked up.
        underlying: String,
        /// The rejected price.
        price: f64,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An expiry string could not be parsed as `YYYY-MM-DD`.
    #[error("invalid expiry date: {0}")]
    InvalidExpiry(String),

    /// I/O failure while reading configuration.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`crate::config::Config`].
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// JSON export failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates an [`Error::UnderlyingNotFound`].
    pub fn underlying_not_found(underlying: impl Into<String>) -> Self {
        Self::UnderlyingNotFound(underlying.into())
    }

    /// Creates an [`Error::ExpirationNotFound`].
    pub fn expiration_not_found(expiration: impl Into<String>) -> Self {
        Self::ExpirationNotFound(expiration.into())
    }

    /// Creates an [`Error::ContractNotFound`].
    pub fn contract_not_found(symbol: impl Into<String>) -> Self {
        Self::ContractNotFound(symbol.into())
    }

    /// Creates an [`Error::NoDataAvailable`].
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::NoDataAvailable(message.into())
    }

    /// Creates an [`Error::InvalidSpotPrice`].
    pub fn invalid_spot(underlying: impl Into<String>, price: f64) -> Self {
        Self::InvalidSpotPrice {
            underlying: underlying.into(),
            price,
        }
    }

    /// Creates an [`Error::InvalidConfig`].
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Returns true if the error reports a missing lookup target.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnderlyingNotFound(_) | Self::ExpirationNotFound(_) | Self::ContractNotFound(_)
        )
    }
}
