//! Error types for option pricing.

use regvar_core::types::Date;
use thiserror::Error;

/// Option pricing errors.
///
/// # Variants
/// - `ExpiryNotAfterTrade`: the expiry date is on or before the trade date
/// - `NegativeVolatility`: σ below zero
/// - `InvalidSpot`: non-positive or non-finite spot price
/// - `InvalidStrike`: non-positive or non-finite strike price
/// - `InvalidRate`: nominal rate at or below -100%
/// - `UnknownOptionType`: option type other than `Call` or `Put`
///
/// # Examples
/// ```
/// use regvar_models::analytical::PricerError;
///
/// let err = PricerError::NegativeVolatility { volatility: -0.2 };
/// assert!(err.to_string().contains("non-negative"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricerError {
    /// Expiry date not strictly after the trade date.
    #[error("Expiry must be later than trade: trade {trade}, expiry {expiry}")]
    ExpiryNotAfterTrade {
        /// Trade date
        trade: Date,
        /// Expiry date
        expiry: Date,
    },

    /// Negative volatility.
    #[error("Volatility must be non-negative: σ = {volatility}")]
    NegativeVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// Invalid spot price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The rejected spot price
        spot: f64,
    },

    /// Invalid strike price.
    #[error("Invalid strike price: K = {strike}")]
    InvalidStrike {
        /// The rejected strike price
        strike: f64,
    },

    /// Nominal rate that has no continuously compounded equivalent.
    #[error("Nominal rate must exceed -100%: r = {rate}")]
    InvalidRate {
        /// The rejected nominal rate
        rate: f64,
    },

    /// Unrecognised option type string.
    #[error("Option type must be 'Call' or 'Put' (case sensitive), got '{0}'")]
    UnknownOptionType(String),
}
