//! Error types for VaR estimation.

use regvar_core::types::{QuantileError, SampleError};
use thiserror::Error;

/// Errors raised while building P&L samples or estimating VaR.
///
/// # Variants
/// - `Quantile`: the regulatory quantile cannot be converted or represented
/// - `Sample`: the P&L sample is empty or holds non-finite values
/// - `InvalidHistory`: malformed FX rate history
/// - `PositionMismatch`: positions and currency columns differ in count
/// - `InvalidConfig`: out-of-range estimator or simulation settings
///
/// # Examples
/// ```
/// use regvar_core::types::QuantileError;
/// use regvar_risk::RiskError;
///
/// let err: RiskError = QuantileError::SampleTooShort { len: 5, min: 10 }.into();
/// assert_eq!(err.to_string(), "sample too short");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RiskError {
    /// Quantile conversion failure.
    #[error(transparent)]
    Quantile(#[from] QuantileError),

    /// P&L sample failure.
    #[error(transparent)]
    Sample(#[from] SampleError),

    /// Malformed rate history.
    #[error("Invalid FX history: {0}")]
    InvalidHistory(String),

    /// Position count differs from currency count.
    #[error("Position mismatch: {positions} positions for {currencies} currencies")]
    PositionMismatch {
        /// Number of positions supplied
        positions: usize,
        /// Number of currency columns
        currencies: usize,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_error_is_transparent() {
        let err = RiskError::from(QuantileError::QuantileTooLarge {
            quantile: 0.999,
            max: 259.0 / 260.0,
        });
        assert_eq!(err.to_string(), "quantile too large to represent");
    }

    #[test]
    fn test_position_mismatch_display() {
        let err = RiskError::PositionMismatch {
            positions: 3,
            currencies: 2,
        };
        assert_eq!(
            err.to_string(),
            "Position mismatch: 3 positions for 2 currencies"
        );
    }

    #[test]
    fn test_sample_error_conversion() {
        let err: RiskError = SampleError::Empty.into();
        assert!(matches!(err, RiskError::Sample(SampleError::Empty)));
    }
}
