//! Error types for structured error handling.
//!
//! This module provides:
//! - `QuantileError`: Domain violations of the quantile conversion
//! - `SampleError`: Errors from sample construction and order-statistic lookups
//! - `DateError`: Errors from date construction and parsing

use thiserror::Error;

/// Quantile conversion domain violations.
///
/// A closed set of three precondition failures. The `Display` text of each
/// variant is fixed so that callers can match on the message as well as on
/// the variant; the numeric context lives in the fields.
///
/// # Variants
/// - `SampleTooShort`: Sample length below the configured policy minimum
/// - `QuantileTooSmall`: Quantile below the smallest representable value
/// - `QuantileTooLarge`: Quantile above the largest representable value
///
/// # Examples
/// ```
/// use regvar_core::types::QuantileError;
///
/// let err = QuantileError::SampleTooShort { len: 9, min: 10 };
/// assert_eq!(format!("{}", err), "sample too short");
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuantileError {
    /// Sample length below the minimum sample size policy.
    #[error("sample too short")]
    SampleTooShort {
        /// Length of the sample that was supplied
        len: usize,
        /// Minimum accepted length
        min: usize,
    },

    /// Quantile below the smallest representable value.
    #[error("quantile too small to represent")]
    QuantileTooSmall {
        /// The rejected quantile
        quantile: f64,
        /// Smallest representable quantile for this sample length
        min: f64,
    },

    /// Quantile above the largest representable value.
    #[error("quantile too large to represent")]
    QuantileTooLarge {
        /// The rejected quantile
        quantile: f64,
        /// Largest representable quantile for this sample length
        max: f64,
    },
}

/// Sample errors.
///
/// # Examples
/// ```
/// use regvar_core::types::SampleError;
///
/// let err = SampleError::NonFinite { index: 3 };
/// assert_eq!(format!("{}", err), "Non-finite value at index 3");
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleError {
    /// The sample holds no observations.
    #[error("Sample is empty")]
    Empty,

    /// An observation is NaN or infinite.
    #[error("Non-finite value at index {index}")]
    NonFinite {
        /// Position of the offending value in the input
        index: usize,
    },

    /// Estimator argument outside [0, 1].
    #[error("Probability {p} outside [0, 1]")]
    ProbabilityOutOfRange {
        /// The rejected argument
        p: f64,
    },

    /// Order-statistic rank outside 1..=len.
    #[error("Rank {rank} outside 1..={len}")]
    RankOutOfRange {
        /// Requested 1-based rank
        rank: usize,
        /// Sample length
        len: usize,
    },
}

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use regvar_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_error_messages_are_fixed() {
        let short = QuantileError::SampleTooShort { len: 3, min: 10 };
        assert_eq!(short.to_string(), "sample too short");

        let small = QuantileError::QuantileTooSmall {
            quantile: 0.001,
            min: 1.0 / 260.0,
        };
        assert_eq!(small.to_string(), "quantile too small to represent");

        let large = QuantileError::QuantileTooLarge {
            quantile: 0.999,
            max: 259.0 / 260.0,
        };
        assert_eq!(large.to_string(), "quantile too large to represent");
    }

    #[test]
    fn test_quantile_error_message_ignores_fields() {
        let a = QuantileError::SampleTooShort { len: 0, min: 10 };
        let b = QuantileError::SampleTooShort { len: 9, min: 50 };
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn test_sample_error_display() {
        assert_eq!(SampleError::Empty.to_string(), "Sample is empty");
        assert_eq!(
            SampleError::ProbabilityOutOfRange { p: 1.5 }.to_string(),
            "Probability 1.5 outside [0, 1]"
        );
        assert_eq!(
            SampleError::RankOutOfRange { rank: 0, len: 5 }.to_string(),
            "Rank 0 outside 1..=5"
        );
    }

    #[test]
    fn test_date_error_display() {
        let err = DateError::ParseError("bad".to_string());
        assert_eq!(format!("{}", err), "Date parse error: bad");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = QuantileError::SampleTooShort { len: 1, min: 10 };
        let _: &dyn std::error::Error = &err;
        let _: &dyn std::error::Error = &SampleError::Empty;
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_quantile_error_serde() {
        let err = QuantileError::QuantileTooLarge {
            quantile: 0.999,
            max: 0.99,
        };
        let json = serde_json::to_string(&err).unwrap();
        let back: QuantileError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
