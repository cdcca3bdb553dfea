//! CLI error types.

use regvar_core::types::{DateError, QuantileError};
use regvar_models::PricerError;
use regvar_risk::RiskError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `regvar` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Malformed command line value or input content.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be built.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// CSV read or write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// VaR estimation failure.
    #[error("Risk error: {0}")]
    Risk(#[from] RiskError),

    /// Option pricing failure.
    #[error("Pricer error: {0}")]
    Pricer(#[from] PricerError),

    /// Quantile conversion failure.
    #[error("Quantile error: {0}")]
    Quantile(#[from] QuantileError),

    /// Unparseable date.
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Validation run found disagreeing trials.
    #[error("Validation failed: {failures} of {trials} trials exceeded tolerance {tolerance}")]
    ValidationFailed {
        /// Number of failing trials
        failures: usize,
        /// Number of trials run
        trials: usize,
        /// Tolerance applied
        tolerance: f64,
    },
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
