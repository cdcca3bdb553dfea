//! Convert command implementation
//!
//! Translates a regulatory quantile into the argument of the
//! linear-interpolation estimator.

use regvar_core::quantile::{representable_range, QuantileConverter};
use serde::Serialize;
use tracing::debug;

use super::{emit, OutputFormat};
use crate::config::RegvarConfig;
use crate::error::Result;

/// Conversion result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvertOutput {
    /// Sample length
    pub n: usize,
    /// Regulatory quantile
    pub quantile: f64,
    /// Estimator argument
    pub converted: f64,
    /// Smallest representable regulatory quantile
    pub min_quantile: f64,
    /// Largest representable regulatory quantile
    pub max_quantile: f64,
}

/// Converts `quantile` for a sample of length `n`.
pub fn execute(n: usize, quantile: f64, config: &RegvarConfig) -> Result<ConvertOutput> {
    let converter = QuantileConverter::with_min_sample_size(config.min_sample_size);
    let converted = converter.convert(n, quantile)?;
    let (min_quantile, max_quantile) = representable_range(n);
    debug!(n, quantile, converted, "converted quantile");
    Ok(ConvertOutput {
        n,
        quantile,
        converted,
        min_quantile,
        max_quantile,
    })
}

/// Run the convert command
pub fn run(n: usize, quantile: f64, config: &RegvarConfig, format: OutputFormat) -> Result<()> {
    let output = execute(n, quantile, config)?;
    emit(&output, format, |o| o.converted.to_string())
}
