//! Historical Value-at-Risk at a regulatory quantile.
//!
//! Two routes compute the same figure:
//! - [`VarMethod::Converted`]: translate the regulatory quantile with
//!   [`QuantileConverter`] and run the linear-interpolation estimator
//! - [`VarMethod::OrderStatistic`]: interpolate the order statistics at
//!   fractional rank `(n + 1) · q` directly
//!
//! With [`ConversionLength::Observed`] the two agree to rounding error on
//! any sample.

use std::fmt;
use std::str::FromStr;

use regvar_core::quantile::{QuantileConverter, MIN_SAMPLE_SIZE};
use regvar_core::sample::SortedSample;
use regvar_core::types::QuantileError;
use tracing::debug;

use crate::error::RiskError;
use crate::market::FxRateHistory;
use crate::portfolio::FxPortfolio;

/// Route used to compute VaR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VarMethod {
    /// Converted quantile fed to the linear-interpolation estimator.
    Converted,
    /// Direct order-statistic interpolation.
    OrderStatistic,
}

impl VarMethod {
    /// Returns the kebab-case method name.
    pub fn name(&self) -> &'static str {
        match self {
            VarMethod::Converted => "converted",
            VarMethod::OrderStatistic => "order-statistic",
        }
    }
}

impl fmt::Display for VarMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VarMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "converted" | "conversion" => Ok(VarMethod::Converted),
            "order-statistic" | "orderstatistic" | "reference" => Ok(VarMethod::OrderStatistic),
            _ => Err(format!("Unknown VaR method: {}", s)),
        }
    }
}

/// Sample length handed to the quantile conversion.
///
/// A year of 260 daily rates yields 259 returns; whether the conversion
/// should use 259 or the nominal 260 has no authoritative answer, so the
/// choice is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConversionLength {
    /// Use the length of the P&L sample.
    #[default]
    Observed,
    /// Use a fixed nominal length.
    Fixed(usize),
}

impl ConversionLength {
    /// Length used for a sample of `observed` values.
    #[inline]
    pub fn resolve(&self, observed: usize) -> usize {
        match self {
            ConversionLength::Observed => observed,
            ConversionLength::Fixed(n) => *n,
        }
    }
}

/// Estimator settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarConfig {
    /// Regulatory quantile (default 0.01).
    pub quantile: f64,
    /// Holding period in days (default 1).
    pub horizon_days: u32,
    /// Sample length for the conversion (default observed).
    pub conversion_length: ConversionLength,
    /// Minimum accepted sample length (default 10).
    pub min_sample_size: usize,
}

impl Default for VarConfig {
    fn default() -> Self {
        Self {
            quantile: 0.01,
            horizon_days: 1,
            conversion_length: ConversionLength::Observed,
            min_sample_size: MIN_SAMPLE_SIZE,
        }
    }
}

impl VarConfig {
    /// Checks value ranges.
    ///
    /// # Errors
    /// `RiskError::InvalidConfig` if the quantile is outside `(0, 1)`, the
    /// horizon is zero or a fixed conversion length is below 2.
    pub fn validate(&self) -> Result<(), RiskError> {
        if !(self.quantile > 0.0 && self.quantile < 1.0) {
            return Err(RiskError::InvalidConfig(format!(
                "quantile must lie in (0, 1), got {}",
                self.quantile
            )));
        }
        if self.horizon_days == 0 {
            return Err(RiskError::InvalidConfig(
                "horizon must be at least one day".to_string(),
            ));
        }
        if let ConversionLength::Fixed(n) = self.conversion_length {
            if n < 2 {
                return Err(RiskError::InvalidConfig(format!(
                    "conversion length must be at least 2, got {}",
                    n
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of one VaR computation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarResult {
    /// P&L quantile; a loss shows as a negative number.
    pub value: f64,
    /// Route that produced `value`.
    pub method: VarMethod,
    /// Regulatory quantile.
    pub quantile: f64,
    /// Number of P&L observations.
    pub sample_len: usize,
    /// Sample length the quantile was placed on; the observed length for
    /// the order-statistic route.
    pub conversion_length: usize,
    /// Estimator argument, present for the converted route.
    pub converted_quantile: Option<f64>,
}

/// Both routes on the same sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarComparison {
    /// Converted route.
    pub converted: VarResult,
    /// Order-statistic route.
    pub order_statistic: VarResult,
}

impl VarComparison {
    /// Absolute difference between the two figures.
    pub fn abs_diff(&self) -> f64 {
        (self.converted.value - self.order_statistic.value).abs()
    }
}

/// Historical VaR estimator.
///
/// # Examples
/// ```
/// use regvar_risk::var::{HistoricalVar, VarConfig, VarMethod};
///
/// let pnl: Vec<f64> = (0..259).map(|i| ((i * 23) % 259) as f64 - 130.0).collect();
/// let estimator = HistoricalVar::new(VarConfig::default()).unwrap();
///
/// let result = estimator.estimate(&pnl, VarMethod::Converted).unwrap();
/// // 0.4 · (-129) + 0.6 · (-128)
/// assert!((result.value + 128.4).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HistoricalVar {
    config: VarConfig,
    converter: QuantileConverter,
}

impl HistoricalVar {
    /// Creates an estimator.
    ///
    /// # Errors
    /// `RiskError::InvalidConfig` if [`VarConfig::validate`] fails.
    pub fn new(config: VarConfig) -> Result<Self, RiskError> {
        config.validate()?;
        Ok(Self {
            config,
            converter: QuantileConverter::with_min_sample_size(config.min_sample_size),
        })
    }

    /// Estimator settings.
    pub fn config(&self) -> &VarConfig {
        &self.config
    }

    /// VaR of an unsorted P&L vector.
    ///
    /// # Errors
    /// - `RiskError::Sample` if the P&L holds non-finite values
    /// - `RiskError::Quantile` if the sample is too short or the quantile
    ///   cannot be represented
    pub fn estimate(&self, pnl: &[f64], method: VarMethod) -> Result<VarResult, RiskError> {
        let sample = SortedSample::from_slice(pnl)?;
        self.estimate_sorted(&sample, method)
    }

    /// VaR of an already sorted sample.
    pub fn estimate_sorted(
        &self,
        sample: &SortedSample,
        method: VarMethod,
    ) -> Result<VarResult, RiskError> {
        let q = self.config.quantile;
        let n = sample.len();
        let min = self.converter.min_sample_size();
        if n < min {
            return Err(QuantileError::SampleTooShort { len: n, min }.into());
        }

        let (value, conversion_length, converted_quantile) = match method {
            VarMethod::Converted => {
                let length = self.config.conversion_length.resolve(n);
                let p = self.converter.convert(length, q)?;
                (sample.quantile(p)?, length, Some(p))
            }
            VarMethod::OrderStatistic => (sample.regulatory_quantile(q)?, n, None),
        };

        let result = VarResult {
            value,
            method,
            quantile: q,
            sample_len: n,
            conversion_length,
            converted_quantile,
        };
        debug!(
            method = %method,
            quantile = q,
            sample_len = n,
            conversion_length,
            converted_quantile = ?converted_quantile,
            value,
            "VaR estimated"
        );
        Ok(result)
    }

    /// Runs both routes on one P&L vector.
    pub fn compare(&self, pnl: &[f64]) -> Result<VarComparison, RiskError> {
        let sample = SortedSample::from_slice(pnl)?;
        Ok(VarComparison {
            converted: self.estimate_sorted(&sample, VarMethod::Converted)?,
            order_statistic: self.estimate_sorted(&sample, VarMethod::OrderStatistic)?,
        })
    }

    /// P&L of `portfolio` over `history` at the configured horizon.
    ///
    /// # Errors
    /// `RiskError::PositionMismatch` if positions and currencies differ in
    /// count.
    pub fn portfolio_pnl(
        &self,
        history: &FxRateHistory,
        portfolio: &FxPortfolio,
    ) -> Result<Vec<f64>, RiskError> {
        let returns = history.returns(self.config.horizon_days)?;
        portfolio.pnl(&returns)
    }

    /// VaR of `portfolio` over `history`.
    pub fn estimate_portfolio(
        &self,
        history: &FxRateHistory,
        portfolio: &FxPortfolio,
        method: VarMethod,
    ) -> Result<VarResult, RiskError> {
        let pnl = self.portfolio_pnl(history, portfolio)?;
        self.estimate(&pnl, method)
    }
}
