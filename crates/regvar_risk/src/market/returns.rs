//! Horizon-scaled FX returns.

use crate::error::RiskError;

/// Relative return for a rate quotient scaled to `horizon_days`.
///
/// The log return is scaled by `√horizon_days` (square-root-of-time) and
/// mapped back to a relative return: `exp(ln(quotient) · √h) - 1`.
///
/// ```
/// use regvar_risk::market::horizon_scaled_return;
///
/// assert!((horizon_scaled_return(1.01, 1) - 0.01).abs() < 1e-12);
/// assert!((horizon_scaled_return(1.01, 9) - (1.01_f64.powi(3) - 1.0)).abs() < 1e-12);
/// ```
#[inline]
pub fn horizon_scaled_return(quotient: f64, horizon_days: u32) -> f64 {
    (quotient.ln() * f64::from(horizon_days).sqrt()).exp_m1()
}

/// Per-currency return columns of equal length, newest first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReturnSeries {
    currencies: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl ReturnSeries {
    /// Wraps one return column per currency.
    ///
    /// # Errors
    /// `RiskError::InvalidHistory` if the column count differs from the
    /// currency count or the columns differ in length.
    pub fn new(currencies: Vec<String>, columns: Vec<Vec<f64>>) -> Result<Self, RiskError> {
        if columns.len() != currencies.len() {
            return Err(RiskError::InvalidHistory(format!(
                "{} return columns for {} currencies",
                columns.len(),
                currencies.len()
            )));
        }
        if let Some(first) = columns.first() {
            if columns.iter().any(|c| c.len() != first.len()) {
                return Err(RiskError::InvalidHistory(
                    "return columns differ in length".to_string(),
                ));
            }
        }
        Ok(Self {
            currencies,
            columns,
        })
    }

    /// Currency codes in column order.
    pub fn currencies(&self) -> &[String] {
        &self.currencies
    }

    /// All return columns.
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Returns of the `index`-th currency.
    ///
    /// # Panics
    /// If `index` is not below the currency count.
    pub fn column(&self, index: usize) -> &[f64] {
        &self.columns[index]
    }

    /// Number of return observations per currency.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Returns true if there are no observations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
