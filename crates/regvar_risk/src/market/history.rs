//! Spot FX rate history.

use regvar_core::types::Date;

use super::returns::ReturnSeries;
use crate::error::RiskError;

/// Spot rates (domestic units per unit of foreign currency) for a set of
/// currencies, one row per business day with row 0 the most recent.
///
/// # Invariants
/// - At least one currency and two rows
/// - Every row holds one rate per currency
/// - Every rate is finite and positive
/// - Dates, when present, strictly decrease down the rows
///
/// # Examples
/// ```
/// use regvar_risk::market::FxRateHistory;
///
/// let history = FxRateHistory::new(
///     vec!["EUR".to_string()],
///     vec![vec![1.10], vec![1.00]],
/// )
/// .unwrap();
///
/// let returns = history.returns(1).unwrap();
/// assert!((returns.column(0)[0] - 0.10).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxRateHistory {
    currencies: Vec<String>,
    dates: Option<Vec<Date>>,
    rows: Vec<Vec<f64>>,
}

impl FxRateHistory {
    /// Creates a history from currency codes and rate rows, newest first.
    ///
    /// # Errors
    /// `RiskError::InvalidHistory` when any invariant is violated.
    pub fn new(currencies: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, RiskError> {
        if currencies.is_empty() {
            return Err(RiskError::InvalidHistory("no currency columns".to_string()));
        }
        if rows.len() < 2 {
            return Err(RiskError::InvalidHistory(format!(
                "need at least 2 rows to form a return, got {}",
                rows.len()
            )));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != currencies.len() {
                return Err(RiskError::InvalidHistory(format!(
                    "row {} has {} rates, expected {}",
                    i,
                    row.len(),
                    currencies.len()
                )));
            }
            for (rate, code) in row.iter().zip(&currencies) {
                if !rate.is_finite() || *rate <= 0.0 {
                    return Err(RiskError::InvalidHistory(format!(
                        "rate {} for {} in row {} is not a positive number",
                        rate, code, i
                    )));
                }
            }
        }
        Ok(Self {
            currencies,
            dates: None,
            rows,
        })
    }

    /// Attaches observation dates, one per row.
    ///
    /// # Errors
    /// `RiskError::InvalidHistory` if the count differs from the row count or
    /// the dates are not strictly decreasing.
    pub fn with_dates(mut self, dates: Vec<Date>) -> Result<Self, RiskError> {
        if dates.len() != self.rows.len() {
            return Err(RiskError::InvalidHistory(format!(
                "{} dates for {} rows",
                dates.len(),
                self.rows.len()
            )));
        }
        if let Some(pair) = dates.windows(2).find(|pair| pair[0] <= pair[1]) {
            return Err(RiskError::InvalidHistory(format!(
                "dates must be newest first: {} is followed by {}",
                pair[0], pair[1]
            )));
        }
        self.dates = Some(dates);
        Ok(self)
    }

    /// Currency codes in column order.
    pub fn currencies(&self) -> &[String] {
        &self.currencies
    }

    /// Observation dates, if attached.
    pub fn dates(&self) -> Option<&[Date]> {
        self.dates.as_deref()
    }

    /// Rate rows, newest first.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: a valid history has at least two rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Most recent rate per currency.
    pub fn latest(&self) -> &[f64] {
        &self.rows[0]
    }

    /// Rates of one currency, newest first.
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.currencies.len()).then(|| self.rows.iter().map(|row| row[index]).collect())
    }

    /// Relative returns over `horizon_days`, one fewer than the row count.
    ///
    /// Return `i` compares row `i` with the older row `i + 1`:
    /// `exp(ln(rate[i] / rate[i + 1]) · √horizon) - 1`.
    ///
    /// # Errors
    /// `RiskError::InvalidConfig` if `horizon_days` is zero.
    pub fn returns(&self, horizon_days: u32) -> Result<ReturnSeries, RiskError> {
        if horizon_days == 0 {
            return Err(RiskError::InvalidConfig(
                "horizon must be at least one day".to_string(),
            ));
        }
        let columns = (0..self.currencies.len())
            .map(|k| {
                self.rows
                    .windows(2)
                    .map(|pair| {
                        super::horizon_scaled_return(pair[0][k] / pair[1][k], horizon_days)
                    })
                    .collect()
            })
            .collect();
        ReturnSeries::new(self.currencies.clone(), columns)
    }
}
