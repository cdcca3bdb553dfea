//! FX portfolio positions and daily P&L.

use crate::error::RiskError;
use crate::market::ReturnSeries;

/// Domestic-currency positions, one per currency column.
///
/// # Examples
/// ```
/// use regvar_risk::market::ReturnSeries;
/// use regvar_risk::portfolio::FxPortfolio;
///
/// let returns = ReturnSeries::new(
///     vec!["USD".to_string(), "JPY".to_string()],
///     vec![vec![0.01, -0.02], vec![0.0, 0.05]],
/// )
/// .unwrap();
/// let portfolio = FxPortfolio::new(vec![1_000.0, 2_000.0]).unwrap();
///
/// assert_eq!(portfolio.pnl(&returns).unwrap(), vec![10.0, 80.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxPortfolio {
    positions: Vec<f64>,
}

impl FxPortfolio {
    /// Creates a portfolio.
    ///
    /// # Errors
    /// `RiskError::InvalidConfig` if there are no positions or a position is
    /// not finite.
    pub fn new(positions: Vec<f64>) -> Result<Self, RiskError> {
        if positions.is_empty() {
            return Err(RiskError::InvalidConfig("portfolio has no positions".to_string()));
        }
        if let Some(bad) = positions.iter().find(|p| !p.is_finite()) {
            return Err(RiskError::InvalidConfig(format!(
                "position {} is not finite",
                bad
            )));
        }
        Ok(Self { positions })
    }

    /// Positions in column order.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Sum of absolute positions.
    pub fn gross_exposure(&self) -> f64 {
        self.positions.iter().map(|p| p.abs()).sum()
    }

    /// Daily P&L: `pnl[i] = Σ_k return_k[i] · position_k`.
    ///
    /// # Errors
    /// `RiskError::PositionMismatch` if the position count differs from the
    /// number of return columns.
    pub fn pnl(&self, returns: &ReturnSeries) -> Result<Vec<f64>, RiskError> {
        if returns.columns().len() != self.positions.len() {
            return Err(RiskError::PositionMismatch {
                positions: self.positions.len(),
                currencies: returns.columns().len(),
            });
        }
        let mut pnl = vec![0.0; returns.len()];
        for (column, position) in returns.columns().iter().zip(&self.positions) {
            for (total, r) in pnl.iter_mut().zip(column) {
                *total += r * position;
            }
        }
        Ok(pnl)
    }
}
