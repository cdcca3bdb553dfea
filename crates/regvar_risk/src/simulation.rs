//! Synthetic FX histories and portfolios.
//!
//! The most recent rate of each currency is drawn from `N(mean, std)`; older
//! rates follow by walking backwards with daily multiplicative noise
//! `N(1, daily_vol)`. Positions are uniform on `[low, high)`.

use tracing::debug;

use crate::error::RiskError;
use crate::market::FxRateHistory;
use crate::portfolio::FxPortfolio;
use crate::rng::SimulationRng;

/// Upper bound on re-draws for a single positive variate.
const MAX_REDRAWS: usize = 10_000;

/// Distribution of one currency's most recent spot rate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencySpec {
    /// Currency code used as the column name.
    pub code: String,
    /// Mean of the most recent rate.
    pub last_rate_mean: f64,
    /// Standard deviation of the most recent rate.
    pub last_rate_std: f64,
}

impl CurrencySpec {
    /// Creates a currency specification.
    pub fn new(code: impl Into<String>, last_rate_mean: f64, last_rate_std: f64) -> Self {
        Self {
            code: code.into(),
            last_rate_mean,
            last_rate_std,
        }
    }
}

/// Simulation settings.
///
/// The default is a one-year window of 259 daily returns (260 rates) for two
/// currencies quoted around 1 and 120.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxSimulationConfig {
    /// Currencies in column order.
    pub currencies: Vec<CurrencySpec>,
    /// Number of returns; the history has one more row.
    pub days: usize,
    /// Standard deviation of the daily multiplicative noise.
    pub daily_vol: f64,
    /// Lower bound of a position.
    pub position_low: f64,
    /// Upper bound (exclusive) of a position.
    pub position_high: f64,
}

impl Default for FxSimulationConfig {
    fn default() -> Self {
        Self {
            currencies: vec![
                CurrencySpec::new("CCY1", 1.0, 0.08),
                CurrencySpec::new("CCY2", 120.0, 30.0),
            ],
            days: 259,
            daily_vol: 0.01,
            position_low: 10_000.0,
            position_high: 100_000.0,
        }
    }
}

impl FxSimulationConfig {
    /// Checks value ranges.
    ///
    /// # Errors
    /// `RiskError::InvalidConfig` describing the first offending field.
    pub fn validate(&self) -> Result<(), RiskError> {
        if self.currencies.is_empty() {
            return Err(RiskError::InvalidConfig(
                "simulation needs at least one currency".to_string(),
            ));
        }
        if self.days == 0 {
            return Err(RiskError::InvalidConfig(
                "simulation needs at least one day".to_string(),
            ));
        }
        for spec in &self.currencies {
            if !spec.last_rate_mean.is_finite() || spec.last_rate_mean <= 0.0 {
                return Err(RiskError::InvalidConfig(format!(
                    "{}: mean rate must be positive, got {}",
                    spec.code, spec.last_rate_mean
                )));
            }
            if !spec.last_rate_std.is_finite() || spec.last_rate_std < 0.0 {
                return Err(RiskError::InvalidConfig(format!(
                    "{}: rate deviation must be non-negative, got {}",
                    spec.code, spec.last_rate_std
                )));
            }
        }
        if !self.daily_vol.is_finite() || self.daily_vol < 0.0 {
            return Err(RiskError::InvalidConfig(format!(
                "daily volatility must be non-negative, got {}",
                self.daily_vol
            )));
        }
        if !(self.position_low.is_finite()
            && self.position_high.is_finite()
            && self.position_low < self.position_high)
        {
            return Err(RiskError::InvalidConfig(format!(
                "position range [{}, {}) is empty",
                self.position_low, self.position_high
            )));
        }
        Ok(())
    }
}

/// A simulated history together with the portfolio held over it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulatedMarket {
    /// Rates, newest first.
    pub history: FxRateHistory,
    /// One position per currency.
    pub portfolio: FxPortfolio,
    /// Seed of the generator that produced this market.
    pub seed: u64,
}

/// Positive draw from `N(mean, std)`, re-drawing non-positive values.
fn draw_positive(rng: &mut SimulationRng, mean: f64, std: f64) -> Result<f64, RiskError> {
    (0..MAX_REDRAWS)
        .map(|_| rng.gen_normal(mean, std))
        .find(|x| *x > 0.0)
        .ok_or_else(|| {
            RiskError::InvalidConfig(format!(
                "N({}, {}) produced no positive draw in {} attempts",
                mean, std, MAX_REDRAWS
            ))
        })
}

/// Simulates one market.
///
/// Draw order: positions, then the most recent rates, then one noise factor
/// per currency for each older day.
///
/// # Examples
/// ```
/// use regvar_risk::rng::SimulationRng;
/// use regvar_risk::simulation::{simulate, FxSimulationConfig};
///
/// let config = FxSimulationConfig::default();
/// let market = simulate(&config, &mut SimulationRng::from_seed(42)).unwrap();
///
/// assert_eq!(market.history.len(), 260);
/// assert_eq!(market.portfolio.positions().len(), 2);
/// ```
pub fn simulate(
    config: &FxSimulationConfig,
    rng: &mut SimulationRng,
) -> Result<SimulatedMarket, RiskError> {
    config.validate()?;

    let positions: Vec<f64> = config
        .currencies
        .iter()
        .map(|_| rng.gen_uniform_range(config.position_low, config.position_high))
        .collect();

    let latest = config
        .currencies
        .iter()
        .map(|spec| draw_positive(rng, spec.last_rate_mean, spec.last_rate_std))
        .collect::<Result<Vec<f64>, RiskError>>()?;

    let mut rows = Vec::with_capacity(config.days + 1);
    rows.push(latest);
    for _ in 0..config.days {
        let newer = &rows[rows.len() - 1];
        let older = newer
            .iter()
            .map(|rate| Ok(rate * draw_positive(rng, 1.0, config.daily_vol)?))
            .collect::<Result<Vec<f64>, RiskError>>()?;
        rows.push(older);
    }

    let codes = config.currencies.iter().map(|c| c.code.clone()).collect();
    let history = FxRateHistory::new(codes, rows)?;
    let portfolio = FxPortfolio::new(positions)?;

    debug!(
        seed = rng.seed(),
        rows = history.len(),
        currencies = history.currencies().len(),
        "simulated FX market"
    );

    Ok(SimulatedMarket {
        history,
        portfolio,
        seed: rng.seed(),
    })
}
