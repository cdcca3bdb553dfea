//! Batch agreement check between the two VaR routes.
//!
//! Each trial simulates an independent market from its own seed
//! (`base_seed + trial`), computes VaR through both routes and records the
//! absolute difference. Trials run in parallel on the rayon pool.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::info;

use crate::error::RiskError;
use crate::rng::SimulationRng;
use crate::simulation::{simulate, FxSimulationConfig};
use crate::var::{HistoricalVar, VarConfig};

/// Default number of trials.
pub const DEFAULT_TRIALS: usize = 1_000;

/// Default agreement tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Result of one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialOutcome {
    /// Trial index, starting at 0.
    pub trial: usize,
    /// Seed that reproduces the trial's market.
    pub seed: u64,
    /// VaR through the converted route.
    pub converted: f64,
    /// VaR through the order-statistic route.
    pub order_statistic: f64,
}

impl TrialOutcome {
    /// Absolute difference between the two routes.
    pub fn abs_diff(&self) -> f64 {
        (self.converted - self.order_statistic).abs()
    }
}

/// Summary of a validation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationReport {
    /// Number of trials run.
    pub trials: usize,
    /// Agreement tolerance.
    pub tolerance: f64,
    /// Largest absolute difference seen.
    pub max_abs_diff: f64,
    /// Trial with the largest difference.
    pub worst: Option<TrialOutcome>,
    /// Trials whose difference exceeds the tolerance, in trial order.
    pub failures: Vec<TrialOutcome>,
}

impl ValidationReport {
    /// Returns true if every trial agreed within the tolerance.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A batch of simulated agreement checks.
///
/// # Examples
/// ```
/// use regvar_risk::validation::ValidationRun;
///
/// let report = ValidationRun::new(20, 1).run().unwrap();
/// assert_eq!(report.trials, 20);
/// assert!(report.passed());
/// ```
#[derive(Debug, Clone)]
pub struct ValidationRun {
    /// Estimator settings shared by all trials.
    pub var_config: VarConfig,
    /// Market simulation settings shared by all trials.
    pub simulation: FxSimulationConfig,
    /// Number of trials.
    pub trials: usize,
    /// Seed of trial 0.
    pub base_seed: u64,
    /// Largest accepted absolute difference.
    pub tolerance: f64,
}

impl Default for ValidationRun {
    fn default() -> Self {
        Self::new(DEFAULT_TRIALS, 0)
    }
}

impl ValidationRun {
    /// Creates a run with default estimator, simulation and tolerance.
    pub fn new(trials: usize, base_seed: u64) -> Self {
        Self {
            var_config: VarConfig::default(),
            simulation: FxSimulationConfig::default(),
            trials,
            base_seed,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Replaces the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replaces the estimator settings.
    pub fn with_var_config(mut self, var_config: VarConfig) -> Self {
        self.var_config = var_config;
        self
    }

    /// Replaces the simulation settings.
    pub fn with_simulation(mut self, simulation: FxSimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    /// Runs a single trial.
    pub fn run_trial(
        &self,
        estimator: &HistoricalVar,
        trial: usize,
    ) -> Result<TrialOutcome, RiskError> {
        let seed = self.base_seed.wrapping_add(trial as u64);
        let market = simulate(&self.simulation, &mut SimulationRng::from_seed(seed))?;
        let pnl = estimator.portfolio_pnl(&market.history, &market.portfolio)?;
        let comparison = estimator.compare(&pnl)?;
        Ok(TrialOutcome {
            trial,
            seed,
            converted: comparison.converted.value,
            order_statistic: comparison.order_statistic.value,
        })
    }

    /// Runs all trials in parallel.
    ///
    /// # Errors
    /// - `RiskError::InvalidConfig` for a zero trial count, a negative or NaN
    ///   tolerance, or invalid estimator or simulation settings
    /// - Any error a trial raises; the run stops at the first one
    pub fn run(&self) -> Result<ValidationReport, RiskError> {
        if self.trials == 0 {
            return Err(RiskError::InvalidConfig(
                "validation needs at least one trial".to_string(),
            ));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(RiskError::InvalidConfig(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        self.simulation.validate()?;
        let estimator = HistoricalVar::new(self.var_config)?;

        info!(
            trials = self.trials,
            base_seed = self.base_seed,
            tolerance = self.tolerance,
            "starting VaR validation run"
        );

        let step = (self.trials / 10).max(1);
        let completed = AtomicUsize::new(0);

        let outcomes = (0..self.trials)
            .into_par_iter()
            .map(|trial| {
                let outcome = self.run_trial(&estimator, trial)?;
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % step == 0 || done == self.trials {
                    info!(completed = done, total = self.trials, "validation progress");
                }
                Ok(outcome)
            })
            .collect::<Result<Vec<TrialOutcome>, RiskError>>()?;

        let worst = outcomes
            .iter()
            .copied()
            .max_by(|a, b| a.abs_diff().total_cmp(&b.abs_diff()));
        let failures: Vec<TrialOutcome> = outcomes
            .into_iter()
            .filter(|o| o.abs_diff() > self.tolerance)
            .collect();

        let report = ValidationReport {
            trials: self.trials,
            tolerance: self.tolerance,
            max_abs_diff: worst.map_or(0.0, |w| w.abs_diff()),
            worst,
            failures,
        };
        info!(
            max_abs_diff = report.max_abs_diff,
            failures = report.failures.len(),
            "VaR validation finished"
        );
        Ok(report)
    }
}
