//! VaR command implementation
//!
//! Loads an FX rate history from CSV, applies the positions and reports VaR
//! through one or both routes.

use std::path::Path;

use clap::ValueEnum;
use regvar_risk::var::{HistoricalVar, VarMethod, VarResult};
use regvar_risk::FxPortfolio;
use serde::Serialize;
use tracing::info;

use super::{emit, OutputFormat};
use crate::config::RegvarConfig;
use crate::error::Result;
use crate::io::read_history;

/// Which VaR routes to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MethodSelection {
    /// Converted quantile with the linear-interpolation estimator
    #[default]
    Converted,
    /// Direct order-statistic interpolation
    OrderStatistic,
    /// Both routes and their difference
    Both,
}

impl MethodSelection {
    fn methods(self) -> &'static [VarMethod] {
        match self {
            MethodSelection::Converted => &[VarMethod::Converted],
            MethodSelection::OrderStatistic => &[VarMethod::OrderStatistic],
            MethodSelection::Both => &[VarMethod::Converted, VarMethod::OrderStatistic],
        }
    }
}

/// VaR results for one history and portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarOutput {
    /// Currency codes
    pub currencies: Vec<String>,
    /// Positions in currency order
    pub positions: Vec<f64>,
    /// Number of rate rows read
    pub rows: usize,
    /// Holding period in days
    pub horizon_days: u32,
    /// One result per route
    pub results: Vec<VarResult>,
    /// Absolute difference when both routes ran
    pub abs_diff: Option<f64>,
}

/// Computes VaR for the history in `input`.
pub fn execute(
    input: &Path,
    positions: &[f64],
    selection: MethodSelection,
    config: &RegvarConfig,
) -> Result<VarOutput> {
    let history = read_history(input)?;
    let portfolio = FxPortfolio::new(positions.to_vec())?;
    let estimator = HistoricalVar::new(config.var_config())?;

    info!(
        input = %input.display(),
        rows = history.len(),
        currencies = history.currencies().len(),
        "loaded FX history"
    );

    let pnl = estimator.portfolio_pnl(&history, &portfolio)?;
    let results = selection
        .methods()
        .iter()
        .map(|method| estimator.estimate(&pnl, *method))
        .collect::<std::result::Result<Vec<VarResult>, _>>()?;

    let abs_diff = match results.as_slice() {
        [a, b] => Some((a.value - b.value).abs()),
        _ => None,
    };

    Ok(VarOutput {
        currencies: history.currencies().to_vec(),
        positions: positions.to_vec(),
        rows: history.len(),
        horizon_days: config.horizon_days,
        results,
        abs_diff,
    })
}

fn render_text(output: &VarOutput) -> String {
    let mut lines: Vec<String> = output
        .results
        .iter()
        .map(|r| {
            let converted = r
                .converted_quantile
                .map(|p| format!(", converted quantile {}", p))
                .unwrap_or_default();
            format!(
                "{:<16} VaR({}, {}d) = {:.6}  [n = {}{}]",
                r.method.name(), r.quantile, output.horizon_days, r.value, r.sample_len, converted
            )
        })
        .collect();
    if let Some(diff) = output.abs_diff {
        lines.push(format!("{:<16} {:e}", "abs difference", diff));
    }
    lines.join("\n")
}

/// Run the var command
pub fn run(
    input: &Path,
    positions: &[f64],
    selection: MethodSelection,
    config: &RegvarConfig,
    format: OutputFormat,
) -> Result<()> {
    let output = execute(input, positions, selection, config)?;
    emit(&output, format, render_text)
}
