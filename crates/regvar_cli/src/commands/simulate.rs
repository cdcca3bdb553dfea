//! Simulate command implementation
//!
//! Writes a synthetic FX history in the CSV layout read by `var` and prints
//! the sampled positions.

use std::path::Path;

use regvar_core::types::Date;
use regvar_risk::rng::SimulationRng;
use regvar_risk::simulation::{simulate, FxSimulationConfig};
use serde::Serialize;
use tracing::info;

use super::{emit, OutputFormat};
use crate::config::RegvarConfig;
use crate::error::Result;
use crate::io::{business_days_back, write_history};

/// Summary of a simulated history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulateOutput {
    /// File written
    pub output: String,
    /// Rate rows written
    pub rows: usize,
    /// Seed used
    pub seed: u64,
    /// Most recent date
    pub end_date: Date,
    /// Currency codes
    pub currencies: Vec<String>,
    /// Sampled positions in currency order
    pub positions: Vec<f64>,
}

/// Simulates `days` returns ending on `end_date` and writes them to `output`.
pub fn execute(
    output: &Path,
    days: usize,
    end_date: Date,
    config: &RegvarConfig,
) -> Result<SimulateOutput> {
    let simulation = FxSimulationConfig {
        days,
        ..FxSimulationConfig::default()
    };
    let mut rng = SimulationRng::from_seed(config.seed);
    let market = simulate(&simulation, &mut rng)?;

    let dates = business_days_back(end_date, market.history.len());
    write_history(output, &market.history, &dates)?;
    info!(
        output = %output.display(),
        rows = market.history.len(),
        seed = config.seed,
        "wrote simulated FX history"
    );

    Ok(SimulateOutput {
        output: output.display().to_string(),
        rows: market.history.len(),
        seed: config.seed,
        end_date: dates[0],
        currencies: market.history.currencies().to_vec(),
        positions: market.portfolio.positions().to_vec(),
    })
}

fn render_text(output: &SimulateOutput) -> String {
    let mut lines = vec![format!(
        "wrote {} rows ending {} to {} (seed {})",
        output.rows, output.end_date, output.output, output.seed
    )];
    for (code, position) in output.currencies.iter().zip(&output.positions) {
        lines.push(format!("{:<6} position {:.2}", code, position));
    }
    lines.push(format!(
        "positions: {}",
        output
            .positions
            .iter()
            .map(|p| format!("{:.2}", p))
            .collect::<Vec<_>>()
            .join(",")
    ));
    lines.join("\n")
}

/// Run the simulate command
pub fn run(
    output: &Path,
    days: usize,
    end_date: Date,
    config: &RegvarConfig,
    format: OutputFormat,
) -> Result<()> {
    let summary = execute(output, days, end_date, config)?;
    emit(&summary, format, render_text)
}
