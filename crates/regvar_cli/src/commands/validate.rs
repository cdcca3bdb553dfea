//! Validate command implementation
//!
//! Runs the converted and order-statistic VaR routes on many simulated
//! markets and fails when any pair disagrees beyond the tolerance.

use regvar_risk::validation::{ValidationReport, ValidationRun};

use super::{emit, OutputFormat};
use crate::config::RegvarConfig;
use crate::error::{CliError, Result};

/// Runs a validation batch with the configured trials, seed and tolerance.
pub fn execute(config: &RegvarConfig) -> Result<ValidationReport> {
    let run = ValidationRun::new(config.trials, config.seed)
        .with_tolerance(config.tolerance)
        .with_var_config(config.var_config());
    Ok(run.run()?)
}

fn render_text(report: &ValidationReport) -> String {
    let mut lines = vec![format!(
        "{} trials, max |converted - order-statistic| = {:e}, tolerance {:e}",
        report.trials, report.max_abs_diff, report.tolerance
    )];
    if let Some(worst) = &report.worst {
        lines.push(format!(
            "worst trial {} (seed {}): converted {:.10}, order-statistic {:.10}",
            worst.trial, worst.seed, worst.converted, worst.order_statistic
        ));
    }
    lines.push(if report.passed() {
        "PASSED".to_string()
    } else {
        format!("FAILED: {} trials out of tolerance", report.failures.len())
    });
    lines.join("\n")
}

/// Run the validate command
///
/// Prints the report, then returns `CliError::ValidationFailed` if any
/// trial disagreed.
pub fn run(config: &RegvarConfig, format: OutputFormat) -> Result<()> {
    let report = execute(config)?;
    emit(&report, format, render_text)?;
    if !report.passed() {
        return Err(CliError::ValidationFailed {
            failures: report.failures.len(),
            trials: report.trials,
            tolerance: report.tolerance,
        });
    }
    Ok(())
}
