//! CSV import and export of FX rate histories.
//!
//! Layout: a header `date,<CCY1>,<CCY2>,...` followed by one row per day,
//! newest first. Dates use `YYYY-MM-DD`.

use std::path::Path;

use regvar_core::types::Date;
use regvar_risk::FxRateHistory;

use crate::error::{CliError, Result};

/// Reads a rate history from `path`.
pub fn read_history(path: &Path) -> Result<FxRateHistory> {
    if !path.is_file() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let headers = reader.headers()?.clone();
    match headers.get(0) {
        Some(first) if first.eq_ignore_ascii_case("date") => {}
        _ => {
            return Err(CliError::InvalidArgument(format!(
                "{}: first column must be 'date'",
                path.display()
            )))
        }
    }
    let currencies: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut dates = Vec::new();
    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = index + 2;
        let date = record
            .get(0)
            .ok_or_else(|| CliError::InvalidArgument(format!("line {}: missing date", line)))?;
        dates.push(Date::parse(date)?);

        let rates = record
            .iter()
            .skip(1)
            .map(|field| {
                field.parse::<f64>().map_err(|_| {
                    CliError::InvalidArgument(format!("line {}: '{}' is not a number", line, field))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(rates);
    }

    let history = FxRateHistory::new(currencies, rows)?.with_dates(dates)?;
    Ok(history)
}

/// Writes `history` to `path`, labelling rows with `dates`.
pub fn write_history(path: &Path, history: &FxRateHistory, dates: &[Date]) -> Result<()> {
    if dates.len() != history.len() {
        return Err(CliError::InvalidArgument(format!(
            "{} dates for {} rows",
            dates.len(),
            history.len()
        )));
    }
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["date".to_string()];
    header.extend(history.currencies().iter().cloned());
    writer.write_record(&header)?;

    for (date, row) in dates.iter().zip(history.rows()) {
        let mut record = vec![date.to_string()];
        record.extend(row.iter().map(|rate| rate.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// `count` weekdays ending at `end` (moved back to a weekday if needed),
/// newest first.
pub fn business_days_back(end: Date, count: usize) -> Vec<Date> {
    let mut dates = Vec::with_capacity(count);
    let mut current = end;
    while dates.len() < count {
        if !current.is_weekend() {
            dates.push(current);
        }
        current = current.add_days(-1);
    }
    dates
}
