//! Price command implementation
//!
//! Prices a European call or put between a trade date and an expiry date.

use regvar_core::types::{Date, DayCountConvention};
use regvar_models::instruments::{EuropeanOption, OptionType};
use serde::Serialize;
use tracing::debug;

use super::{emit, OutputFormat};
use crate::error::{CliError, Result};

/// Raw price command inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceArgs {
    /// Spot price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Nominal annual rate
    pub rate: f64,
    /// Trade date, `YYYY-MM-DD`
    pub trade_date: String,
    /// Expiry date, `YYYY-MM-DD`
    pub expiry_date: String,
    /// Volatility
    pub volatility: f64,
    /// `Call` or `Put`
    pub option_type: String,
    /// Day count convention name
    pub day_count: String,
}

/// Priced contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceOutput {
    /// Contract as priced
    pub option: EuropeanOption,
    /// Year fraction from trade to expiry
    pub time_to_expiry: f64,
    /// Option price
    pub price: f64,
}

/// Parses the inputs and prices the contract.
pub fn execute(args: &PriceArgs) -> Result<PriceOutput> {
    let trade_date = Date::parse(&args.trade_date)?;
    let expiry_date = Date::parse(&args.expiry_date)?;
    let option_type: OptionType = args.option_type.parse()?;
    let day_count: DayCountConvention = args
        .day_count
        .parse()
        .map_err(CliError::InvalidArgument)?;

    let option = EuropeanOption::new(
        args.spot,
        args.strike,
        args.rate,
        trade_date,
        expiry_date,
        args.volatility,
        option_type,
    )
    .with_day_count(day_count);
    let price = option.price()?;
    debug!(?option, price, "priced option");

    Ok(PriceOutput {
        time_to_expiry: option.time_to_expiry(),
        option,
        price,
    })
}

/// Run the price command
pub fn run(args: &PriceArgs, format: OutputFormat) -> Result<()> {
    let output = execute(args)?;
    emit(&output, format, |o| format!("{:.10}", o.price))
}
