//! European option contracts quoted on calendar dates.
//!
//! A contract carries a nominal annual rate `r`; pricing converts it to the
//! continuously compounded `ln(1 + r)` and measures time to expiry with a
//! day count convention (ACT/365 by default).

use std::fmt;
use std::str::FromStr;

use regvar_core::types::{Date, DayCountConvention};

use crate::analytical::{BlackScholes, PricerError};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Returns `"Call"` or `"Put"`.
    pub fn name(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptionType {
    type Err = PricerError;

    /// Parses `Call` or `Put`. Matching is case sensitive.
    ///
    /// ```
    /// use regvar_models::instruments::OptionType;
    ///
    /// assert_eq!("Put".parse::<OptionType>().unwrap(), OptionType::Put);
    /// assert!("put".parse::<OptionType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Call" => Ok(OptionType::Call),
            "Put" => Ok(OptionType::Put),
            other => Err(PricerError::UnknownOptionType(other.to_string())),
        }
    }
}

/// Converts a nominal annual rate to its continuously compounded equivalent.
///
/// # Errors
/// `PricerError::InvalidRate` unless `nominal > -1`.
///
/// ```
/// use regvar_models::instruments::continuous_rate;
///
/// let r = continuous_rate(0.05).unwrap();
/// assert!((r - 1.05_f64.ln()).abs() < 1e-15);
/// assert!(continuous_rate(-1.0).is_err());
/// ```
pub fn continuous_rate(nominal: f64) -> Result<f64, PricerError> {
    if nominal.is_nan() || nominal <= -1.0 {
        return Err(PricerError::InvalidRate { rate: nominal });
    }
    Ok(nominal.ln_1p())
}

/// A European option between a trade date and an expiry date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuropeanOption {
    spot: f64,
    strike: f64,
    nominal_rate: f64,
    trade_date: Date,
    expiry_date: Date,
    volatility: f64,
    option_type: OptionType,
    day_count: DayCountConvention,
}

impl EuropeanOption {
    /// Creates a contract with ACT/365 time measurement.
    ///
    /// Inputs are validated by [`EuropeanOption::price`].
    pub fn new(
        spot: f64,
        strike: f64,
        nominal_rate: f64,
        trade_date: Date,
        expiry_date: Date,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            nominal_rate,
            trade_date,
            expiry_date,
            volatility,
            option_type,
            day_count: DayCountConvention::default(),
        }
    }

    /// Replaces the day count convention.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Spot price of the underlying.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Nominal annual rate.
    pub fn nominal_rate(&self) -> f64 {
        self.nominal_rate
    }

    /// Trade date.
    pub fn trade_date(&self) -> Date {
        self.trade_date
    }

    /// Expiry date.
    pub fn expiry_date(&self) -> Date {
        self.expiry_date
    }

    /// Volatility.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Day count convention used for time to expiry.
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Time from trade to expiry in years.
    pub fn time_to_expiry(&self) -> f64 {
        self.day_count
            .year_fraction(self.trade_date, self.expiry_date)
    }

    /// Black-Scholes price of the contract.
    ///
    /// # Errors
    /// Checked in this order:
    /// - `PricerError::ExpiryNotAfterTrade` if expiry is on or before trade
    /// - `PricerError::InvalidStrike` if the strike is not positive and finite
    /// - `PricerError::InvalidRate` if the nominal rate is at or below -100%
    /// - `PricerError::InvalidSpot` if the spot is not positive and finite
    /// - `PricerError::NegativeVolatility` if the volatility is negative
    ///
    /// # Examples
    /// ```
    /// use regvar_core::types::Date;
    /// use regvar_models::analytical::PricerError;
    /// use regvar_models::instruments::{EuropeanOption, OptionType};
    ///
    /// let trade = Date::from_ymd(2024, 6, 3).unwrap();
    /// let option = EuropeanOption::new(50.0, 55.0, 0.03, trade, trade, 0.25, OptionType::Put);
    /// assert!(matches!(
    ///     option.price(),
    ///     Err(PricerError::ExpiryNotAfterTrade { .. })
    /// ));
    /// ```
    pub fn price(&self) -> Result<f64, PricerError> {
        if self.expiry_date <= self.trade_date {
            return Err(PricerError::ExpiryNotAfterTrade {
                trade: self.trade_date,
                expiry: self.expiry_date,
            });
        }
        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(PricerError::InvalidStrike {
                strike: self.strike,
            });
        }
        let rate = continuous_rate(self.nominal_rate)?;
        let model = BlackScholes::new(self.spot, rate, self.volatility)?;
        Ok(model.price(self.strike, self.time_to_expiry(), self.option_type))
    }
}
