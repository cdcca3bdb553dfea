//! Calendar dates and day count conventions.
//!
//! # Examples
//!
//! ```
//! use regvar_core::types::time::{Date, DayCountConvention};
//!
//! let trade = Date::from_ymd(2023, 1, 1).unwrap();
//! let expiry = Date::from_ymd(2024, 1, 1).unwrap();
//!
//! let tau = DayCountConvention::Actual365Fixed.year_fraction(trade, expiry);
//! assert!((tau - 1.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Date wrapper around `chrono::NaiveDate` with ISO 8601 text form.
///
/// # Examples
///
/// ```
/// use regvar_core::types::time::Date;
///
/// let date: Date = "2023-06-15".parse().unwrap();
/// assert_eq!(date.year(), 2023);
///
/// let later = Date::from_ymd(2023, 6, 25).unwrap();
/// assert_eq!(later - date, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from year, month and day.
    ///
    /// # Errors
    /// `DateError::InvalidDate` when the components do not form a calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Returns the date shifted by a signed number of days.
    ///
    /// Saturates at the chrono calendar limits.
    pub fn add_days(self, days: i64) -> Self {
        let shifted = if days >= 0 {
            self.0.checked_add_days(chrono::Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(chrono::Days::new(days.unsigned_abs()))
        };
        Date(shifted.unwrap_or(self.0))
    }

    /// Returns the underlying `NaiveDate`.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns true on Saturdays and Sundays.
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Signed number of days from `other` to `self`.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day count conventions for converting a date interval to a year fraction.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    #[default]
    Actual365Fixed,

    /// Actual/360: actual_days / 360.0
    Actual360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// ```
    /// use regvar_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::Actual365Fixed.name(), "ACT/365");
    /// assert_eq!(DayCountConvention::Actual360.name(), "ACT/360");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Actual365Fixed => "ACT/365",
            DayCountConvention::Actual360 => "ACT/360",
        }
    }

    fn denominator(&self) -> f64 {
        match self {
            DayCountConvention::Actual365Fixed => 365.0,
            DayCountConvention::Actual360 => 360.0,
        }
    }

    /// Year fraction between two dates.
    ///
    /// Negative when `end` precedes `start`; callers that require a positive
    /// interval validate the dates themselves.
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        (end - start) as f64 / self.denominator()
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses a convention name (case-insensitive, separators ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' ', '_'], "").as_str() {
            "ACT365" | "ACTUAL365" | "ACT365FIXED" | "A365" => {
                Ok(DayCountConvention::Actual365Fixed)
            }
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::Actual360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_date_from_ymd_invalid() {
        assert_eq!(
            Date::from_ymd(2023, 2, 29),
            Err(DateError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(Date::from_ymd(2024, 2, 29).is_ok());
    }

    #[test]
    fn test_date_parse_and_display() {
        let date = Date::parse(" 2023-01-01 ").unwrap();
        assert_eq!(date.to_string(), "2023-01-01");
        assert!(matches!(Date::parse("01/01/2023"), Err(DateError::ParseError(_))));
    }

    #[test]
    fn test_date_subtraction_is_signed() {
        let a = Date::from_ymd(2023, 1, 1).unwrap();
        let b = Date::from_ymd(2023, 3, 1).unwrap();
        assert_eq!(b - a, 59);
        assert_eq!(a - b, -59);
    }

    #[test]
    fn test_is_weekend() {
        // 2024-01-06 is a Saturday.
        let saturday = Date::from_ymd(2024, 1, 6).unwrap();
        assert!(saturday.is_weekend());
        assert!(saturday.add_days(1).is_weekend());
        assert!(!saturday.add_days(2).is_weekend());
        assert!(!saturday.add_days(-1).is_weekend());
    }

    #[test]
    fn test_add_days() {
        let base = Date::from_ymd(2023, 1, 1).unwrap();
        assert_eq!(base.add_days(360), Date::from_ymd(2023, 12, 27).unwrap());
        assert_eq!(base.add_days(-1), Date::from_ymd(2022, 12, 31).unwrap());
        assert_eq!(base.add_days(0), base);
    }

    #[test]
    fn test_act_365_leap_year() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        assert_relative_eq!(
            DayCountConvention::Actual365Fixed.year_fraction(start, end),
            366.0 / 365.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            DayCountConvention::Actual360.year_fraction(start, end),
            366.0 / 360.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_year_fraction_reversed_is_negative() {
        let start = Date::from_ymd(2023, 7, 1).unwrap();
        let end = Date::from_ymd(2023, 1, 1).unwrap();
        assert!(DayCountConvention::Actual365Fixed.year_fraction(start, end) < 0.0);
    }

    #[test]
    fn test_dcc_from_str() {
        assert_eq!(
            "act/365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Actual365Fixed
        );
        assert_eq!(
            "Actual/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Actual360
        );
        assert!("30/360".parse::<DayCountConvention>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_date_serde_transparent() {
        let date = Date::from_ymd(2023, 6, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2023-06-15\"");
    }
}
