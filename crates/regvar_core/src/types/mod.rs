//! Error and time types.
//!
//! This module provides:
//! - `error`: Structured error types for quantile conversion, samples and dates
//! - `time`: `Date` and `DayCountConvention`

pub mod error;
pub mod time;

pub use error::{DateError, QuantileError, SampleError};
pub use time::{Date, DayCountConvention};
