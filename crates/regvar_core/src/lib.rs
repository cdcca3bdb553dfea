//! # regvar_core: Quantile Conventions and Order Statistics
//!
//! ## Foundation Layer Role
//!
//! regvar_core is the bottom layer of the regvar workspace, providing:
//! - Regulatory-to-interpolation quantile conversion (`quantile`)
//! - Sorted samples with the linear-interpolation quantile estimator (`sample`)
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - Error types: `QuantileError`, `SampleError`, `DateError` (`types::error`)
//!
//! ## Quantile Conventions
//!
//! Regulatory texts assign the i-th smallest of `n` observations the quantile
//! `i/n`. Generic order-statistic estimators assign it `(i-1)/(n-1)` and
//! interpolate linearly in between. [`quantile::convert`] translates the first
//! into the second, so that a regulatory figure such as
//! "1% VaR = 0.4 × 2nd smallest + 0.6 × 3rd smallest of 259 observations"
//! falls out of the generic estimator.
//!
//! ## Usage Examples
//!
//! ```rust
//! use regvar_core::quantile::convert;
//! use regvar_core::sample::SortedSample;
//!
//! let pnl: Vec<f64> = (0..259).map(|i| ((i * 23) % 259) as f64 - 130.0).collect();
//! let sample = SortedSample::new(pnl).unwrap();
//!
//! let p = convert(sample.len(), 0.01).unwrap();
//! let var = sample.quantile(p).unwrap();
//!
//! let expected = 0.4 * sample.order_statistic(2).unwrap()
//!     + 0.6 * sample.order_statistic(3).unwrap();
//! assert!((var - expected).abs() < 1e-8);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for quantiles, dates and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod quantile;
pub mod sample;
pub mod types;

pub use quantile::{convert, Quantile, QuantileConvention, QuantileConverter, MIN_SAMPLE_SIZE};
pub use sample::SortedSample;
pub use types::{Date, DateError, DayCountConvention, QuantileError, SampleError};
