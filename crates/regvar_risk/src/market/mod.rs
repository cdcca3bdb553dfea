//! FX rate histories and the returns derived from them.
//!
//! - [`FxRateHistory`]: spot rates per currency, newest row first
//! - [`ReturnSeries`]: horizon-scaled relative returns per currency

mod history;
mod returns;

pub use history::FxRateHistory;
pub use returns::{horizon_scaled_return, ReturnSeries};
