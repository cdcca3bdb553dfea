//! Analytical pricing formulas.
//!
//! - [`distributions`]: standard normal CDF
//! - [`BlackScholes`]: European call and put prices
//! - [`PricerError`]: input validation failures

mod black_scholes;
pub mod distributions;
mod error;

pub use black_scholes::BlackScholes;
pub use distributions::norm_cdf;
pub use error::PricerError;
