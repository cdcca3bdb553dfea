//! # Regvar Risk
//!
//! Historical FX Value-at-Risk at regulatory quantiles.
//!
//! This crate provides:
//! - FX rate histories and horizon-scaled returns ([`market`])
//! - Portfolio P&L from currency positions ([`portfolio`])
//! - The VaR estimator with converted and order-statistic routes ([`var`])
//! - Seeded market simulation ([`simulation`], [`rng`])
//! - Parallel agreement checks between the two routes ([`validation`])
//!
//! ## Example
//!
//! ```
//! use regvar_risk::rng::SimulationRng;
//! use regvar_risk::simulation::{simulate, FxSimulationConfig};
//! use regvar_risk::var::{HistoricalVar, VarConfig};
//!
//! let mut rng = SimulationRng::from_seed(11);
//! let market = simulate(&FxSimulationConfig::default(), &mut rng).unwrap();
//! let estimator = HistoricalVar::new(VarConfig::default()).unwrap();
//!
//! let pnl = estimator.portfolio_pnl(&market.history, &market.portfolio).unwrap();
//! let comparison = estimator.compare(&pnl).unwrap();
//! assert!(comparison.abs_diff() < 1e-8);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod error;
pub mod market;
pub mod portfolio;
pub mod rng;
pub mod simulation;
pub mod validation;
pub mod var;

pub use error::RiskError;
pub use market::{FxRateHistory, ReturnSeries};
pub use portfolio::FxPortfolio;
pub use simulation::{simulate, CurrencySpec, FxSimulationConfig, SimulatedMarket};
pub use validation::{ValidationReport, ValidationRun};
pub use var::{ConversionLength, HistoricalVar, VarConfig, VarMethod, VarResult};
