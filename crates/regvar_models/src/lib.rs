//! # Regvar Models
//!
//! Closed-form pricing of European options on dated contracts.
//!
//! This crate provides:
//! - Standard normal distribution function ([`analytical::distributions`])
//! - The Black-Scholes model on a continuously compounded rate
//!   ([`analytical::BlackScholes`])
//! - Dated option contracts quoted with a nominal annual rate
//!   ([`instruments::EuropeanOption`])
//!
//! ## Example
//!
//! ```
//! use regvar_core::types::Date;
//! use regvar_models::instruments::{EuropeanOption, OptionType};
//!
//! let option = EuropeanOption::new(
//!     100.0,
//!     100.0,
//!     0.05,
//!     Date::from_ymd(2024, 1, 2).unwrap(),
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     0.2,
//!     OptionType::Call,
//! );
//! let price = option.price().unwrap();
//! assert!(price > 0.0 && price < 100.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;

pub use analytical::{BlackScholes, PricerError};
pub use instruments::{EuropeanOption, OptionType};
