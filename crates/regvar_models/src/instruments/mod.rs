//! Option contracts.

mod option;

pub use option::{continuous_rate, EuropeanOption, OptionType};
