//! Quantile conventions and conversion between them.
//!
//! This module provides:
//! - `convention`: [`QuantileConvention`] tags and the tagged [`Quantile`] value
//! - `converter`: [`QuantileConverter`] and the [`convert`] shorthand

pub mod convention;
pub mod converter;

pub use convention::{Quantile, QuantileConvention};
pub use converter::{convert, representable_range, QuantileConverter, MIN_SAMPLE_SIZE};
