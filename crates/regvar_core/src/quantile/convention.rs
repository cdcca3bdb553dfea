//! Quantile values tagged with the convention they are expressed in.

use std::fmt;
use std::str::FromStr;

use crate::types::QuantileError;

/// How a quantile value maps onto the ranks of a sorted sample of length `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QuantileConvention {
    /// The i-th smallest value has quantile `i / n`.
    Regulatory,
    /// The i-th smallest value has quantile `(i - 1) / (n - 1)`, with linear
    /// interpolation between adjacent ranks.
    Interpolated,
}

impl QuantileConvention {
    /// Returns the lowercase convention name.
    pub fn name(&self) -> &'static str {
        match self {
            QuantileConvention::Regulatory => "regulatory",
            QuantileConvention::Interpolated => "interpolated",
        }
    }
}

impl fmt::Display for QuantileConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuantileConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regulatory" | "reg" => Ok(QuantileConvention::Regulatory),
            "interpolated" | "interp" | "linear" => Ok(QuantileConvention::Interpolated),
            _ => Err(format!("Unknown quantile convention: {}", s)),
        }
    }
}

/// A quantile in `[0, 1]` together with its convention.
///
/// # Examples
///
/// ```
/// use regvar_core::quantile::{Quantile, QuantileConvention};
///
/// let q = Quantile::regulatory(0.01).unwrap();
/// assert_eq!(q.convention(), QuantileConvention::Regulatory);
/// assert_eq!(q.value(), 0.01);
///
/// assert!(Quantile::interpolated(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quantile {
    value: f64,
    convention: QuantileConvention,
}

impl Quantile {
    /// Creates a tagged quantile.
    ///
    /// # Errors
    /// - `QuantileError::QuantileTooSmall` if `value` is negative or NaN
    /// - `QuantileError::QuantileTooLarge` if `value` exceeds 1
    pub fn new(value: f64, convention: QuantileConvention) -> Result<Self, QuantileError> {
        if value.is_nan() || value < 0.0 {
            return Err(QuantileError::QuantileTooSmall {
                quantile: value,
                min: 0.0,
            });
        }
        if value > 1.0 {
            return Err(QuantileError::QuantileTooLarge {
                quantile: value,
                max: 1.0,
            });
        }
        Ok(Self { value, convention })
    }

    /// Creates a regulatory-convention quantile.
    pub fn regulatory(value: f64) -> Result<Self, QuantileError> {
        Self::new(value, QuantileConvention::Regulatory)
    }

    /// Creates an interpolation-convention quantile.
    pub fn interpolated(value: f64) -> Result<Self, QuantileError> {
        Self::new(value, QuantileConvention::Interpolated)
    }

    /// Returns the numeric value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the convention tag.
    #[inline]
    pub fn convention(&self) -> QuantileConvention {
        self.convention
    }
}

impl fmt::Display for Quantile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.convention)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_bounds_accepted() {
        assert!(Quantile::regulatory(0.0).is_ok());
        assert!(Quantile::regulatory(1.0).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            Quantile::regulatory(-0.1),
            Err(QuantileError::QuantileTooSmall { .. })
        ));
        assert!(matches!(
            Quantile::interpolated(f64::NAN),
            Err(QuantileError::QuantileTooSmall { .. })
        ));
        assert!(matches!(
            Quantile::interpolated(1.0 + 1e-12),
            Err(QuantileError::QuantileTooLarge { .. })
        ));
    }

    #[test]
    fn test_convention_parse_and_display() {
        assert_eq!(
            "Regulatory".parse::<QuantileConvention>().unwrap(),
            QuantileConvention::Regulatory
        );
        assert_eq!(
            "linear".parse::<QuantileConvention>().unwrap(),
            QuantileConvention::Interpolated
        );
        assert!("nearest".parse::<QuantileConvention>().is_err());
        assert_eq!(QuantileConvention::Interpolated.to_string(), "interpolated");
    }

    #[test]
    fn test_quantile_display() {
        let q = Quantile::regulatory(0.01).unwrap();
        assert_eq!(q.to_string(), "0.01 (regulatory)");
    }
}
