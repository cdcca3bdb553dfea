//! Regulatory-to-interpolation quantile conversion.
//!
//! ## Derivation
//!
//! Regulatory VaR texts rank a sorted P&L vector so that the i-th smallest
//! observation carries quantile `i / N`. Historical windows are quoted by
//! their number of *prices* (e.g. 260), which yields one fewer *returns*
//! (259). The converter therefore pretends the observed sample of length `n`
//! had `n + 1` entries, entry `i` carrying quantile `i / (n + 1)`, and solves
//! for the fractional rank that hits `q` exactly:
//!
//! ```text
//! r = (n + 1) · q
//! ```
//!
//! A linear-interpolation estimator places rank `r` of the real sample at
//! `(r - 1) / (n - 1)`, which is the returned value.
//!
//! Only ranks in `[1, n]` exist in the real sample, so `q` must lie in
//! `[1 / (n + 1), n / (n + 1)]`. Values outside that interval are rejected,
//! never clamped or extrapolated.
//!
//! ## Sample Length Policy
//!
//! Samples shorter than [`MIN_SAMPLE_SIZE`] are rejected. The threshold is an
//! operating-range policy with no authoritative source behind it; it can be
//! changed per converter with [`QuantileConverter::with_min_sample_size`].

use super::convention::{Quantile, QuantileConvention};
use crate::types::QuantileError;

/// Default minimum sample length accepted by the converter.
///
/// Policy choice, not a mathematical requirement.
pub const MIN_SAMPLE_SIZE: usize = 10;

/// Smallest policy threshold a converter accepts; `n - 1` is a divisor.
const MIN_SAMPLE_SIZE_FLOOR: usize = 2;

/// Stateless converter between quantile conventions.
///
/// Holds only the minimum-sample-size policy, so it is `Copy` and can be
/// shared freely between threads.
///
/// # Examples
///
/// ```
/// use regvar_core::quantile::QuantileConverter;
///
/// let converter = QuantileConverter::default();
/// let p = converter.convert(259, 0.01).unwrap();
/// assert!((p - 0.0062015503875969).abs() < 1e-12);
///
/// // A looser policy admits shorter samples
/// let loose = QuantileConverter::with_min_sample_size(5);
/// assert!(loose.convert(6, 0.5).is_ok());
/// assert!(converter.convert(6, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "ConverterSettings"))]
pub struct QuantileConverter {
    min_sample_size: usize,
}

/// Deserialised form, routed through [`QuantileConverter::with_min_sample_size`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ConverterSettings {
    min_sample_size: usize,
}

#[cfg(feature = "serde")]
impl From<ConverterSettings> for QuantileConverter {
    fn from(settings: ConverterSettings) -> Self {
        Self::with_min_sample_size(settings.min_sample_size)
    }
}

impl Default for QuantileConverter {
    fn default() -> Self {
        Self {
            min_sample_size: MIN_SAMPLE_SIZE,
        }
    }
}

impl QuantileConverter {
    /// Creates a converter with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter with a custom minimum sample length.
    ///
    /// Values below 2 are raised to 2.
    pub fn with_min_sample_size(min_sample_size: usize) -> Self {
        Self {
            min_sample_size: min_sample_size.max(MIN_SAMPLE_SIZE_FLOOR),
        }
    }

    /// Returns the minimum accepted sample length.
    #[inline]
    pub fn min_sample_size(&self) -> usize {
        self.min_sample_size
    }

    fn check_len(&self, n: usize) -> Result<(), QuantileError> {
        if n < self.min_sample_size {
            return Err(QuantileError::SampleTooShort {
                len: n,
                min: self.min_sample_size,
            });
        }
        Ok(())
    }

    /// Converts a regulatory quantile into the interpolation convention.
    ///
    /// # Arguments
    /// * `n` - Observed sample length, excluding any imagined padding
    /// * `q` - Regulatory quantile
    ///
    /// # Errors
    /// Checked in this order:
    /// - `QuantileError::SampleTooShort` if `n` is below the policy minimum
    /// - `QuantileError::QuantileTooSmall` if `q < 1/(n+1)` or `q` is NaN
    /// - `QuantileError::QuantileTooLarge` if `q > n/(n+1)`
    ///
    /// # Examples
    /// ```
    /// use regvar_core::quantile::QuantileConverter;
    /// use regvar_core::types::QuantileError;
    ///
    /// let c = QuantileConverter::default();
    /// assert_eq!(c.convert(259, 1.0 / 260.0).unwrap(), 0.0);
    /// assert!(matches!(
    ///     c.convert(259, 0.001),
    ///     Err(QuantileError::QuantileTooSmall { .. })
    /// ));
    /// ```
    pub fn convert(&self, n: usize, q: f64) -> Result<f64, QuantileError> {
        self.check_len(n)?;

        let (min, max) = representable_range(n);
        if q.is_nan() || q < min {
            return Err(QuantileError::QuantileTooSmall { quantile: q, min });
        }
        if q > max {
            return Err(QuantileError::QuantileTooLarge { quantile: q, max });
        }

        // Endpoints are exact: (n+1)·(1/(n+1)) need not round back to 1
        if q == min {
            return Ok(0.0);
        }
        if q == max {
            return Ok(1.0);
        }

        let len = n as f64;
        let rank = (len + 1.0) * q;
        let p = (rank - 1.0) / (len - 1.0);

        Ok(p.clamp(0.0, 1.0))
    }

    /// Maps an interpolation-convention quantile back to the regulatory one.
    ///
    /// Inverse of [`convert`](Self::convert): `q = ((n-1)·p + 1) / (n+1)`.
    ///
    /// # Errors
    /// - `QuantileError::SampleTooShort` if `n` is below the policy minimum
    /// - `QuantileError::QuantileTooSmall` if `p < 0` or `p` is NaN
    /// - `QuantileError::QuantileTooLarge` if `p > 1`
    pub fn to_regulatory(&self, n: usize, p: f64) -> Result<f64, QuantileError> {
        self.check_len(n)?;

        if p.is_nan() || p < 0.0 {
            return Err(QuantileError::QuantileTooSmall {
                quantile: p,
                min: 0.0,
            });
        }
        if p > 1.0 {
            return Err(QuantileError::QuantileTooLarge {
                quantile: p,
                max: 1.0,
            });
        }

        let len = n as f64;
        Ok(((len - 1.0) * p + 1.0) / (len + 1.0))
    }

    /// Re-expresses a tagged quantile in the `target` convention.
    ///
    /// A quantile already in `target` is returned unchanged.
    pub fn express(
        &self,
        n: usize,
        quantile: Quantile,
        target: QuantileConvention,
    ) -> Result<Quantile, QuantileError> {
        if quantile.convention() == target {
            return Ok(quantile);
        }
        match target {
            QuantileConvention::Interpolated => {
                Quantile::interpolated(self.convert(n, quantile.value())?)
            }
            QuantileConvention::Regulatory => {
                Quantile::regulatory(self.to_regulatory(n, quantile.value())?)
            }
        }
    }

    /// Converts a tagged quantile into the interpolation convention.
    pub fn convert_quantile(
        &self,
        n: usize,
        quantile: Quantile,
    ) -> Result<Quantile, QuantileError> {
        self.express(n, quantile, QuantileConvention::Interpolated)
    }
}

/// Closed interval of regulatory quantiles representable by a sample of length `n`.
///
/// ```
/// use regvar_core::quantile::representable_range;
///
/// let (lo, hi) = representable_range(259);
/// assert_eq!(lo, 1.0 / 260.0);
/// assert_eq!(hi, 259.0 / 260.0);
/// ```
pub fn representable_range(n: usize) -> (f64, f64) {
    let len = n as f64;
    (1.0 / (len + 1.0), len / (len + 1.0))
}

/// Converts a regulatory quantile with the default sample length policy.
///
/// Shorthand for `QuantileConverter::default().convert(n, q)`.
///
/// ```
/// use regvar_core::quantile::convert;
///
/// let p = convert(259, 0.01).unwrap();
/// assert!((p - 1.6 / 258.0).abs() < 1e-15);
/// assert!(convert(9, 0.5).is_err());
/// ```
pub fn convert(n: usize, q: f64) -> Result<f64, QuantileError> {
    QuantileConverter::default().convert(n, q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // ==========================================================
    // Reference values
    // ==========================================================

    #[test]
    fn test_one_percent_of_259() {
        let p = convert(259, 0.01).unwrap();
        assert_abs_diff_eq!(p, 0.0062015503875969, epsilon = 1e-8);
        assert_abs_diff_eq!(p, 0.006201550387596899, epsilon = 1e-15);
    }

    #[test]
    fn test_median_is_fixed_point() {
        // (n+1)/2 is the middle rank under both conventions
        for n in [10, 11, 100, 259, 1001] {
            assert_abs_diff_eq!(convert(n, 0.5).unwrap(), 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_exact_ranks() {
        // Rank k of n+1 maps to (k-1)/(n-1)
        let n = 19;
        for k in 1..=n {
            let q = k as f64 / (n + 1) as f64;
            let expected = (k - 1) as f64 / (n - 1) as f64;
            assert_abs_diff_eq!(convert(n, q).unwrap(), expected, epsilon = 1e-12);
        }
    }

    // ==========================================================
    // Boundaries
    // ==========================================================

    #[test]
    fn test_lower_boundary_maps_to_zero() {
        for n in [10, 57, 259, 260, 10_000] {
            let (lo, _) = representable_range(n);
            assert_eq!(convert(n, lo).unwrap(), 0.0, "n = {}", n);
        }
    }

    #[test]
    fn test_upper_boundary_maps_to_one() {
        for n in [10, 57, 259, 260, 10_000] {
            let (_, hi) = representable_range(n);
            assert_eq!(convert(n, hi).unwrap(), 1.0, "n = {}", n);
        }
    }

    #[test]
    fn test_just_outside_boundaries_rejected() {
        let n = 259;
        let (lo, hi) = representable_range(n);
        let below = lo - 1e-12;
        let above = hi + 1e-12;
        assert!(matches!(
            convert(n, below),
            Err(QuantileError::QuantileTooSmall { .. })
        ));
        assert!(matches!(
            convert(n, above),
            Err(QuantileError::QuantileTooLarge { .. })
        ));
    }

    // ==========================================================
    // Error conditions
    // ==========================================================

    #[test]
    fn test_sample_too_short() {
        let err = convert(9, 0.5).unwrap_err();
        assert_eq!(err, QuantileError::SampleTooShort { len: 9, min: 10 });
        assert_eq!(err.to_string(), "sample too short");
    }

    #[test]
    fn test_sample_too_short_for_degenerate_lengths() {
        for n in 0..10 {
            assert!(matches!(
                convert(n, 0.5),
                Err(QuantileError::SampleTooShort { .. })
            ));
        }
        assert!(convert(10, 0.5).is_ok());
    }

    #[test]
    fn test_quantile_too_small() {
        let err = convert(259, 0.001).unwrap_err();
        assert_eq!(err.to_string(), "quantile too small to represent");
        match err {
            QuantileError::QuantileTooSmall { quantile, min } => {
                assert_eq!(quantile, 0.001);
                assert_abs_diff_eq!(min, 1.0 / 260.0, epsilon = 1e-15);
            }
            other => panic!("Expected QuantileTooSmall, got {:?}", other),
        }
    }

    #[test]
    fn test_quantile_too_large() {
        let err = convert(259, 0.999).unwrap_err();
        assert_eq!(err.to_string(), "quantile too large to represent");
        match err {
            QuantileError::QuantileTooLarge { quantile, max } => {
                assert_eq!(quantile, 0.999);
                assert_abs_diff_eq!(max, 259.0 / 260.0, epsilon = 1e-15);
            }
            other => panic!("Expected QuantileTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_length_checked_before_quantile() {
        // Both preconditions fail; the length check wins
        assert!(matches!(
            convert(3, 2.0),
            Err(QuantileError::SampleTooShort { .. })
        ));
    }

    #[test]
    fn test_non_finite_quantiles() {
        assert!(matches!(
            convert(100, f64::NAN),
            Err(QuantileError::QuantileTooSmall { .. })
        ));
        assert!(matches!(
            convert(100, f64::NEG_INFINITY),
            Err(QuantileError::QuantileTooSmall { .. })
        ));
        assert!(matches!(
            convert(100, f64::INFINITY),
            Err(QuantileError::QuantileTooLarge { .. })
        ));
    }

    #[test]
    fn test_zero_and_one_always_unrepresentable() {
        assert!(convert(259, 0.0).is_err());
        assert!(convert(259, 1.0).is_err());
    }

    // ==========================================================
    // Policy
    // ==========================================================

    #[test]
    fn test_custom_min_sample_size() {
        let strict = QuantileConverter::with_min_sample_size(260);
        assert_eq!(
            strict.convert(259, 0.01),
            Err(QuantileError::SampleTooShort { len: 259, min: 260 })
        );
        assert!(strict.convert(260, 0.01).is_ok());
    }

    #[test]
    fn test_min_sample_size_floor() {
        let c = QuantileConverter::with_min_sample_size(0);
        assert_eq!(c.min_sample_size(), 2);
        assert!(matches!(
            c.convert(1, 0.5),
            Err(QuantileError::SampleTooShort { .. })
        ));
        // n = 2: ranks 1 and 2 of an imagined 3
        assert_abs_diff_eq!(c.convert(2, 1.0 / 3.0).unwrap(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(c.convert(2, 0.5).unwrap(), 0.5, epsilon = 1e-15);
        assert_eq!(c.convert(2, 2.0 / 3.0).unwrap(), 1.0);
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(QuantileConverter::new().min_sample_size(), MIN_SAMPLE_SIZE);
        assert_eq!(MIN_SAMPLE_SIZE, 10);
    }

    // ==========================================================
    // Inverse and tagged quantiles
    // ==========================================================

    #[test]
    fn test_to_regulatory_inverts_convert() {
        let c = QuantileConverter::default();
        for q in [0.004, 0.01, 0.025, 0.05, 0.5, 0.95, 0.99] {
            let p = c.convert(259, q).unwrap();
            assert_abs_diff_eq!(c.to_regulatory(259, p).unwrap(), q, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_to_regulatory_endpoints() {
        let c = QuantileConverter::default();
        let (lo, hi) = representable_range(50);
        assert_abs_diff_eq!(c.to_regulatory(50, 0.0).unwrap(), lo, epsilon = 1e-15);
        assert_abs_diff_eq!(c.to_regulatory(50, 1.0).unwrap(), hi, epsilon = 1e-15);
        assert!(c.to_regulatory(50, -0.1).is_err());
        assert!(c.to_regulatory(50, 1.1).is_err());
        assert!(c.to_regulatory(5, 0.5).is_err());
    }

    #[test]
    fn test_express_between_conventions() {
        let c = QuantileConverter::default();
        let q = Quantile::regulatory(0.01).unwrap();

        let p = c.convert_quantile(259, q).unwrap();
        assert_eq!(p.convention(), QuantileConvention::Interpolated);
        assert_abs_diff_eq!(p.value(), 1.6 / 258.0, epsilon = 1e-15);

        let back = c.express(259, p, QuantileConvention::Regulatory).unwrap();
        assert_eq!(back.convention(), QuantileConvention::Regulatory);
        assert_abs_diff_eq!(back.value(), 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_express_same_convention_is_identity() {
        let c = QuantileConverter::default();
        let p = Quantile::interpolated(0.3).unwrap();
        // No length check: nothing is converted
        assert_eq!(c.convert_quantile(3, p).unwrap(), p);
    }

    #[test]
    fn test_express_propagates_domain_errors() {
        let c = QuantileConverter::default();
        let q = Quantile::regulatory(0.001).unwrap();
        assert!(matches!(
            c.convert_quantile(259, q),
            Err(QuantileError::QuantileTooSmall { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_applies_length_floor() {
        let c: QuantileConverter = serde_json::from_str(r#"{"min_sample_size":0}"#).unwrap();
        assert_eq!(c, QuantileConverter::with_min_sample_size(2));
        assert!(c.convert(1, 0.5).is_err());

        let c: QuantileConverter = serde_json::from_str(r#"{"min_sample_size":25}"#).unwrap();
        assert_eq!(c.min_sample_size(), 25);
        assert_eq!(serde_json::to_string(&c).unwrap(), r#"{"min_sample_size":25}"#);
    }

    #[test]
    fn test_converter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QuantileConverter>();
    }
}
