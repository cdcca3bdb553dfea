//! Standard normal cumulative distribution function.
//!
//! Generic over `T: Float` so the pricer can run on `f32` or `f64` inputs
//! alike. Evaluation goes through `statrs`' complementary error function in
//! `f64`, which is accurate to machine precision across the real line.

use num_traits::Float;
use statrs::function::erf::erfc;

/// Standard normal cumulative distribution function.
///
/// Φ(x) = erfc(-x / √2) / 2
///
/// Inputs that cannot be represented as `f64` yield NaN.
///
/// # Examples
/// ```
/// use regvar_models::analytical::distributions::norm_cdf;
///
/// assert_eq!(norm_cdf(0.0_f64), 0.5);
/// assert!((norm_cdf(1.96_f64) - 0.975_002_104_851_780).abs() < 1e-14);
/// assert!(norm_cdf(-8.0_f64) < 1e-14);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let Some(x) = x.to_f64() else {
        return T::nan();
    };
    T::from(0.5 * erfc(-x / std::f64::consts::SQRT_2)).unwrap_or_else(T::nan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_norm_cdf_reference_values() {
        let cases = [
            (-3.0, 0.001_349_898_031_630_094_6),
            (-1.0, 0.158_655_253_931_457_05),
            (0.0, 0.5),
            (0.15, 0.559_617_692_370_242_5),
            (0.35, 0.636_830_651_175_619),
            (0.5, 0.691_462_461_274_013_1),
            (1.0, 0.841_344_746_068_542_9),
            (2.326_347_874_040_841, 0.99),
        ];
        for (x, expected) in cases {
            assert_abs_diff_eq!(norm_cdf(x), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [0.1, 0.7, 1.3, 2.9, 5.0] {
            assert_abs_diff_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_cdf_monotonic() {
        let mut prev = norm_cdf(-10.0_f64);
        for i in -99..=100 {
            let current = norm_cdf(i as f64 / 10.0);
            assert!(current >= prev);
            prev = current;
        }
    }

    #[test]
    fn test_norm_cdf_tails() {
        assert!(norm_cdf(-40.0_f64) >= 0.0);
        assert!(norm_cdf(40.0_f64) <= 1.0);
        assert_abs_diff_eq!(norm_cdf(40.0_f64), 1.0, epsilon = 1e-15);
        // Lower tail keeps relative precision instead of underflowing to 0.
        assert_abs_diff_eq!(
            norm_cdf(-8.0_f64) / 6.220_960_574_271_819e-16,
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_norm_cdf_nan_propagates() {
        assert!(norm_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_f32_inputs() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-6);
        assert!((norm_cdf(1.0_f32) - 0.841_344_7).abs() < 1e-6);
    }
}
