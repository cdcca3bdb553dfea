//! Property tests for the regulatory-to-interpolation quantile conversion.
//!
//! These exercise the conversion together with the linear-interpolation
//! estimator, the way a VaR calculation consumes it.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use regvar_core::quantile::{convert, representable_range};
use regvar_core::sample::SortedSample;
use regvar_core::types::QuantileError;

const TOLERANCE: f64 = 1e-8;

/// Sample length and a regulatory quantile inside its representable range.
fn valid_case() -> impl Strategy<Value = (usize, f64)> {
    (10usize..2_000, 0.0f64..=1.0).prop_map(|(n, u)| {
        let (lo, hi) = representable_range(n);
        (n, (lo + u * (hi - lo)).clamp(lo, hi))
    })
}

fn pnl_vector(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e4f64..1.0e4, len)
}

#[test]
fn one_percent_var_of_259_reference_value() {
    assert_abs_diff_eq!(
        convert(259, 0.01).unwrap(),
        0.0062015503875969,
        epsilon = TOLERANCE
    );
}

#[test]
fn error_messages_for_unrepresentable_inputs() {
    assert_eq!(convert(9, 0.5).unwrap_err().to_string(), "sample too short");
    assert_eq!(
        convert(259, 0.001).unwrap_err().to_string(),
        "quantile too small to represent"
    );
    assert_eq!(
        convert(259, 0.999).unwrap_err().to_string(),
        "quantile too large to represent"
    );
}

#[test]
fn interpolated_var_matches_weighted_order_statistics_on_a_fixed_vector() {
    let values: Vec<f64> = (0..259)
        .map(|i| (i as f64 * 0.731).sin() * 1_000.0)
        .collect();
    let sample = SortedSample::new(values).unwrap();

    let var = sample.quantile(convert(259, 0.01).unwrap()).unwrap();
    let expected =
        0.4 * sample.order_statistic(2).unwrap() + 0.6 * sample.order_statistic(3).unwrap();

    assert_abs_diff_eq!(var, expected, epsilon = TOLERANCE);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn converted_quantile_lies_in_unit_interval((n, q) in valid_case()) {
        let p = convert(n, q).unwrap();
        prop_assert!((0.0..=1.0).contains(&p), "convert({}, {}) = {}", n, q, p);
    }

    #[test]
    fn conversion_is_monotonic(n in 10usize..2_000, u1 in 0.0f64..=1.0, u2 in 0.0f64..=1.0) {
        let (lo, hi) = representable_range(n);
        let (a, b) = if u1 <= u2 { (u1, u2) } else { (u2, u1) };
        let q_a = (lo + a * (hi - lo)).clamp(lo, hi);
        let q_b = (lo + b * (hi - lo)).clamp(lo, hi);
        prop_assert!(convert(n, q_a).unwrap() <= convert(n, q_b).unwrap());
    }

    /// On the sample 1, 2, ..., m the regulatory quantile q sits at rank
    /// (m + 1)·q, so the estimator must return exactly that rank.
    #[test]
    fn round_trip_on_natural_numbers((m, q) in valid_case()) {
        let sample = SortedSample::new((1..=m).map(|i| i as f64).collect()).unwrap();
        let value = sample.quantile(convert(m, q).unwrap()).unwrap();
        prop_assert!(
            (value - (m as f64 + 1.0) * q).abs() < TOLERANCE,
            "m = {}, q = {}: got {}, expected {}", m, q, value, (m as f64 + 1.0) * q
        );
    }

    /// Mirrors the randomised check on `range(1, n)`: n drawn from 0..500,
    /// q from [0, 1], each case landing in exactly one outcome.
    #[test]
    fn random_lengths_and_quantiles_classified(n in 0usize..500, q in 0.0f64..=1.0) {
        let values: Vec<f64> = (1..n).map(|i| i as f64).collect();
        let len = values.len();
        let result = convert(len, q);

        if len < 10 {
            prop_assert!(matches!(result, Err(QuantileError::SampleTooShort { .. })), "expected {}, got {:?}", "SampleTooShort", result);
        } else if q < 1.0 / (len as f64 + 1.0) {
            prop_assert!(matches!(result, Err(QuantileError::QuantileTooSmall { .. })), "expected {}, got {:?}", "QuantileTooSmall", result);
        } else if q > len as f64 / (len as f64 + 1.0) {
            prop_assert!(matches!(result, Err(QuantileError::QuantileTooLarge { .. })), "expected {}, got {:?}", "QuantileTooLarge", result);
        } else {
            let sample = SortedSample::new(values).unwrap();
            let value = sample.quantile(result.unwrap()).unwrap();
            prop_assert!((value - n as f64 * q).abs() < TOLERANCE);
        }
    }

    /// Holds for arbitrary data, not just for a particular distribution.
    #[test]
    fn one_percent_var_is_weighted_second_and_third_smallest(values in pnl_vector(259)) {
        let sample = SortedSample::new(values).unwrap();
        let var = sample.quantile(convert(259, 0.01).unwrap()).unwrap();
        let expected = 0.4 * sample.order_statistic(2).unwrap()
            + 0.6 * sample.order_statistic(3).unwrap();
        prop_assert!((var - expected).abs() < TOLERANCE, "{} vs {}", var, expected);
    }

    #[test]
    fn estimator_agrees_with_direct_order_statistic_interpolation(
        (values, u) in (10usize..600).prop_flat_map(|n| (pnl_vector(n), 0.0f64..=1.0))
    ) {
        let sample = SortedSample::new(values).unwrap();
        let (lo, hi) = representable_range(sample.len());
        let q = (lo + u * (hi - lo)).clamp(lo, hi);

        let via_conversion = sample.quantile(convert(sample.len(), q).unwrap()).unwrap();
        let direct = sample.regulatory_quantile(q).unwrap();
        prop_assert!((via_conversion - direct).abs() < TOLERANCE);
    }

    #[test]
    fn below_policy_length_always_rejected(n in 0usize..10, q in -1.0f64..2.0) {
        prop_assert_eq!(
            convert(n, q),
            Err(QuantileError::SampleTooShort { len: n, min: 10 })
        );
    }
}
