//! Sorted samples, order statistics and the linear-interpolation estimator.
//!
//! [`SortedSample::quantile`] is the generic order-statistic estimator: for
//! sorted values `x[0..n]` and argument `p`, `h = (n - 1) · p` and the result
//! interpolates linearly between `x[floor(h)]` and `x[floor(h) + 1]`. This is
//! the estimator that [`crate::quantile::convert`] targets.
//!
//! [`SortedSample::regulatory_quantile`] is the hand-rolled reference: it
//! interpolates between the `floor(r)`-th and `ceil(r)`-th smallest values at
//! fractional rank `r = (n + 1) · q`.

use crate::quantile::representable_range;
use crate::types::{QuantileError, SampleError};

/// A sample of finite observations held in non-decreasing order.
///
/// # Examples
///
/// ```
/// use regvar_core::sample::SortedSample;
///
/// let sample = SortedSample::new(vec![3.0, 1.0, 2.0]).unwrap();
/// assert_eq!(sample.as_slice(), &[1.0, 2.0, 3.0]);
/// assert_eq!(sample.quantile(0.25).unwrap(), 1.5);
/// assert_eq!(sample.order_statistic(3).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortedSample {
    values: Vec<f64>,
}

impl SortedSample {
    /// Sorts `values` and wraps them.
    ///
    /// # Errors
    /// `SampleError::NonFinite` with the input position of the first NaN or
    /// infinite value.
    pub fn new(mut values: Vec<f64>) -> Result<Self, SampleError> {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SampleError::NonFinite { index });
        }
        values.sort_by(f64::total_cmp);
        Ok(Self { values })
    }

    /// Copies and sorts a slice.
    pub fn from_slice(values: &[f64]) -> Result<Self, SampleError> {
        Self::new(values.to_vec())
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the sample holds no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sorted observations.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the sample, returning the sorted observations.
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Smallest observation.
    pub fn min(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Largest observation.
    pub fn max(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// The `rank`-th smallest observation (1-based).
    ///
    /// # Errors
    /// `SampleError::RankOutOfRange` unless `1 <= rank <= len`.
    pub fn order_statistic(&self, rank: usize) -> Result<f64, SampleError> {
        if rank == 0 || rank > self.values.len() {
            return Err(SampleError::RankOutOfRange {
                rank,
                len: self.values.len(),
            });
        }
        Ok(self.values[rank - 1])
    }

    /// Linear-interpolation quantile estimator.
    ///
    /// The i-th smallest value (1-based) sits at `(i - 1) / (n - 1)`; values
    /// between two such points are interpolated linearly. A one-element
    /// sample returns its element for every `p`.
    ///
    /// # Errors
    /// - `SampleError::Empty` for an empty sample
    /// - `SampleError::ProbabilityOutOfRange` if `p` is NaN or outside `[0, 1]`
    ///
    /// # Examples
    /// ```
    /// use regvar_core::sample::SortedSample;
    ///
    /// let sample = SortedSample::new((1..=5).map(f64::from).collect()).unwrap();
    /// assert_eq!(sample.quantile(0.0).unwrap(), 1.0);
    /// assert_eq!(sample.quantile(0.5).unwrap(), 3.0);
    /// assert!((sample.quantile(0.1).unwrap() - 1.4).abs() < 1e-12);
    /// assert!(sample.quantile(1.5).is_err());
    /// ```
    pub fn quantile(&self, p: f64) -> Result<f64, SampleError> {
        let n = self.values.len();
        if n == 0 {
            return Err(SampleError::Empty);
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(SampleError::ProbabilityOutOfRange { p });
        }
        if n == 1 {
            return Ok(self.values[0]);
        }

        let h = (n - 1) as f64 * p;
        let lower = h.floor();
        let j = lower as usize;
        let g = h - lower;

        if j + 1 >= n {
            return Ok(self.values[n - 1]);
        }
        let (a, b) = (self.values[j], self.values[j + 1]);
        Ok(a + g * (b - a))
    }

    /// Reference regulatory quantile by direct order-statistic interpolation.
    ///
    /// Places the fractional rank `r = (n + 1) · q` on the sample and
    /// interpolates between the `floor(r)`-th and `ceil(r)`-th smallest
    /// values. For `n = 259` and `q = 0.01` this is
    /// `0.4 × 2nd smallest + 0.6 × 3rd smallest`.
    ///
    /// No minimum-length policy is applied; only representability is checked.
    ///
    /// # Errors
    /// - `QuantileError::QuantileTooSmall` if `q < 1/(n+1)` or `q` is NaN
    /// - `QuantileError::QuantileTooLarge` if `q > n/(n+1)`
    ///
    /// An empty sample has no representable quantile and always fails.
    pub fn regulatory_quantile(&self, q: f64) -> Result<f64, QuantileError> {
        let n = self.values.len();
        let (min, max) = representable_range(n);
        if q.is_nan() || q < min {
            return Err(QuantileError::QuantileTooSmall { quantile: q, min });
        }
        if q > max {
            return Err(QuantileError::QuantileTooLarge { quantile: q, max });
        }

        let len = n as f64;
        let rank = ((len + 1.0) * q).clamp(1.0, len);
        let lower = rank.floor();
        let i = lower as usize;
        let weight = rank - lower;

        let a = self.values[i - 1];
        if i == n || weight == 0.0 {
            return Ok(a);
        }
        let b = self.values[i];
        Ok((1.0 - weight) * a + weight * b)
    }
}

impl TryFrom<Vec<f64>> for SortedSample {
    type Error = SampleError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}
