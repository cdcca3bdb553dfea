//! Seeded random number generation for market simulation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Reproducible random source backed by `StdRng`.
///
/// The same seed yields the same draws on the same platform, which is what
/// makes a failed validation trial replayable from its reported seed.
///
/// # Examples
/// ```
/// use regvar_risk::rng::SimulationRng;
///
/// let mut a = SimulationRng::from_seed(7);
/// let mut b = SimulationRng::from_seed(7);
/// assert_eq!(a.gen_normal(0.0, 1.0), b.gen_normal(0.0, 1.0));
/// ```
#[derive(Debug, Clone)]
pub struct SimulationRng {
    inner: StdRng,
    seed: u64,
}

impl SimulationRng {
    /// Creates a generator from a 64-bit seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed the generator was created with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw from `[0, 1)`.
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Uniform draw from `[low, high)`.
    ///
    /// # Panics
    /// If `low >= high` or either bound is not finite.
    #[inline]
    pub fn gen_uniform_range(&mut self, low: f64, high: f64) -> f64 {
        self.inner.gen_range(low..high)
    }

    /// Normal draw with the given mean and standard deviation.
    #[inline]
    pub fn gen_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = StandardNormal.sample(&mut self.inner);
        mean + std_dev * z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_reproducibility() {
        let mut a = SimulationRng::from_seed(12345);
        let mut b = SimulationRng::from_seed(12345);
        for _ in 0..100 {
            assert_eq!(a.gen_uniform(), b.gen_uniform());
        }
        assert_eq!(a.seed(), 12345);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = SimulationRng::from_seed(1);
        let mut b = SimulationRng::from_seed(2);
        let same = (0..20).filter(|_| a.gen_uniform() == b.gen_uniform()).count();
        assert!(same < 20);
    }

    #[test]
    fn test_uniform_range_bounds() {
        let mut rng = SimulationRng::from_seed(99);
        for _ in 0..1_000 {
            let x = rng.gen_uniform_range(10_000.0, 100_000.0);
            assert!((10_000.0..100_000.0).contains(&x));
        }
    }

    #[test]
    fn test_uniform_range_excludes_upper_bound_on_narrow_ranges() {
        let mut rng = SimulationRng::from_seed(5);
        let (low, high) = (1.0, 1.0 + f64::EPSILON);
        for _ in 0..10_000 {
            let x = rng.gen_uniform_range(low, high);
            assert!(x >= low && x < high, "{} escaped [{}, {})", x, low, high);
        }
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = SimulationRng::from_seed(2024);
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| rng.gen_normal(120.0, 30.0)).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        assert!((mean - 120.0).abs() < 1.0, "mean = {}", mean);
        assert!((var.sqrt() - 30.0).abs() < 1.0, "std = {}", var.sqrt());
    }
}
