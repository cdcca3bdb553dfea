//! Black-Scholes pricing of European calls and puts.
//!
//! **Call**: C = S·N(d₁) - K·e^(-rτ)·N(d₂)
//! **Put**: P = K·e^(-rτ)·N(-d₂) - S·N(-d₁)
//!
//! with d₁ = (ln(S/K) + (r + σ²/2)τ) / (σ√τ) and d₂ = d₁ - σ√τ, where `r` is
//! continuously compounded and `τ` is in years.
//!
//! When σ√τ is zero the price is the deterministic limit
//! `max(S - K·e^(-rτ), 0)` for a call and `max(K·e^(-rτ) - S, 0)` for a put.

use num_traits::Float;

use super::distributions::norm_cdf;
use super::error::PricerError;
use crate::instruments::OptionType;

/// Black-Scholes model for a single underlying.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use regvar_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K·e^(-rτ)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a model from spot, continuously compounded rate and volatility.
    ///
    /// # Errors
    /// - `PricerError::InvalidSpot` if spot is not a positive finite number
    /// - `PricerError::NegativeVolatility` if volatility is negative or NaN
    ///
    /// # Examples
    /// ```
    /// use regvar_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, -0.2).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, PricerError> {
        if !spot.is_finite() || spot <= T::zero() {
            return Err(PricerError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if volatility.is_nan() || volatility < T::zero() {
            return Err(PricerError::NegativeVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the continuously compounded rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Total standard deviation σ√τ, zero for non-positive `tau`.
    #[inline]
    fn total_vol(&self, tau: T) -> T {
        if tau > T::zero() {
            self.volatility * tau.sqrt()
        } else {
            T::zero()
        }
    }

    #[inline]
    fn discount(&self, tau: T) -> T {
        (-self.rate * tau.max(T::zero())).exp()
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)τ) / (σ√τ)
    ///
    /// Not finite when σ√τ is zero; the prices handle that case separately.
    pub fn d1(&self, strike: T, tau: T) -> T {
        let two = T::one() + T::one();
        let drift = (self.spot / strike).ln()
            + (self.rate + self.volatility * self.volatility / two) * tau.max(T::zero());
        drift / self.total_vol(tau)
    }

    /// d₂ = d₁ - σ√τ
    pub fn d2(&self, strike: T, tau: T) -> T {
        self.d1(strike, tau) - self.total_vol(tau)
    }

    /// European call price for `strike` and year fraction `tau`.
    pub fn price_call(&self, strike: T, tau: T) -> T {
        let df = self.discount(tau);
        if self.total_vol(tau) <= T::zero() {
            return (self.spot - strike * df).max(T::zero());
        }
        let d1 = self.d1(strike, tau);
        let d2 = d1 - self.total_vol(tau);
        self.spot * norm_cdf(d1) - strike * df * norm_cdf(d2)
    }

    /// European put price for `strike` and year fraction `tau`.
    pub fn price_put(&self, strike: T, tau: T) -> T {
        let df = self.discount(tau);
        if self.total_vol(tau) <= T::zero() {
            return (strike * df - self.spot).max(T::zero());
        }
        let d1 = self.d1(strike, tau);
        let d2 = d1 - self.total_vol(tau);
        strike * df * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }

    /// Price of a call or put.
    pub fn price(&self, strike: T, tau: T, option_type: OptionType) -> T {
        match option_type {
            OptionType::Call => self.price_call(strike, tau),
            OptionType::Put => self.price_put(strike, tau),
        }
    }
}
