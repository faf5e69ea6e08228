//! Beta-Bernoulli conjugate model for coin flips.
//!
//! The model uses:
//! - Prior: `θ ~ Beta(α, β)`
//! - Likelihood: `x | θ ~ Bernoulli(θ)` per flip
//! - Posterior after `h` heads in `n` flips: `θ | data ~ Beta(α + h, β + n - h)`
//!
//! The uniform prior is Beta(1, 1), so the closed-form posterior for a
//! flip sequence is Beta(1 + heads, 1 + tails). Grid estimates are checked
//! against these parameters.

use super::beta::{beta_inv_cdf, beta_mean, beta_var};

/// Parameters for a Beta distribution over the coin bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaParams {
    /// Shape parameter alpha (heads + prior)
    pub alpha: f64,
    /// Shape parameter beta (tails + prior)
    pub beta: f64,
}

impl BetaParams {
    /// Create new Beta parameters with validation.
    ///
    /// Returns None if parameters are invalid (non-positive or NaN).
    pub fn new(alpha: f64, beta: f64) -> Option<Self> {
        if alpha.is_nan() || beta.is_nan() || alpha <= 0.0 || beta <= 0.0 {
            return None;
        }
        Some(Self { alpha, beta })
    }

    /// Beta(1, 1), the uniform prior over [0, 1].
    pub fn uniform() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }

    /// E[θ] = α / (α + β).
    pub fn mean(&self) -> f64 {
        beta_mean(self.alpha, self.beta)
    }

    /// Var[θ] = αβ / ((α+β)²(α+β+1)).
    pub fn variance(&self) -> f64 {
        beta_var(self.alpha, self.beta)
    }

    /// Mode of the density, when it is unique and interior.
    ///
    /// Defined for α > 1 and β > 1 as (α - 1) / (α + β - 2). With a uniform
    /// prior this is the maximum-likelihood estimate heads / n.
    pub fn mode(&self) -> Option<f64> {
        if self.alpha > 1.0 && self.beta > 1.0 {
            Some((self.alpha - 1.0) / (self.alpha + self.beta - 2.0))
        } else {
            None
        }
    }
}

/// Posterior parameters after observing `heads` in `flips` trials.
///
/// Returns None if the counts are inconsistent (`heads > flips`).
///
/// # Example
/// ```
/// use cb_math::bernoulli::{posterior_params, BetaParams};
///
/// let posterior = posterior_params(&BetaParams::uniform(), 7, 10).unwrap();
/// assert_eq!(posterior, BetaParams { alpha: 8.0, beta: 4.0 });
/// ```
pub fn posterior_params(prior: &BetaParams, heads: u64, flips: u64) -> Option<BetaParams> {
    if heads > flips {
        return None;
    }
    BetaParams::new(
        prior.alpha + heads as f64,
        prior.beta + (flips - heads) as f64,
    )
}

/// Equal-tailed credible interval for θ at `level` in (0, 1).
///
/// Returns (NAN, NAN) for an out-of-range level.
pub fn credible_interval(posterior: &BetaParams, level: f64) -> (f64, f64) {
    if level.is_nan() || level <= 0.0 || level >= 1.0 {
        return (f64::NAN, f64::NAN);
    }
    let tail = (1.0 - level) / 2.0;
    (
        beta_inv_cdf(tail, posterior.alpha, posterior.beta),
        beta_inv_cdf(1.0 - tail, posterior.alpha, posterior.beta),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_shapes() {
        assert!(BetaParams::new(0.0, 1.0).is_none());
        assert!(BetaParams::new(1.0, -2.0).is_none());
        assert!(BetaParams::new(f64::NAN, 1.0).is_none());
        assert!(BetaParams::new(0.5, 0.5).is_some());
    }

    #[test]
    fn uniform_posterior_counts() {
        let post = posterior_params(&BetaParams::uniform(), 7, 10).unwrap();
        assert_eq!(post.alpha, 8.0);
        assert_eq!(post.beta, 4.0);
        assert!((post.mean() - 2.0 / 3.0).abs() < 1e-12);
        assert!((post.mode().unwrap() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn no_flips_keeps_prior() {
        let post = posterior_params(&BetaParams::uniform(), 0, 0).unwrap();
        assert_eq!(post, BetaParams::uniform());
        assert!(post.mode().is_none());
    }

    #[test]
    fn inconsistent_counts_rejected() {
        assert!(posterior_params(&BetaParams::uniform(), 3, 2).is_none());
    }

    #[test]
    fn credible_interval_contains_mean() {
        let post = BetaParams { alpha: 8.0, beta: 4.0 };
        let (lo, hi) = credible_interval(&post, 0.95);
        assert!(lo < post.mean() && post.mean() < hi);
        assert!(lo > 0.3 && hi < 0.95, "({lo}, {hi})");

        let (lo, hi) = credible_interval(&post, 1.0);
        assert!(lo.is_nan() && hi.is_nan());
    }
}
