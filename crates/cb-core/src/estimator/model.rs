//! Pointwise model terms: uniform prior, binomial likelihood, posterior.
//!
//! These are evaluated once per grid point. The prior is checked at every
//! point, so grids reaching outside [0, 1] contribute zero mass there.

use cb_common::Observations;
use cb_math::log_pow;

/// Uniform prior over the bias: 1 on [0, 1] inclusive, 0 elsewhere (and for NaN).
pub fn prior(theta: f64) -> f64 {
    if (0.0..=1.0).contains(&theta) {
        1.0
    } else {
        0.0
    }
}

/// Binomial likelihood `θ^heads · (1-θ)^tails`.
///
/// Uses IEEE `powf`, so `0^0 = 1`: θ = 0 with no heads (or θ = 1 with no
/// tails) gives 1, and θ = 0 with heads (θ = 1 with tails) gives exactly 0.
pub fn likelihood(theta: f64, data: &Observations) -> f64 {
    let heads = data.heads() as f64;
    let tails = data.tails() as f64;
    theta.powf(heads) * (1.0 - theta).powf(tails)
}

/// Unnormalized posterior `likelihood · prior`.
///
/// Points the prior excludes are 0 without evaluating the likelihood, which
/// could overflow far outside [0, 1] and turn `inf · 0` into NaN.
pub fn posterior(theta: f64, data: &Observations) -> f64 {
    let p = prior(theta);
    if p == 0.0 {
        return 0.0;
    }
    likelihood(theta, data) * p
}

/// Log of the unnormalized posterior; `-inf` where the prior is 0.
pub fn log_posterior(theta: f64, data: &Observations) -> f64 {
    if prior(theta) == 0.0 {
        return f64::NEG_INFINITY;
    }
    log_pow(theta, data.heads() as f64) + log_pow(1.0 - theta, data.tails() as f64)
}
