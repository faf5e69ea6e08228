//! Property-based tests for cb-math numerical functions.
//!
//! Uses proptest to verify mathematical properties hold across many random inputs.

use cb_math::bernoulli::{posterior_params, BetaParams};
use cb_math::{beta_cdf, beta_inv_cdf, linspace, log_pow, log_sum_exp, GridSpec};
use proptest::prelude::*;

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-10;

/// Helper to check approximate equality.
fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a.is_infinite() && b.is_infinite() {
        return a.signum() == b.signum();
    }
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

// ============================================================================
// log_sum_exp / log_pow
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Order of terms does not matter.
    #[test]
    fn log_sum_exp_commutative(a in -100.0..100.0f64, b in -100.0..100.0f64) {
        let ab = log_sum_exp(&[a, b]);
        let ba = log_sum_exp(&[b, a]);
        prop_assert!(approx_eq(ab, ba, TOL), "lse([{},{}])={} != {}", a, b, ab, ba);
    }

    /// Result is bounded by max and max + ln(n).
    #[test]
    fn log_sum_exp_bounds(values in prop::collection::vec(-700.0..700.0f64, 1..50)) {
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lse = log_sum_exp(&values);
        prop_assert!(lse >= max - TOL);
        prop_assert!(lse <= max + (values.len() as f64).ln() + TOL);
    }

    /// exp(log_pow) agrees with powf on the unit interval.
    #[test]
    fn log_pow_matches_powf(base in 0.0..=1.0f64, exponent in 0u32..40) {
        let direct = base.powf(exponent as f64);
        let via_log = log_pow(base, exponent as f64).exp();
        prop_assert!(approx_eq(direct, via_log, 1e-9), "{}^{}: {} vs {}", base, exponent, direct, via_log);
    }
}

// ============================================================================
// linspace
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn linspace_shape(lower in -10.0..10.0f64, width in 0.0..10.0f64, n in 2usize..2000) {
        let upper = lower + width;
        let grid = linspace(lower, upper, n);
        prop_assert_eq!(grid.len(), n);
        prop_assert_eq!(grid[0], lower);
        prop_assert_eq!(grid[n - 1], upper);
        for pair in grid.windows(2) {
            prop_assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn unit_grid_stays_in_unit_interval(n in 1usize..5000) {
        for theta in GridSpec::unit(n).build() {
            prop_assert!((0.0..=1.0).contains(&theta));
        }
    }
}

// ============================================================================
// Beta distribution
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn beta_cdf_monotone(x in 0.0..1.0f64, dx in 0.0..0.5f64, heads in 0u64..50, tails in 0u64..50) {
        let post = posterior_params(&BetaParams::uniform(), heads, heads + tails).unwrap();
        let lo = beta_cdf(x, post.alpha, post.beta);
        let hi = beta_cdf((x + dx).min(1.0), post.alpha, post.beta);
        prop_assert!(lo <= hi + 1e-6, "cdf({})={} > cdf({})={}", x, lo, x + dx, hi);
        prop_assert!((-1e-6..=1.0 + 1e-6).contains(&hi));
    }

    #[test]
    fn beta_inv_cdf_inverts(p in 0.01..0.99f64, heads in 0u64..30, tails in 0u64..30) {
        let post = posterior_params(&BetaParams::uniform(), heads, heads + tails).unwrap();
        let x = beta_inv_cdf(p, post.alpha, post.beta);
        prop_assert!(approx_eq(beta_cdf(x, post.alpha, post.beta), p, 1e-5));
    }
}
