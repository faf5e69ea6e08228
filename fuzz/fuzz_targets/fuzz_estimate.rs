//! Fuzz target for grid estimation.
//!
//! Any grid and flip sequence either errors or yields finite, non-negative
//! mass summing to one.

#![no_main]

use arbitrary::Arbitrary;
use cb_common::{Flip, Method, Observations};
use cb_core::estimator::Estimator;
use cb_math::GridSpec;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    flips: Vec<bool>,
    points: u16,
    lower: f64,
    upper: f64,
    log_space: bool,
}

fuzz_target!(|input: Input| {
    let flips = input
        .flips
        .iter()
        .map(|&h| if h { Flip::Heads } else { Flip::Tails })
        .collect();
    let data = Observations::from_flips(flips);
    let grid = GridSpec {
        points: usize::from(input.points),
        lower: input.lower,
        upper: input.upper,
    };
    let method = if input.log_space { Method::Log } else { Method::Direct };

    if let Ok(estimate) = Estimator::new(grid, method).estimate(&data) {
        assert!(estimate.mass().iter().all(|m| m.is_finite() && *m >= 0.0));
        let total: f64 = estimate.mass().iter().sum();
        assert!((total - 1.0).abs() < 1e-6, "total = {total}");
    }
});
