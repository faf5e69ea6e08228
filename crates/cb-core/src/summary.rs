//! Point estimates and intervals derived from a grid posterior.
//!
//! The discrete estimate is reported alongside the closed-form conjugate
//! posterior Beta(1 + heads, 1 + tails), which it should approach as the
//! grid gets denser.

use cb_common::{Error, Result};
use cb_math::bernoulli::{credible_interval, posterior_params, BetaParams};
use serde::Serialize;

use crate::estimator::PosteriorEstimate;

/// Equal-tailed credible interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CredibleInterval {
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Closed-form posterior under the uniform prior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConjugateReference {
    pub alpha: f64,
    pub beta: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// Interior mode; absent unless both heads and tails were observed.
    pub mode: Option<f64>,
    pub credible: CredibleInterval,
}

/// Summary statistics of a posterior estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosteriorSummary {
    pub flips: usize,
    pub heads: usize,
    pub tails: usize,
    pub grid_points: usize,
    /// Grid point with the largest mass (first one on ties).
    pub map_theta: f64,
    pub map_mass: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub credible: CredibleInterval,
    /// heads / flips; absent when nothing was observed.
    pub mle: Option<f64>,
    pub conjugate: ConjugateReference,
}

fn check_level(level: f64) -> Result<()> {
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field: "render.credible_level".to_string(),
            message: format!("must be in (0, 1), got {level}"),
        })
    }
}

/// Equal-tailed interval read off the cumulative mass.
///
/// The bounds are the first grid points whose cumulative mass reaches
/// `(1 - level) / 2` and `1 - (1 - level) / 2`.
pub fn grid_credible_interval(estimate: &PosteriorEstimate, level: f64) -> Result<CredibleInterval> {
    check_level(level)?;
    let theta = estimate.theta();
    let last = *theta.last().ok_or(Error::EmptyGrid)?;
    let tail = (1.0 - level) / 2.0;

    let mut lower = None;
    let mut upper = None;
    let mut cumulative = 0.0;
    for (t, m) in estimate.points() {
        cumulative += m;
        if lower.is_none() && cumulative >= tail {
            lower = Some(t);
        }
        if cumulative >= 1.0 - tail {
            upper = Some(t);
            break;
        }
    }

    // Rounding can leave the running sum a hair under the upper target.
    Ok(CredibleInterval {
        level,
        lower: lower.unwrap_or(last),
        upper: upper.unwrap_or(last),
    })
}

/// Summarize an estimate at the given credible level.
pub fn summarize(estimate: &PosteriorEstimate, level: f64) -> Result<PosteriorSummary> {
    check_level(level)?;
    let (map_theta, map_mass) = estimate
        .points()
        .fold(None, |best: Option<(f64, f64)>, (t, m)| match best {
            Some((_, best_m)) if best_m >= m => best,
            _ => Some((t, m)),
        })
        .ok_or(Error::EmptyGrid)?;

    let mean: f64 = estimate.points().map(|(t, m)| t * m).sum();
    let variance: f64 = estimate
        .points()
        .map(|(t, m)| (t - mean) * (t - mean) * m)
        .sum();

    let heads = estimate.heads();
    let tails = estimate.tails();
    let flips = heads + tails;
    let mle = (flips > 0).then(|| heads as f64 / flips as f64);

    let conjugate = conjugate_reference(heads as u64, flips as u64, level)?;

    Ok(PosteriorSummary {
        flips,
        heads,
        tails,
        grid_points: estimate.len(),
        map_theta,
        map_mass,
        mean,
        std_dev: variance.max(0.0).sqrt(),
        credible: grid_credible_interval(estimate, level)?,
        mle,
        conjugate,
    })
}

fn conjugate_reference(heads: u64, flips: u64, level: f64) -> Result<ConjugateReference> {
    let params: BetaParams = posterior_params(&BetaParams::uniform(), heads, flips).ok_or_else(
        || Error::NumericalInstability(format!("inconsistent counts: {heads} heads in {flips} flips")),
    )?;
    let (lower, upper) = credible_interval(&params, level);
    Ok(ConjugateReference {
        alpha: params.alpha,
        beta: params.beta,
        mean: params.mean(),
        std_dev: params.variance().sqrt(),
        mode: params.mode(),
        credible: CredibleInterval {
            level,
            lower,
            upper,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::Estimator;
    use cb_common::{Method, Observations};
    use cb_math::GridSpec;

    fn estimate(values: &[i64], points: usize) -> PosteriorEstimate {
        let data = Observations::from_values(values).unwrap();
        Estimator::new(GridSpec::unit(points), Method::Direct)
            .estimate(&data)
            .unwrap()
    }

    #[test]
    fn reference_sequence_summary() {
        let est = estimate(&[1, 1, 1, 0, 1, 1, 0, 1, 1, 1], 1000);
        let s = summarize(&est, 0.95).unwrap();

        assert_eq!((s.flips, s.heads, s.tails), (10, 8, 2));
        assert!((s.map_theta - 0.8).abs() < 1.0 / 999.0, "map={}", s.map_theta);
        assert_eq!(s.mle, Some(0.8));
        // Grid mean tracks the Beta(9, 3) mean of 3/4.
        assert!((s.mean - 0.75).abs() < 1e-3, "mean={}", s.mean);
        assert!((s.conjugate.mean - 0.75).abs() < 1e-12);
        assert!((s.conjugate.mode.unwrap() - 0.8).abs() < 1e-12);
        assert!((s.std_dev - s.conjugate.std_dev).abs() < 1e-3);
        assert!((s.credible.lower - s.conjugate.credible.lower).abs() < 2e-3);
        assert!((s.credible.upper - s.conjugate.credible.upper).abs() < 2e-3);
        assert!(s.credible.lower < s.map_theta && s.map_theta < s.credible.upper);
    }

    #[test]
    fn empty_data_summary() {
        let est = estimate(&[], 5);
        let s = summarize(&est, 0.95).unwrap();
        assert_eq!(s.mle, None);
        assert_eq!(s.map_theta, 0.0); // first of equal masses
        assert!((s.mean - 0.5).abs() < 1e-12);
        assert_eq!(s.credible.lower, 0.0);
        assert_eq!(s.credible.upper, 1.0);
        assert_eq!(s.conjugate.mode, None);
    }

    #[test]
    fn single_head_on_three_points() {
        let est = estimate(&[1], 3);
        let s = summarize(&est, 0.5).unwrap();
        assert_eq!(s.map_theta, 1.0);
        assert!((s.map_mass - 2.0 / 3.0).abs() < 1e-12);
        // mean = 0.5 * 1/3 + 1.0 * 2/3
        assert!((s.mean - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn level_outside_unit_interval_rejected() {
        let est = estimate(&[1, 0], 11);
        for level in [0.0, 1.0, 1.5] {
            assert!(matches!(
                summarize(&est, level),
                Err(Error::InvalidConfig { .. })
            ));
        }
    }
}
