//! Grid posterior estimation for a coin's bias.
//!
//! The estimator evaluates the unnormalized posterior at every point of an
//! evenly spaced grid and normalizes the result into a discrete probability
//! mass function. Everything here is a pure transformation of
//! (observations, grid); the CLI and renderers sit on top.
//!
//! Two evaluation methods are available:
//! - [`Method::Direct`]: `θ^heads · (1-θ)^tails`, divided by its sum.
//! - [`Method::Log`]: log posterior per point, normalized with log-sum-exp,
//!   for sequences long enough to underflow the direct product.

pub mod model;

pub use model::{likelihood, log_posterior, posterior, prior};

use cb_common::{Error, Method, Observations, Result};
use cb_config::Settings;
use cb_math::{log_sum_exp, GridSpec, MAX_GRID_POINTS};
use tracing::{debug, info};

/// Unnormalized posterior mass at every grid point.
pub fn unnormalized_posterior(data: &Observations, grid: &[f64]) -> Vec<f64> {
    grid.iter().map(|&theta| posterior(theta, data)).collect()
}

/// Normalized posterior over `grid` by direct evaluation.
///
/// Errors instead of returning NaN/Inf: an empty grid is
/// [`Error::EmptyGrid`], zero total mass is
/// [`Error::DegenerateNormalization`].
pub fn estimate_posterior(data: &Observations, grid: &[f64]) -> Result<Vec<f64>> {
    if grid.is_empty() {
        return Err(Error::EmptyGrid);
    }
    let mut mass = unnormalized_posterior(data, grid);
    normalize(&mut mass)?;
    Ok(mass)
}

/// Normalized posterior over `grid` computed in log space.
pub fn estimate_posterior_log(data: &Observations, grid: &[f64]) -> Result<Vec<f64>> {
    if grid.is_empty() {
        return Err(Error::EmptyGrid);
    }
    let logs: Vec<f64> = grid.iter().map(|&theta| log_posterior(theta, data)).collect();
    let log_total = log_sum_exp(&logs);
    if log_total == f64::NEG_INFINITY {
        return Err(Error::DegenerateNormalization { points: grid.len() });
    }
    if !log_total.is_finite() {
        return Err(Error::NumericalInstability(format!(
            "log normalizer is {log_total}"
        )));
    }
    Ok(logs.iter().map(|l| (l - log_total).exp()).collect())
}

/// Divide every entry by the total, in place.
pub fn normalize(mass: &mut [f64]) -> Result<()> {
    let total: f64 = mass.iter().sum();
    if !total.is_finite() {
        return Err(Error::NumericalInstability(format!(
            "posterior mass sums to {total}"
        )));
    }
    if total <= 0.0 {
        return Err(Error::DegenerateNormalization { points: mass.len() });
    }
    for m in mass.iter_mut() {
        *m /= total;
    }
    Ok(())
}

/// Normalized posterior on a grid, with the counts that produced it.
///
/// Exposes exactly two parallel sequences to renderers: [`theta`](Self::theta)
/// and [`mass`](Self::mass).
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorEstimate {
    theta: Vec<f64>,
    mass: Vec<f64>,
    heads: usize,
    tails: usize,
    method: Method,
}

impl PosteriorEstimate {
    /// Grid values.
    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    /// Normalized posterior mass, parallel to [`theta`](Self::theta).
    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    pub fn heads(&self) -> usize {
        self.heads
    }

    pub fn tails(&self) -> usize {
        self.tails
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    /// (θ, mass) pairs in grid order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.theta.iter().copied().zip(self.mass.iter().copied())
    }
}

/// Grid shape plus evaluation method.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Estimator {
    grid: GridSpec,
    method: Method,
}

impl Estimator {
    pub fn new(grid: GridSpec, method: Method) -> Self {
        Self { grid, method }
    }

    /// Estimator described by the `[estimator]` settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.grid_spec(), settings.estimator.method)
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Build the grid and estimate the posterior for `data`.
    ///
    /// Grids larger than [`MAX_GRID_POINTS`] are rejected before anything
    /// is allocated.
    pub fn estimate(&self, data: &Observations) -> Result<PosteriorEstimate> {
        if self.grid.points > MAX_GRID_POINTS {
            return Err(Error::InvalidConfig {
                field: "estimator.grid_points".to_string(),
                message: format!(
                    "must be at most {MAX_GRID_POINTS}, got {}",
                    self.grid.points
                ),
            });
        }
        let theta = self.grid.build();
        debug!(
            points = theta.len(),
            lower = self.grid.lower,
            upper = self.grid.upper,
            method = %self.method,
            "evaluating posterior on grid"
        );

        let mass = match self.method {
            Method::Direct => estimate_posterior(data, &theta),
            Method::Log => estimate_posterior_log(data, &theta),
        }?;

        info!(
            points = theta.len(),
            heads = data.heads(),
            tails = data.tails(),
            method = %self.method,
            "posterior estimated"
        );

        Ok(PosteriorEstimate {
            theta,
            mass,
            heads: data.heads(),
            tails: data.tails(),
            method: self.method,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(values: &[i64]) -> Observations {
        Observations::from_values(values).unwrap()
    }

    #[test]
    fn empty_grid_is_config_error() {
        assert!(matches!(
            estimate_posterior(&obs(&[1]), &[]),
            Err(Error::EmptyGrid)
        ));
        assert!(matches!(
            estimate_posterior_log(&obs(&[1]), &[]),
            Err(Error::EmptyGrid)
        ));
    }

    #[test]
    fn grid_outside_unit_interval_is_degenerate() {
        let grid = [1.5, 2.0, 2.5];
        assert!(matches!(
            estimate_posterior(&obs(&[1, 0]), &grid),
            Err(Error::DegenerateNormalization { points: 3 })
        ));
        assert!(matches!(
            estimate_posterior_log(&obs(&[1, 0]), &grid),
            Err(Error::DegenerateNormalization { points: 3 })
        ));
    }

    #[test]
    fn all_zero_likelihood_is_degenerate() {
        // Heads and tails both observed: the endpoints carry no mass.
        assert!(matches!(
            estimate_posterior(&obs(&[1, 0]), &[0.0, 1.0]),
            Err(Error::DegenerateNormalization { points: 2 })
        ));
    }

    #[test]
    fn normalize_rejects_non_finite_total() {
        let mut mass = vec![1.0, f64::INFINITY];
        assert!(matches!(
            normalize(&mut mass),
            Err(Error::NumericalInstability(_))
        ));
        let mut mass = vec![f64::NAN];
        assert!(normalize(&mut mass).is_err());
    }

    #[test]
    fn direct_underflow_recovered_in_log_space() {
        // 0.5^4000 underflows to 0 at every grid point.
        let mut values = vec![1; 2000];
        values.extend(std::iter::repeat(0).take(2000));
        let data = obs(&values);
        let grid = GridSpec::unit(101).build();

        assert!(matches!(
            estimate_posterior(&data, &grid),
            Err(Error::DegenerateNormalization { .. })
        ));
        let mass = estimate_posterior_log(&data, &grid).unwrap();
        let total: f64 = mass.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        let peak = mass
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| grid[i])
            .unwrap();
        assert!((peak - 0.5).abs() < 1e-12);
    }

    #[test]
    fn estimator_carries_counts_and_method() {
        let est = Estimator::new(GridSpec::unit(11), Method::Log)
            .estimate(&obs(&[1, 1, 0]))
            .unwrap();
        assert_eq!(est.len(), 11);
        assert_eq!(est.heads(), 2);
        assert_eq!(est.tails(), 1);
        assert_eq!(est.method(), Method::Log);
        assert_eq!(est.points().count(), 11);
    }

    #[test]
    fn estimator_from_default_settings() {
        let estimator = Estimator::from_settings(&Settings::default());
        assert_eq!(estimator.grid().points, 1000);
        assert_eq!(estimator.method(), Method::Direct);
    }

    #[test]
    fn oversized_grid_rejected_before_allocation() {
        let mut settings = Settings::default();
        settings.estimator.grid_points = usize::MAX;
        let err = Estimator::from_settings(&settings)
            .estimate(&Observations::default())
            .unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfig { ref field, .. } if field == "estimator.grid_points"),
            "{err}"
        );
    }
}
