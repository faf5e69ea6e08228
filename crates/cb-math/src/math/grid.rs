//! Evenly spaced evaluation grids.
//!
//! Grids follow the closed-interval convention: both endpoints are included
//! exactly, so a unit grid always evaluates θ = 0 and θ = 1.

use serde::{Deserialize, Serialize};

/// Default number of grid points for the bias grid.
pub const DEFAULT_GRID_POINTS: usize = 1000;

/// Largest grid that will be materialized (80 MB of `f64` per sequence).
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Shape of an evenly spaced grid over `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of points (N).
    pub points: usize,
    /// First grid value.
    pub lower: f64,
    /// Last grid value.
    pub upper: f64,
}

impl GridSpec {
    /// Grid over the unit interval with `points` values.
    pub fn unit(points: usize) -> Self {
        Self {
            points,
            lower: 0.0,
            upper: 1.0,
        }
    }

    /// Distance between neighbouring points (0 for grids with < 2 points).
    pub fn spacing(&self) -> f64 {
        if self.points < 2 {
            return 0.0;
        }
        (self.upper - self.lower) / (self.points - 1) as f64
    }

    /// Materialize the grid values.
    pub fn build(&self) -> Vec<f64> {
        linspace(self.lower, self.upper, self.points)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::unit(DEFAULT_GRID_POINTS)
    }
}

/// `n` evenly spaced values from `lower` to `upper`, endpoints included.
///
/// `n == 0` yields an empty vector and `n == 1` yields `[lower]`.
///
/// ```
/// use cb_math::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(lower: f64, upper: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lower],
        _ => {
            let step = (upper - lower) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| lower + step * i as f64).collect();
            // Accumulated rounding must not move the closing endpoint.
            values[n - 1] = upper;
            values
        }
    }
}
