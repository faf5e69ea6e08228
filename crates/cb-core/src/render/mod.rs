//! Posterior chart description and output sinks.
//!
//! A [`Chart`] is a backend-neutral line plot: two parallel sequences plus
//! labels and styling. Sinks turn it into something visible:
//! - [`TerminalSink`]: ASCII line chart on any `io::Write`
//! - [`SvgSink`]: standalone SVG file

pub mod svg;
pub mod terminal;

pub use svg::{render_svg, SvgSink};
pub use terminal::TerminalSink;

use cb_common::{Error, Result};

use crate::estimator::PosteriorEstimate;

pub const POSTERIOR_TITLE: &str = "Posterior Distribution of Coin Bias (Theta)";
pub const POSTERIOR_X_LABEL: &str = "Theta (Coin Bias)";
pub const POSTERIOR_Y_LABEL: &str = "Probability Density";
pub const POSTERIOR_LEGEND: &str = "Posterior";
pub const POSTERIOR_COLOR: &str = "blue";

/// A single-series line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub legend: &'a str,
    /// CSS color name or hex code for the series.
    pub color: &'a str,
    pub x: &'a [f64],
    pub y: &'a [f64],
    /// Draw background grid lines.
    pub grid: bool,
}

impl<'a> Chart<'a> {
    /// The standard posterior plot for an estimate.
    pub fn posterior(estimate: &'a PosteriorEstimate) -> Self {
        Self {
            title: POSTERIOR_TITLE,
            x_label: POSTERIOR_X_LABEL,
            y_label: POSTERIOR_Y_LABEL,
            legend: POSTERIOR_LEGEND,
            color: POSTERIOR_COLOR,
            x: estimate.theta(),
            y: estimate.mass(),
            grid: true,
        }
    }

    /// Check the series can be drawn.
    pub fn validate(&self) -> Result<()> {
        if self.x.len() != self.y.len() {
            return Err(Error::Render(format!(
                "series length mismatch: {} x values, {} y values",
                self.x.len(),
                self.y.len()
            )));
        }
        if self.x.is_empty() {
            return Err(Error::Render("nothing to plot".to_string()));
        }
        if let Some(bad) = self.x.iter().chain(self.y).find(|v| !v.is_finite()) {
            return Err(Error::Render(format!("non-finite value in series: {bad}")));
        }
        Ok(())
    }

    /// (min, max) of the x series, widened when all values coincide.
    pub fn x_range(&self) -> (f64, f64) {
        widen(min_max(self.x))
    }

    /// (0, max) of the y series; mass is never negative.
    pub fn y_range(&self) -> (f64, f64) {
        let (_, max) = min_max(self.y);
        widen((0.0, max.max(0.0)))
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

/// Something that can display a chart.
pub trait RenderSink {
    fn render(&mut self, chart: &Chart<'_>) -> Result<()>;
}
