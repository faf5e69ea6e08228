//! Stdout payloads for an estimation run.
//!
//! - JSON: the full report, grid and posterior included
//! - Markdown: summary table
//! - Summary: one line

use cb_common::{Method, Observations, Result, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::estimator::{Estimator, PosteriorEstimate};
use crate::summary::PosteriorSummary;

#[derive(Debug, Clone, Serialize)]
pub struct ObservationsReport {
    pub flips: Vec<u8>,
    pub heads: usize,
    pub tails: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridReport {
    pub points: usize,
    pub lower: f64,
    pub upper: f64,
    pub method: Method,
}

/// Machine-readable result of one run.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub schema_version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub run_id: String,
    pub observations: ObservationsReport,
    pub grid: GridReport,
    pub summary: PosteriorSummary,
    pub theta: Vec<f64>,
    pub posterior: Vec<f64>,
}

impl EstimateReport {
    pub fn new(
        run_id: impl Into<String>,
        data: &Observations,
        estimator: &Estimator,
        estimate: &PosteriorEstimate,
        summary: PosteriorSummary,
    ) -> Self {
        let grid = estimator.grid();
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            run_id: run_id.into(),
            observations: ObservationsReport {
                flips: data.to_bits(),
                heads: data.heads(),
                tails: data.tails(),
            },
            grid: GridReport {
                points: estimate.len(),
                lower: grid.lower,
                upper: grid.upper,
                method: estimator.method(),
            },
            summary,
            theta: estimate.theta().to_vec(),
            posterior: estimate.mass().to_vec(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}"))
}

/// Markdown summary table.
pub fn render_markdown(summary: &PosteriorSummary) -> String {
    let s = summary;
    let c = &s.conjugate;
    let pct = s.credible.level * 100.0;
    let mut out = String::new();
    out.push_str("# Posterior Distribution of Coin Bias\n\n");
    out.push_str(&format!(
        "Observations: {} flips ({} heads, {} tails) on a {}-point grid.\n\n",
        s.flips, s.heads, s.tails, s.grid_points
    ));
    out.push_str("| Statistic | Grid | Beta reference |\n");
    out.push_str("|---|---|---|\n");
    out.push_str(&format!(
        "| MAP | {:.4} | {} |\n",
        s.map_theta,
        fmt_opt(c.mode)
    ));
    out.push_str(&format!("| Mean | {:.4} | {:.4} |\n", s.mean, c.mean));
    out.push_str(&format!("| Std dev | {:.4} | {:.4} |\n", s.std_dev, c.std_dev));
    out.push_str(&format!(
        "| {pct:.0}% interval | [{:.4}, {:.4}] | [{:.4}, {:.4}] |\n",
        s.credible.lower, s.credible.upper, c.credible.lower, c.credible.upper
    ));
    out.push_str(&format!("| MLE | {} | |\n", fmt_opt(s.mle)));
    out.push_str(&format!(
        "\nReference posterior: Beta({}, {}).\n",
        c.alpha, c.beta
    ));
    out
}

/// One-line summary.
pub fn summary_line(summary: &PosteriorSummary) -> String {
    let s = summary;
    format!(
        "n={} heads={} tails={} map={:.4} mean={:.4} {:.0}%=[{:.4}, {:.4}]",
        s.flips,
        s.heads,
        s.tails,
        s.map_theta,
        s.mean,
        s.credible.level * 100.0,
        s.credible.lower,
        s.credible.upper
    )
}
