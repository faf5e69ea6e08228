//! Posterior evaluation method.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How unnormalized posterior mass is evaluated on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// `θ^heads · (1-θ)^tails` evaluated directly, then divided by the sum.
    #[default]
    Direct,

    /// Log-likelihood per point, normalized with log-sum-exp.
    ///
    /// Survives sequences long enough for the direct product to underflow.
    #[value(alias = "log-space")]
    #[serde(alias = "log-space", alias = "logspace")]
    Log,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Direct => write!(f, "direct"),
            Method::Log => write!(f, "log"),
        }
    }
}
