//! coin-bias core library.
//!
//! Estimates the posterior distribution of a coin's bias θ from a sequence
//! of flips by grid approximation:
//! - `estimator`: uniform prior, binomial likelihood, grid normalization
//! - `summary`: MAP, mean, credible interval, conjugate Beta reference
//! - `render`: chart description plus terminal and SVG sinks
//! - `report`: JSON / Markdown / one-line payloads for the CLI
//! - `logging`: stderr tracing setup
//! - `exit_codes`: stable process exit codes

pub mod estimator;
pub mod exit_codes;
pub mod logging;
pub mod render;
pub mod report;
pub mod summary;

pub use estimator::{Estimator, PosteriorEstimate};
pub use summary::{summarize, PosteriorSummary};
