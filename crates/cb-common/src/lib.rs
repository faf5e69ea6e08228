//! coin-bias common types and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - The validated observation sequence (coin flips)
//! - The unified error type with stable codes
//! - The posterior evaluation method selector
//! - Output format specifications
//! - Schema versioning for machine-readable output

pub mod error;
pub mod method;
pub mod observations;
pub mod output;

pub use error::{Error, ErrorCategory, Result};
pub use method::Method;
pub use observations::{Flip, Observations, DEFAULT_FLIPS};
pub use output::OutputFormat;

/// Schema version for JSON payloads.
pub const SCHEMA_VERSION: &str = "1.0.0";
