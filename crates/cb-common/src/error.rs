//! Error types for coin-bias.
//!
//! Every failure is detected where it happens and reported before any
//! partial result reaches a renderer. Errors carry:
//! - Stable error codes for machine parsing
//! - Category classification for exit-code mapping
//! - Remediation hints for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! error: invalid observation at position 3: "2" (expected 0 or 1)
//! hint: Flips must be 0 (tails) or 1 (heads); H and T are also accepted.
//! ```
//!
//! # Machine-Facing Output
//!
//! ```json
//! {
//!   "code": 10,
//!   "category": "input",
//!   "message": "invalid observation at position 3: \"2\" (expected 0 or 1)",
//!   "context": { "index": 3, "value": "2" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for coin-bias operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Observation data errors.
    Input,
    /// Configuration errors (files, flags, grid shape).
    Config,
    /// Normalization and floating-point failures.
    Numeric,
    /// Chart rendering errors.
    Render,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Numeric => write!(f, "numeric"),
            ErrorCategory::Render => write!(f, "render"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for coin-bias.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (10-19)
    #[error("invalid observation at position {index}: {value:?} (expected 0 or 1)")]
    InvalidObservation { index: usize, value: String },

    // Configuration errors (20-29)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid value for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    #[error("grid has no points; nothing to normalize")]
    EmptyGrid,

    // Numeric errors (30-39)
    #[error("degenerate normalization: total posterior mass is zero over {points} grid points")]
    DegenerateNormalization { points: usize },

    #[error("numerical instability detected: {0}")]
    NumericalInstability(String),

    // Render errors (40-49)
    #[error("render failed: {0}")]
    Render(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an invalid-observation error from any displayable raw value.
    pub fn invalid_observation(index: usize, value: impl ToString) -> Self {
        Error::InvalidObservation {
            index,
            value: value.to_string(),
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Input errors
    /// - 20-29: Configuration errors
    /// - 30-39: Numeric errors
    /// - 40-49: Render errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidObservation { .. } => 10,
            Error::Config(_) => 20,
            Error::InvalidConfig { .. } => 21,
            Error::EmptyGrid => 22,
            Error::DegenerateNormalization { .. } => 30,
            Error::NumericalInstability(_) => 31,
            Error::Render(_) => 40,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and exit-code mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidObservation { .. } => ErrorCategory::Input,
            Error::Config(_) | Error::InvalidConfig { .. } | Error::EmptyGrid => {
                ErrorCategory::Config
            }
            Error::DegenerateNormalization { .. } | Error::NumericalInstability(_) => {
                ErrorCategory::Numeric
            }
            Error::Render(_) => ErrorCategory::Render,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::InvalidObservation { .. } => {
                "Flips must be 0 (tails) or 1 (heads); H and T are also accepted."
            }
            Error::Config(_) => {
                "Run 'coin-bias config validate' to check the config file syntax."
            }
            Error::InvalidConfig { .. } => {
                "Fix the named field in the config file or override it with the matching flag."
            }
            Error::EmptyGrid => "Use '--grid-points' with a value of at least 1.",
            Error::DegenerateNormalization { .. } => {
                "Make sure the grid overlaps [0, 1]. For long flip sequences use '--method log' to avoid underflow."
            }
            Error::NumericalInstability(_) => {
                "Retry with '--method log'. If persistent, report the input that triggers it."
            }
            Error::Render(_) => "Check the chart dimensions and the output path.",
            Error::Io(_) => "Check that the path exists and is writable.",
            Error::Json(_) => "Internal serialization failure; please report it.",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Remediation hint.
    pub hint: String,

    /// Additional structured context (e.g., offending index).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();
        match err {
            Error::InvalidObservation { index, value } => {
                context.insert("index".to_string(), serde_json::json!(index));
                context.insert("value".to_string(), serde_json::json!(value));
            }
            Error::InvalidConfig { field, .. } => {
                context.insert("field".to_string(), serde_json::json!(field));
            }
            Error::DegenerateNormalization { points } => {
                context.insert("grid_points".to_string(), serde_json::json!(points));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            hint: err.remediation().to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|_| format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_categories() {
        let cases = [
            (Error::invalid_observation(0, 2), 10, ErrorCategory::Input),
            (Error::Config("x".into()), 20, ErrorCategory::Config),
            (Error::EmptyGrid, 22, ErrorCategory::Config),
            (
                Error::DegenerateNormalization { points: 3 },
                30,
                ErrorCategory::Numeric,
            ),
            (Error::Render("x".into()), 40, ErrorCategory::Render),
        ];
        for (err, code, category) in cases {
            assert_eq!(err.code(), code, "{err}");
            assert_eq!(err.category(), category, "{err}");
            assert!(!err.remediation().is_empty());
        }
    }

    #[test]
    fn invalid_observation_message_names_position_and_value() {
        let err = Error::invalid_observation(3, 2);
        assert_eq!(
            err.to_string(),
            r#"invalid observation at position 3: "2" (expected 0 or 1)"#
        );
    }

    #[test]
    fn structured_error_carries_context() {
        let err = Error::invalid_observation(4, "x");
        let structured = StructuredError::from(&err);
        assert_eq!(structured.code, 10);
        assert_eq!(structured.context["index"], serde_json::json!(4));
        assert_eq!(structured.context["value"], serde_json::json!("x"));

        let json: serde_json::Value = serde_json::from_str(&structured.to_json_pretty()).unwrap();
        assert_eq!(json["category"], "input");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert_eq!(err.category(), ErrorCategory::Io);
    }
}
