//! Exit codes for the coin-bias CLI.
//!
//! Exit code ranges:
//! - 0: success
//! - 10-19: user/environment errors (fix the input or config)
//! - 20-29: internal, I/O and rendering errors

use cb_common::{Error, ErrorCategory};

/// Process exit codes. Stable contract for scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid command-line arguments
    ArgsError = 10,

    /// Observation data rejected
    InputError = 11,

    /// Configuration invalid (file, flags, or grid shape)
    ConfigError = 12,

    /// Posterior could not be normalized
    NumericError = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,

    /// Chart could not be drawn
    RenderError = 22,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::InputError => "ERR_INPUT",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::NumericError => "ERR_NUMERIC",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
            ExitCode::RenderError => "ERR_RENDER",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match (err.category(), err) {
            (_, Error::Json(_)) => ExitCode::InternalError,
            (ErrorCategory::Input, _) => ExitCode::InputError,
            (ErrorCategory::Config, _) => ExitCode::ConfigError,
            (ErrorCategory::Numeric, _) => ExitCode::NumericError,
            (ErrorCategory::Render, _) => ExitCode::RenderError,
            (ErrorCategory::Io, _) => ExitCode::IoError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
