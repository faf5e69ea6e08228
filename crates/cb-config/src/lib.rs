//! coin-bias configuration loading and validation.
//!
//! This crate provides:
//! - Typed settings for the estimator, input data, and rendering
//! - Config file resolution (CLI → env → XDG → defaults)
//! - Semantic validation of settings

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{load_settings, resolve_config_path, ConfigSource, ResolvedSettings};
pub use settings::{DataSettings, EstimatorSettings, RenderSettings, Settings};
pub use validate::{validate_settings, ValidationError, ValidationResult};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<ConfigError> for cb_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation(ValidationError::InvalidValue { field, message }) => {
                cb_common::Error::InvalidConfig { field, message }
            }
            other => cb_common::Error::Config(other.to_string()),
        }
    }
}
