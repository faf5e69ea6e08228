//! Typed settings for a coin-bias run.
//!
//! Every field has a built-in default, so an empty file (or no file at all)
//! reproduces the reference run: ten flips (8 heads, 2 tails) evaluated on
//! 1000 points over [0, 1].

use std::path::{Path, PathBuf};

use cb_common::{Method, Observations};
use cb_math::{GridSpec, DEFAULT_GRID_POINTS};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Root of the config file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub estimator: EstimatorSettings,
    pub data: DataSettings,
    pub render: RenderSettings,
}

/// `[estimator]`: grid shape and evaluation method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorSettings {
    /// Number of grid points (N).
    pub grid_points: usize,
    /// First grid value.
    pub grid_lower: f64,
    /// Last grid value.
    pub grid_upper: f64,
    /// Evaluation method.
    pub method: Method,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            grid_points: DEFAULT_GRID_POINTS,
            grid_lower: 0.0,
            grid_upper: 1.0,
            method: Method::Direct,
        }
    }
}

/// `[data]`: where the flips come from. At most one source may be set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataSettings {
    /// Inline flips (0 = tails, 1 = heads).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flips: Option<Vec<i64>>,
    /// Path to a text file of flips. A relative path loaded from a config
    /// file is taken relative to that file's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl DataSettings {
    fn rebase(&mut self, dir: &Path) {
        if let Some(file) = &self.file {
            if file.is_relative() {
                self.file = Some(dir.join(file));
            }
        }
    }
}

/// `[render]`: summary and chart parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Credible interval level in (0, 1).
    pub credible_level: f64,
    /// Terminal chart width in character cells.
    pub plot_width: usize,
    /// Terminal chart height in character cells.
    pub plot_height: usize,
    /// SVG width in pixels.
    pub svg_width: u32,
    /// SVG height in pixels.
    pub svg_height: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            credible_level: 0.95,
            plot_width: 72,
            plot_height: 20,
            // 10 x 6 inch figure at 100 dpi
            svg_width: 1000,
            svg_height: 600,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file (no semantic validation).
    ///
    /// A relative `data.file` is rebased onto the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let mut settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(dir) = path.parent() {
            settings.data.rebase(dir);
        }
        Ok(settings)
    }

    /// Render the settings back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Grid described by the `[estimator]` table.
    pub fn grid_spec(&self) -> GridSpec {
        GridSpec {
            points: self.estimator.grid_points,
            lower: self.estimator.grid_lower,
            upper: self.estimator.grid_upper,
        }
    }

    /// Observations selected by the `[data]` table.
    ///
    /// Validation rejects setting both sources; with neither, the default
    /// sequence is used. Invalid entries fail here, before any estimation.
    pub fn observations(&self) -> cb_common::Result<Observations> {
        if let Some(values) = &self.data.flips {
            return Observations::from_values(values);
        }
        if let Some(path) = &self.data.file {
            let content = std::fs::read_to_string(path)?;
            return Observations::parse(&content);
        }
        Ok(Observations::default())
    }
}
