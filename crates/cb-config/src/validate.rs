//! Semantic validation of settings.

use thiserror::Error;

use cb_math::MAX_GRID_POINTS;

use crate::settings::Settings;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Terminal charts smaller than this cannot show axes and a curve.
pub const MIN_PLOT_WIDTH: usize = 20;
pub const MIN_PLOT_HEIGHT: usize = 5;
pub const MIN_SVG_SIDE: u32 = 100;

/// Configuration validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("conflicting settings: {0}")]
    Conflict(String),
}

impl ValidationError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate settings semantically.
///
/// Observation values are not checked here; they are validated when the
/// observations are built so the error names the offending position.
pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    let est = &settings.estimator;

    if est.grid_points == 0 {
        return Err(ValidationError::invalid(
            "estimator.grid_points",
            "must be at least 1",
        ));
    }
    if est.grid_points > MAX_GRID_POINTS {
        return Err(ValidationError::invalid(
            "estimator.grid_points",
            format!("must be at most {MAX_GRID_POINTS}, got {}", est.grid_points),
        ));
    }
    for (field, value) in [
        ("estimator.grid_lower", est.grid_lower),
        ("estimator.grid_upper", est.grid_upper),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::invalid(
                field,
                format!("must be finite, got {value}"),
            ));
        }
    }
    if est.grid_lower > est.grid_upper {
        return Err(ValidationError::invalid(
            "estimator.grid_lower",
            format!(
                "must not exceed grid_upper ({} > {})",
                est.grid_lower, est.grid_upper
            ),
        ));
    }
    if est.grid_lower == est.grid_upper && est.grid_points > 1 {
        return Err(ValidationError::invalid(
            "estimator.grid_upper",
            "equals grid_lower; a zero-width grid needs grid_points = 1",
        ));
    }

    if settings.data.flips.is_some() && settings.data.file.is_some() {
        return Err(ValidationError::Conflict(
            "data.flips and data.file are mutually exclusive".to_string(),
        ));
    }

    let render = &settings.render;
    let level = render.credible_level;
    if !(level > 0.0 && level < 1.0) {
        return Err(ValidationError::invalid(
            "render.credible_level",
            format!("must be in (0, 1), got {level}"),
        ));
    }
    if render.plot_width < MIN_PLOT_WIDTH {
        return Err(ValidationError::invalid(
            "render.plot_width",
            format!("must be at least {MIN_PLOT_WIDTH}"),
        ));
    }
    if render.plot_height < MIN_PLOT_HEIGHT {
        return Err(ValidationError::invalid(
            "render.plot_height",
            format!("must be at least {MIN_PLOT_HEIGHT}"),
        ));
    }
    for (field, side) in [
        ("render.svg_width", render.svg_width),
        ("render.svg_height", render.svg_height),
    ] {
        if side < MIN_SVG_SIDE {
            return Err(ValidationError::invalid(
                field,
                format!("must be at least {MIN_SVG_SIDE}px"),
            ));
        }
    }

    Ok(())
}
