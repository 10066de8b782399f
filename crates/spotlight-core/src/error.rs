#![forbid(unsafe_code)]

//! Construction-time errors.
//!
//! Every fallible operation in this crate happens while a channel table is
//! being built. Evaluation is total and never returns an error.

use thiserror::Error;

/// Convenience alias for construction results.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A structurally invalid configuration or layout measurement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("phase window is inverted or empty: start={start} end={end}")]
    InvertedWindow { start: f64, end: f64 },

    #[error("phase window must lie within [0, 1]: start={start} end={end}")]
    WindowOutOfRange { start: f64, end: f64 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} range is not representable: from={from} to={to}")]
    RangeOverflow { field: &'static str, from: f64, to: f64 },

    #[error("layout measurement {field} must be positive, got {value}")]
    DegenerateLayout { field: &'static str, value: f64 },

    #[error("scroll region is degenerate: {message}")]
    InvalidRegion { message: String },

    #[error("channel table could not be parsed: {message}")]
    Parse { message: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

/// Reject NaN and infinities for a named numeric input.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

/// Reject non-finite, zero, or negative layout measurements.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::DegenerateLayout { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(ensure_finite("from", 1.5), Ok(1.5));
    }

    #[test]
    fn nan_is_rejected_with_field_name() {
        let err = ensure_finite("to", f64::NAN).unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { field: "to", .. }));
    }

    #[test]
    fn zero_height_is_degenerate() {
        let err = ensure_positive("container_height", 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "layout measurement container_height must be positive, got 0"
        );
    }

    #[test]
    fn json_errors_map_to_parse() {
        let err: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
