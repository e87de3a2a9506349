//! # Error Types
//!
//! Failures of the amplification pipeline. Pricing failures from the curve
//! crate are wrapped without alteration so callers see the original cause.

use dynamic_amp_math::CurveError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmpError {
    /// A configuration value outside its valid domain
    #[error("Invalid parameter '{parameter}': got '{value}', expected {expected}")]
    InvalidParameter {
        parameter: String,
        value: String,
        expected: String,
    },

    #[error("Scenario index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Distribution error: {0}")]
    Distribution(String),

    #[error(transparent)]
    Pricing(#[from] CurveError),
}

/// Result type using amplification errors
pub type AmpResult<T> = Result<T, AmpError>;

impl AmpError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, value: impl ToString, expected: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}
