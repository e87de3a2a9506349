//! Error types for the analyzer

use dynamic_amp_core::AmpError;
use dynamic_amp_math::CurveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config file error: {0}")]
    ConfigFile(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Empty scenario: {0}")]
    EmptyScenario(String),

    #[error(transparent)]
    Model(#[from] AmpError),

    #[error(transparent)]
    Pricing(#[from] CurveError),
}

/// Result type using analyzer errors
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

impl From<std::io::Error> for AnalyzerError {
    fn from(err: std::io::Error) -> Self {
        AnalyzerError::ConfigFile(err.to_string())
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        AnalyzerError::SerializationError(err.to_string())
    }
}
