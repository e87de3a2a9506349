//! # Curve Error Types
//!
//! Errors raised by the pricing functions when an amount, reserve or
//! parameter combination cannot be priced.

use thiserror::Error;

/// Pricing failures surfaced to callers unchanged
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Invalid reserve: {0} (must be positive and finite)")]
    InvalidReserve(f64),

    #[error("Invalid price: {0} (must be positive and finite)")]
    InvalidPrice(f64),

    #[error("Invalid amplification factor: {0} (must be positive and finite)")]
    InvalidAmplification(f64),

    #[error("Newton-Raphson failed: derivative {derivative:e} near zero at z = {z}")]
    SolverFailed { z: f64, derivative: f64 },

    #[error("Slippage undefined for zero output amount")]
    ZeroOutput,
}

/// Result type for curve operations
pub type CurveResult<T> = std::result::Result<T, CurveError>;
