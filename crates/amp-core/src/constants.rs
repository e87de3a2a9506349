//! # Model Constants
//!
//! Default parameters of the volatility estimator and the amplification
//! mapping.

// ============================================================================
// Volatility Estimation
// ============================================================================

/// EWMA decay factor λ (RiskMetrics daily value)
pub const DEFAULT_LAMBDA: f64 = 0.94;

// ============================================================================
// Amplification Mapping
// ============================================================================

/// Lower bound of the amplification factor
pub const DEFAULT_A_MIN: f64 = 1.0;

/// Upper bound of the amplification factor
pub const DEFAULT_A_MAX: f64 = 100.0;

/// Volatility at which A sits halfway between its bounds (2%)
pub const DEFAULT_THRESHOLD: f64 = 0.02;

/// Sigmoid steepness around the threshold
pub const DEFAULT_STEEPNESS: f64 = 10.0;

/// Upper end of the volatility range used for A-curves (10%)
pub const DEFAULT_CURVE_MAX_VOLATILITY: f64 = 0.1;

/// Samples per A-curve
pub const DEFAULT_CURVE_POINTS: usize = 1000;
