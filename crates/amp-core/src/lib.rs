//! # Dynamic Amplification Core
//!
//! Maps short-term market volatility to the amplification factor of a
//! stable-swap curve:
//!
//! - EWMA variance estimation over a return series
//! - Sigmoid mapping from volatility to a bounded amplification factor
//! - Validated configuration for both stages
//! - Scenario records tying price, return, volatility and A together

pub mod amplification;
pub mod config;
pub mod constants;
pub mod errors;
pub mod scenario;
pub mod volatility;

// Re-export commonly used items
pub use amplification::{amp_curve, calculate_dynamic_amp_factor, normalize_volatility, AmpPoint};
pub use config::{AmpParams, DynamicAmpConfig, EwmaParams};
pub use constants::*;
pub use errors::{AmpError, AmpResult};
pub use scenario::{Scenario, ScenarioRecord};
pub use volatility::{calculate_ewma_volatility, variances_to_volatility, EwmaEstimator};
