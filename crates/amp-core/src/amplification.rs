//! # Amplification Mapping
//!
//! `A = a_max - (a_max - a_min) · sigmoid(steepness · (σ - threshold))`
//!
//! Calm markets push A towards `a_max` (flat curve, low slippage); volatile
//! markets push it towards `a_min` (curved, protective).

use serde::{Deserialize, Serialize};
use dynamic_amp_math::linspace;

use crate::config::AmpParams;
use crate::errors::AmpResult;

/// Logistic position of `volatility` relative to `threshold`, in (0, 1).
/// Exactly 0.5 at the threshold.
pub fn normalize_volatility(volatility: f64, threshold: f64, steepness: f64) -> f64 {
    1.0 / (1.0 + (-steepness * (volatility - threshold)).exp())
}

/// Amplification factor for `volatility`, non-increasing in volatility.
///
/// Bounded by `[a_min, a_max]` when `a_min <= a_max`. Inverted bounds give the
/// bare formula and a NaN volatility yields NaN.
pub fn calculate_dynamic_amp_factor(
    volatility: f64,
    a_min: f64,
    a_max: f64,
    threshold: f64,
    steepness: f64,
) -> f64 {
    let norm_vol = normalize_volatility(volatility, threshold, steepness);
    let raw = a_max - (a_max - a_min) * norm_vol;
    if raw.is_nan() || a_min > a_max {
        return raw;
    }
    // Rounding in the subtraction can land an ulp outside the bounds
    raw.clamp(a_min, a_max)
}

/// One sample of an A-vs-volatility curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmpPoint {
    pub volatility: f64,
    pub amp_factor: f64,
}

/// A sampled at `points` evenly spaced volatilities over `[0, max_volatility]`
pub fn amp_curve(params: &AmpParams, max_volatility: f64, points: usize) -> AmpResult<Vec<AmpPoint>> {
    params.validate()?;
    log::debug!(
        "Sampling A curve: {} points over [0, {}] (threshold {}, steepness {})",
        points,
        max_volatility,
        params.threshold,
        params.steepness
    );

    Ok(linspace(0.0, max_volatility, points)
        .into_iter()
        .map(|volatility| AmpPoint {
            volatility,
            amp_factor: params.amp_factor(volatility),
        })
        .collect())
}
