//! # Parameter Studies
//!
//! A-vs-volatility curves over a grid of sigmoid thresholds and steepness
//! values, holding the A bounds fixed.

use serde::{Deserialize, Serialize};

use dynamic_amp_core::{amp_curve, AmpParams, AmpPoint, AmpResult};

pub const DEFAULT_THRESHOLDS: [f64; 3] = [0.01, 0.02, 0.05];
pub const DEFAULT_STEEPNESS_VALUES: [f64; 3] = [5.0, 10.0, 15.0];

/// A curve for one (threshold, steepness) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmpCurve {
    pub threshold: f64,
    pub steepness: f64,
    pub points: Vec<AmpPoint>,
}

impl AmpCurve {
    pub fn label(&self) -> String {
        format!("Threshold={}, Steepness={}", self.threshold, self.steepness)
    }

    /// A at the lowest sampled volatility
    pub fn calm_amp(&self) -> Option<f64> {
        self.points.first().map(|p| p.amp_factor)
    }

    /// A at the highest sampled volatility
    pub fn stressed_amp(&self) -> Option<f64> {
        self.points.last().map(|p| p.amp_factor)
    }
}

/// One curve per pair, thresholds outermost. Bounds come from `base`.
pub fn compare_parameters(
    base: &AmpParams,
    thresholds: &[f64],
    steepness_values: &[f64],
    max_volatility: f64,
    points: usize,
) -> AmpResult<Vec<AmpCurve>> {
    let mut curves = Vec::with_capacity(thresholds.len() * steepness_values.len());

    for &threshold in thresholds {
        for &steepness in steepness_values {
            let params = AmpParams {
                threshold,
                steepness,
                ..*base
            };
            curves.push(AmpCurve {
                threshold,
                steepness,
                points: amp_curve(&params, max_volatility, points)?,
            });
        }
    }

    Ok(curves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamic_amp_core::{AmpError, DEFAULT_CURVE_MAX_VOLATILITY, DEFAULT_CURVE_POINTS};

    #[test]
    fn test_default_grid() {
        let curves = compare_parameters(
            &AmpParams::default(),
            &DEFAULT_THRESHOLDS,
            &DEFAULT_STEEPNESS_VALUES,
            DEFAULT_CURVE_MAX_VOLATILITY,
            DEFAULT_CURVE_POINTS,
        )
        .unwrap();

        assert_eq!(curves.len(), 9);
        assert_eq!(curves[0].label(), "Threshold=0.01, Steepness=5");
        assert_eq!(curves[8].label(), "Threshold=0.05, Steepness=15");
        assert!(curves.iter().all(|c| c.points.len() == DEFAULT_CURVE_POINTS));
    }

    #[test]
    fn test_steeper_curves_fall_further() {
        let curves = compare_parameters(&AmpParams::default(), &[0.02], &[5.0, 15.0], 0.1, 50).unwrap();
        let gentle = curves[0].stressed_amp().unwrap();
        let steep = curves[1].stressed_amp().unwrap();
        assert!(steep < gentle);

        // Higher threshold keeps A high for longer
        let curves = compare_parameters(&AmpParams::default(), &[0.01, 0.05], &[10.0], 0.1, 50).unwrap();
        assert!(curves[1].calm_amp().unwrap() > curves[0].calm_amp().unwrap());
    }

    #[test]
    fn test_invalid_grid_value_rejected() {
        let err = compare_parameters(&AmpParams::default(), &[0.02], &[0.0], 0.1, 10).unwrap_err();
        assert!(matches!(err, AmpError::InvalidParameter { .. }));
    }
}
