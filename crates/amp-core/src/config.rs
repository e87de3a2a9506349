//! # Model Configuration
//!
//! Validated parameter sets for the volatility estimator and the
//! amplification mapping. Every struct deserializes with defaults for missing
//! fields so partial configuration files are accepted.

use serde::{Deserialize, Serialize};

use crate::amplification::calculate_dynamic_amp_factor;
use crate::constants::*;
use crate::errors::{AmpError, AmpResult};
use crate::volatility::{calculate_ewma_volatility, variances_to_volatility};

/// EWMA estimator settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EwmaParams {
    /// Decay factor λ, weight of the previous variance
    pub lambda: f64,

    /// Seed for the first variance; the first squared return when absent
    pub initial_variance: Option<f64>,
}

/// Sigmoid mapping from volatility to amplification factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmpParams {
    pub a_min: f64,
    pub a_max: f64,
    /// Volatility at the sigmoid midpoint
    pub threshold: f64,
    pub steepness: f64,
}

/// Full model configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicAmpConfig {
    pub ewma: EwmaParams,
    pub amp: AmpParams,
}

impl Default for EwmaParams {
    fn default() -> Self {
        Self {
            lambda: DEFAULT_LAMBDA,
            initial_variance: None,
        }
    }
}

impl Default for AmpParams {
    fn default() -> Self {
        Self {
            a_min: DEFAULT_A_MIN,
            a_max: DEFAULT_A_MAX,
            threshold: DEFAULT_THRESHOLD,
            steepness: DEFAULT_STEEPNESS,
        }
    }
}

impl EwmaParams {
    pub fn new(lambda: f64, initial_variance: Option<f64>) -> AmpResult<Self> {
        let params = Self {
            lambda,
            initial_variance,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validate estimator settings
    pub fn validate(&self) -> AmpResult<()> {
        if !self.lambda.is_finite() || self.lambda <= 0.0 || self.lambda >= 1.0 {
            return Err(AmpError::invalid_parameter(
                "lambda",
                self.lambda,
                "a value strictly between 0 and 1",
            ));
        }

        if let Some(seed) = self.initial_variance {
            if !seed.is_finite() || seed < 0.0 {
                return Err(AmpError::invalid_parameter(
                    "initial_variance",
                    seed,
                    "a finite non-negative variance",
                ));
            }
        }

        Ok(())
    }

    /// Variance series for `returns`
    pub fn estimate(&self, returns: &[f64]) -> AmpResult<Vec<f64>> {
        self.validate()?;
        Ok(calculate_ewma_volatility(
            returns,
            self.lambda,
            self.initial_variance,
        ))
    }
}

impl AmpParams {
    pub fn new(a_min: f64, a_max: f64, threshold: f64, steepness: f64) -> AmpResult<Self> {
        let params = Self {
            a_min,
            a_max,
            threshold,
            steepness,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validate mapping bounds and sigmoid shape
    pub fn validate(&self) -> AmpResult<()> {
        if !self.a_min.is_finite() || self.a_min <= 0.0 {
            return Err(AmpError::invalid_parameter(
                "a_min",
                self.a_min,
                "a finite positive amplification factor",
            ));
        }

        if !self.a_max.is_finite() || self.a_max <= self.a_min {
            return Err(AmpError::invalid_parameter(
                "a_max",
                self.a_max,
                &format!("a finite value greater than a_min ({})", self.a_min),
            ));
        }

        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(AmpError::invalid_parameter(
                "threshold",
                self.threshold,
                "a finite non-negative volatility",
            ));
        }

        if !self.steepness.is_finite() || self.steepness <= 0.0 {
            return Err(AmpError::invalid_parameter(
                "steepness",
                self.steepness,
                "a finite positive value",
            ));
        }

        Ok(())
    }

    /// Amplification factor for `volatility`
    pub fn amp_factor(&self, volatility: f64) -> f64 {
        calculate_dynamic_amp_factor(
            volatility,
            self.a_min,
            self.a_max,
            self.threshold,
            self.steepness,
        )
    }
}

impl DynamicAmpConfig {
    /// Validate both parameter sets
    pub fn validate(&self) -> AmpResult<()> {
        self.ewma.validate()?;
        self.amp.validate()?;
        Ok(())
    }

    /// Volatility (standard deviation) series for `returns`
    pub fn volatility_series(&self, returns: &[f64]) -> AmpResult<Vec<f64>> {
        let variances = self.ewma.estimate(returns)?;
        Ok(variances_to_volatility(&variances))
    }

    /// Amplification factor per return, aligned by index
    pub fn amp_series(&self, returns: &[f64]) -> AmpResult<Vec<f64>> {
        self.amp.validate()?;
        Ok(self
            .volatility_series(returns)?
            .into_iter()
            .map(|vol| self.amp.amp_factor(vol))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = DynamicAmpConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ewma.lambda, 0.94);
        assert_eq!(config.amp.a_min, 1.0);
        assert_eq!(config.amp.a_max, 100.0);
        assert_eq!(config.amp.threshold, 0.02);
        assert_eq!(config.amp.steepness, 10.0);
    }

    #[test]
    fn test_lambda_validation() {
        assert!(EwmaParams::new(0.0, None).is_err());
        assert!(EwmaParams::new(1.0, None).is_err());
        assert!(EwmaParams::new(f64::NAN, None).is_err());
        assert!(EwmaParams::new(0.5, Some(-1.0)).is_err());
        assert!(EwmaParams::new(0.97, Some(0.0004)).is_ok());
    }

    #[test]
    fn test_amp_bounds_validation() {
        assert!(AmpParams::new(100.0, 1.0, 0.02, 10.0).is_err());
        assert!(AmpParams::new(10.0, 10.0, 0.02, 10.0).is_err());
        assert!(AmpParams::new(0.0, 10.0, 0.02, 10.0).is_err());
        assert!(AmpParams::new(1.0, 100.0, -0.01, 10.0).is_err());
        assert!(AmpParams::new(1.0, 100.0, 0.02, 0.0).is_err());
        assert!(AmpParams::new(1.0, 100.0, 0.02, f64::INFINITY).is_err());

        let err = AmpParams::new(5.0, 2.0, 0.02, 10.0).unwrap_err();
        assert!(err.to_string().contains("a_max"));
    }

    #[test]
    fn test_estimate_rejects_invalid_lambda() {
        let params = EwmaParams {
            lambda: 1.2,
            initial_variance: None,
        };
        assert!(params.estimate(&[0.01, 0.02]).is_err());
    }

    #[test]
    fn test_amp_series_alignment() {
        let config = DynamicAmpConfig::default();
        let returns = [0.01, -0.02, 0.015, 0.0];
        let vols = config.volatility_series(&returns).unwrap();
        let amps = config.amp_series(&returns).unwrap();

        assert_eq!(vols.len(), returns.len());
        assert_eq!(amps.len(), returns.len());
        assert_relative_eq!(vols[0], 0.01, epsilon = 1e-12);
        for (vol, amp) in vols.iter().zip(&amps) {
            assert_eq!(*amp, config.amp.amp_factor(*vol));
        }
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: DynamicAmpConfig =
            serde_json::from_str(r#"{ "amp": { "a_max": 200.0 } }"#).unwrap();
        assert_eq!(config.amp.a_max, 200.0);
        assert_eq!(config.amp.a_min, DEFAULT_A_MIN);
        assert_eq!(config.ewma.lambda, DEFAULT_LAMBDA);
    }
}
