//! # Volatility Estimation
//!
//! Exponentially weighted moving average of squared returns:
//!
//! ```text
//! σ²[0] = seed (default r[0]²)
//! σ²[t] = λ·σ²[t-1] + (1-λ)·r[t-1]²
//! ```
//!
//! The variance at step `t` only uses information up to `t-1`.

/// Variance series for `returns`, one entry per return.
///
/// `lambda` is not range-checked here; use
/// [`EwmaParams`](crate::config::EwmaParams) for validated input.
pub fn calculate_ewma_volatility(
    returns: &[f64],
    lambda: f64,
    initial_variance: Option<f64>,
) -> Vec<f64> {
    let mut estimator = EwmaEstimator::new(lambda, initial_variance);
    returns.iter().map(|&r| estimator.update(r)).collect()
}

/// Square root of each variance
pub fn variances_to_volatility(variances: &[f64]) -> Vec<f64> {
    variances.iter().map(|v| v.sqrt()).collect()
}

/// Incremental form of [`calculate_ewma_volatility`], fed one return at a time
#[derive(Debug, Clone, PartialEq)]
pub struct EwmaEstimator {
    lambda: f64,
    seed: Option<f64>,
    variance: Option<f64>,
    last_return: f64,
}

impl EwmaEstimator {
    pub fn new(lambda: f64, initial_variance: Option<f64>) -> Self {
        Self {
            lambda,
            seed: initial_variance,
            variance: None,
            last_return: 0.0,
        }
    }

    /// Record the return for the current step and get its variance estimate
    pub fn update(&mut self, ret: f64) -> f64 {
        let variance = match self.variance {
            None => self.seed.unwrap_or(ret * ret),
            Some(prev) => {
                self.lambda * prev + (1.0 - self.lambda) * self.last_return * self.last_return
            }
        };

        self.variance = Some(variance);
        self.last_return = ret;
        variance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_returns() {
        assert!(calculate_ewma_volatility(&[], 0.94, None).is_empty());
        assert!(calculate_ewma_volatility(&[], 0.94, Some(0.1)).is_empty());
    }

    #[test]
    fn test_reference_values() {
        let v = calculate_ewma_volatility(&[0.01, -0.02, 0.015], 0.94, None);
        assert_eq!(v.len(), 3);
        assert_abs_diff_eq!(v[0], 0.0001, epsilon = 1e-12);
        assert_abs_diff_eq!(v[1], 0.94 * 0.0001 + 0.06 * 0.0001, epsilon = 1e-12);
        assert_abs_diff_eq!(v[2], 0.94 * v[1] + 0.06 * 0.0004, epsilon = 1e-12);
    }

    #[test]
    fn test_seeded_first_variance() {
        let v = calculate_ewma_volatility(&[0.05, 0.01], 0.9, Some(0.0004));
        assert_eq!(v[0], 0.0004);
        assert_abs_diff_eq!(v[1], 0.9 * 0.0004 + 0.1 * 0.0025, epsilon = 1e-12);
    }

    #[test]
    fn test_last_return_does_not_affect_series() {
        let a = calculate_ewma_volatility(&[0.01, 0.02, 0.03], 0.94, None);
        let b = calculate_ewma_volatility(&[0.01, 0.02, 0.9], 0.94, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_estimator_state() {
        let mut est = EwmaEstimator::new(0.94, None);
        assert_abs_diff_eq!(est.update(-0.03).sqrt(), 0.03, epsilon = 1e-12);
        // The second step still weights the first return
        assert_abs_diff_eq!(est.update(0.5), 0.0009, epsilon = 1e-12);
    }
}
