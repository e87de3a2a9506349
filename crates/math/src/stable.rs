//! # Stable-Swap Curve
//!
//! Oracle-anchored stable-swap pricing. The fraction `z` of the output reserve
//! paid out for a normalised trade size `k` solves
//!
//! ```text
//! f(z) = (1 - 1/A)·z - (1/A)·ln(1 - z) - k = 0,    z ∈ (0, 1)
//! ```
//!
//! High `A` keeps `z ≈ k` (flat curve near the peg); `A = 1` degenerates to
//! the exponential curve `z = 1 - e^(-k)`.

use crate::error::{CurveError, CurveResult};
use crate::pool::{cap_output, check_amount, Pool};

/// Convergence tolerance on both |f(z)| and the Newton step
pub const NEWTON_TOLERANCE: f64 = 1e-10;

/// Iteration budget for the solver
pub const NEWTON_MAX_ITERATIONS: usize = 100;

/// Upper bound on the initial guess derived from the trade size
const INITIAL_GUESS_CAP: f64 = 0.99999;

/// Iterates are kept inside [Z_FLOOR, Z_CEIL]
const Z_FLOOR: f64 = 1e-5;
const Z_CEIL: f64 = 1.0 - f64::EPSILON;

const MIN_DERIVATIVE: f64 = 1e-10;

// ============================================================================
// Invariant
// ============================================================================

/// f(z) for the stable-swap invariant
pub fn invariant(z: f64, k: f64, amp: f64) -> f64 {
    (1.0 - 1.0 / amp) * z - (1.0 / amp) * (1.0 - z).ln() - k
}

/// f'(z) = 1 - 1/A + 1/(A·(1 - z))
pub fn invariant_derivative(z: f64, amp: f64) -> f64 {
    1.0 - 1.0 / amp + 1.0 / (amp * (1.0 - z))
}

fn check_amp(amp: f64) -> CurveResult<()> {
    if amp.is_finite() && amp > 0.0 {
        Ok(())
    } else {
        Err(CurveError::InvalidAmplification(amp))
    }
}

/// Solve f(z) = 0 by damped Newton-Raphson.
///
/// Guesses outside (0, 1) are replaced by `k / (1 - 1/A)` clamped into the
/// valid range. A step that would leave (0, 1) is halved and clamped. Hitting
/// the iteration budget is logged and the last iterate returned.
pub fn newton_raphson(k: f64, amp: f64, z_initial: f64) -> CurveResult<f64> {
    check_amp(amp)?;

    let mut z = if z_initial <= 0.0 || z_initial >= 1.0 || z_initial.is_nan() {
        let guess = k / (1.0 - 1.0 / amp);
        if guess.is_nan() {
            Z_FLOOR
        } else {
            guess.clamp(Z_FLOOR, Z_CEIL)
        }
    } else {
        z_initial
    };

    for _ in 0..NEWTON_MAX_ITERATIONS {
        let fx = invariant(z, k, amp);
        if fx.abs() < NEWTON_TOLERANCE {
            return Ok(z);
        }

        let fp = invariant_derivative(z, amp);
        if fp.abs() < MIN_DERIVATIVE {
            return Err(CurveError::SolverFailed { z, derivative: fp });
        }

        let step = fx / fp;
        let mut z_new = z - step;
        if z_new <= 0.0 || z_new >= 1.0 {
            z_new = (z - 0.5 * step).clamp(Z_FLOOR, Z_CEIL);
        }
        if !z_new.is_finite() {
            return Err(CurveError::SolverFailed { z, derivative: fp });
        }

        if (z_new - z).abs() < NEWTON_TOLERANCE {
            return Ok(z);
        }
        z = z_new;
    }

    log::warn!(
        "Newton-Raphson hit {} iterations without converging (k = {}, A = {}, z = {})",
        NEWTON_MAX_ITERATIONS,
        k,
        amp,
        z
    );
    Ok(z)
}

// ============================================================================
// Swaps
// ============================================================================

/// Amount of Y received for selling `amount_x` of X
pub fn swap_x_to_y_stable(amount_x: f64, pool: &Pool, amp: f64) -> CurveResult<f64> {
    check_amount(amount_x)?;
    check_amp(amp)?;
    pool.validate()?;
    if amount_x <= 0.0 {
        return Ok(0.0);
    }

    let k = (amount_x * pool.oracle_price()) / (pool.reserve_y * pool.decimal_scale());
    let z = newton_raphson(k, amp, k.min(INITIAL_GUESS_CAP))?;

    Ok(cap_output(z * pool.reserve_y, pool.reserve_y))
}

/// Amount of X received for selling `amount_y` of Y
pub fn swap_y_to_x_stable(amount_y: f64, pool: &Pool, amp: f64) -> CurveResult<f64> {
    check_amount(amount_y)?;
    check_amp(amp)?;
    pool.validate()?;
    if amount_y <= 0.0 {
        return Ok(0.0);
    }

    let k = (amount_y * pool.decimal_scale()) / (pool.reserve_x * pool.oracle_price());
    let z = newton_raphson(k, amp, k.min(INITIAL_GUESS_CAP))?;

    Ok(cap_output(z * pool.reserve_x, pool.reserve_x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{get_slippage, SwapDirection};
    use crate::volatile::swap_x_to_y_volatile;
    use approx::assert_relative_eq;

    fn balanced_pool() -> Pool {
        Pool::new(1000.0, 1000.0, 1.0, 1.0)
    }

    #[test]
    fn test_solution_satisfies_invariant() {
        for &(k, amp) in &[(0.01, 10.0), (0.05, 100.0), (0.5, 5.0), (2.0, 1.0), (0.3, 0.5)] {
            let z = newton_raphson(k, amp, k.min(0.99999)).unwrap();
            assert!(z > 0.0 && z < 1.0, "z = {} out of range for k = {}", z, k);
            assert!(invariant(z, k, amp).abs() < 1e-8, "k = {}, A = {}", k, amp);
        }
    }

    #[test]
    fn test_out_of_range_guess_is_replaced() {
        let z = newton_raphson(0.1, 10.0, 1.5).unwrap();
        assert!(invariant(z, 0.1, 10.0).abs() < 1e-8);
    }

    #[test]
    fn test_unit_amp_matches_exponential_curve() {
        let pool = balanced_pool();
        let stable = swap_x_to_y_stable(50.0, &pool, 1.0).unwrap();
        let volatile = swap_x_to_y_volatile(50.0, &pool).unwrap();
        assert_relative_eq!(stable, volatile, max_relative = 1e-8);
    }

    #[test]
    fn test_higher_amp_gives_more_output() {
        let pool = balanced_pool();
        let low = swap_x_to_y_stable(50.0, &pool, 5.0).unwrap();
        let mid = swap_x_to_y_stable(50.0, &pool, 10.0).unwrap();
        let high = swap_x_to_y_stable(50.0, &pool, 100.0).unwrap();
        assert!(low < mid && mid < high);
        // Never better than the oracle rate
        assert!(high < 50.0);
    }

    #[test]
    fn test_slippage_shrinks_with_amp() {
        let pool = balanced_pool();
        let out_low = swap_x_to_y_stable(10.0, &pool, 5.0).unwrap();
        let out_high = swap_x_to_y_stable(10.0, &pool, 100.0).unwrap();
        let s_low = get_slippage(10.0, out_low, &pool, SwapDirection::XToY).unwrap();
        let s_high = get_slippage(10.0, out_high, &pool, SwapDirection::XToY).unwrap();
        assert!(s_high > 0.0);
        assert!(s_high < s_low);
    }

    #[test]
    fn test_price_scales_output() {
        let pool = Pool::new(1000.0, 1000.0, 2.0, 1.0);
        let dy = swap_x_to_y_stable(1.0, &pool, 100.0).unwrap();
        assert_relative_eq!(dy, 2.0, max_relative = 1e-3);

        let dx = swap_y_to_x_stable(2.0, &pool, 100.0).unwrap();
        assert_relative_eq!(dx, 1.0, max_relative = 1e-3);
    }

    #[test]
    fn test_non_positive_amount_yields_zero() {
        let pool = balanced_pool();
        assert_eq!(swap_x_to_y_stable(0.0, &pool, 10.0).unwrap(), 0.0);
        assert_eq!(swap_y_to_x_stable(-5.0, &pool, 10.0).unwrap(), 0.0);
    }

    #[test]
    fn test_output_never_drains_reserve() {
        let pool = balanced_pool();
        let dy = swap_x_to_y_stable(1e9, &pool, 10.0).unwrap();
        assert!(dy < pool.reserve_y);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let pool = balanced_pool();
        assert_eq!(
            swap_x_to_y_stable(10.0, &pool, 0.0),
            Err(CurveError::InvalidAmplification(0.0))
        );
        assert!(matches!(
            swap_x_to_y_stable(10.0, &Pool::new(1000.0, 0.0, 1.0, 1.0), 10.0),
            Err(CurveError::InvalidReserve(_))
        ));
        assert!(matches!(
            swap_x_to_y_stable(f64::NAN, &pool, 10.0),
            Err(CurveError::InvalidAmount(_))
        ));
    }
}
