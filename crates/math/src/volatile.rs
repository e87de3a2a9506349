//! # Exponential Curve
//!
//! Oracle-anchored curve for uncorrelated pairs:
//! `Δy = reserve_y · (1 - e^(-amount·p / reserve_y))`.

use crate::error::CurveResult;
use crate::pool::{cap_output, check_amount, Pool};

/// Amount of Y received for selling `amount_x` of X
pub fn swap_x_to_y_volatile(amount_x: f64, pool: &Pool) -> CurveResult<f64> {
    check_amount(amount_x)?;
    pool.validate()?;
    if amount_x <= 0.0 {
        return Ok(0.0);
    }

    let exponent = (amount_x * pool.oracle_price()) / (pool.reserve_y * pool.decimal_scale());
    let delta_y = pool.reserve_y * (1.0 - (-exponent).exp());

    Ok(cap_output(delta_y, pool.reserve_y))
}

/// Amount of X received for selling `amount_y` of Y
pub fn swap_y_to_x_volatile(amount_y: f64, pool: &Pool) -> CurveResult<f64> {
    check_amount(amount_y)?;
    pool.validate()?;
    if amount_y <= 0.0 {
        return Ok(0.0);
    }

    let exponent = (amount_y * pool.decimal_scale()) / (pool.reserve_x * pool.oracle_price());
    let delta_x = pool.reserve_x * (1.0 - (-exponent).exp());

    Ok(cap_output(delta_x, pool.reserve_x))
}
