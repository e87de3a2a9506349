//! # Pool Quotes
//!
//! Reserves, oracle prices and token decimals of a two-asset pool, plus the
//! slippage measure shared by every curve.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Direction of a swap through the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// Sell X, receive Y
    XToY,
    /// Sell Y, receive X
    YToX,
}

/// Snapshot of a pool used to price a single swap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    /// Reserve of token X
    pub reserve_x: f64,
    /// Reserve of token Y
    pub reserve_y: f64,
    /// Oracle price of X
    pub price_x: f64,
    /// Oracle price of Y
    pub price_y: f64,
    /// Decimals of token X
    pub decimals_x: i32,
    /// Decimals of token Y
    pub decimals_y: i32,
}

impl Pool {
    /// Pool with whole-unit tokens on both sides
    pub fn new(reserve_x: f64, reserve_y: f64, price_x: f64, price_y: f64) -> Self {
        Self {
            reserve_x,
            reserve_y,
            price_x,
            price_y,
            decimals_x: 0,
            decimals_y: 0,
        }
    }

    pub fn with_decimals(mut self, decimals_x: i32, decimals_y: i32) -> Self {
        self.decimals_x = decimals_x;
        self.decimals_y = decimals_y;
        self
    }

    /// Oracle price of X denominated in Y
    pub fn oracle_price(&self) -> f64 {
        self.price_x / self.price_y
    }

    /// 10^(decimals_x - decimals_y)
    pub fn decimal_scale(&self) -> f64 {
        10f64.powi(self.decimals_x - self.decimals_y)
    }

    /// Reject reserves and prices that cannot be priced
    pub fn validate(&self) -> CurveResult<()> {
        for reserve in [self.reserve_x, self.reserve_y] {
            if !reserve.is_finite() || reserve <= 0.0 {
                return Err(CurveError::InvalidReserve(reserve));
            }
        }
        for price in [self.price_x, self.price_y] {
            if !price.is_finite() || price <= 0.0 {
                return Err(CurveError::InvalidPrice(price));
            }
        }
        Ok(())
    }
}

/// Reject NaN and infinite trade sizes. Non-positive sizes are allowed and
/// price to zero output.
pub(crate) fn check_amount(amount: f64) -> CurveResult<()> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(CurveError::InvalidAmount(amount))
    }
}

/// Largest fraction of the output reserve a single swap may drain
pub const MAX_RESERVE_DRAIN: f64 = 0.999;

/// Clamp a computed output so the pool is never emptied
pub(crate) fn cap_output(delta: f64, reserve: f64) -> f64 {
    if delta >= reserve {
        reserve * MAX_RESERVE_DRAIN
    } else {
        delta
    }
}

/// Relative deviation of the executed rate from the oracle rate.
///
/// For `XToY` the executed rate is X paid per Y received and the reference is
/// `1 / oracle_price`; for `YToX` it is Y paid per X received against
/// `oracle_price`. Positive values mean the trader did worse than the oracle.
pub fn get_slippage(
    amount_x: f64,
    amount_y: f64,
    pool: &Pool,
    direction: SwapDirection,
) -> CurveResult<f64> {
    pool.validate()?;
    check_amount(amount_x)?;
    check_amount(amount_y)?;

    let p_o = pool.oracle_price();
    let units_x = amount_x / 10f64.powi(pool.decimals_x);
    let units_y = amount_y / 10f64.powi(pool.decimals_y);

    match direction {
        SwapDirection::XToY => {
            if units_y == 0.0 {
                return Err(CurveError::ZeroOutput);
            }
            let effective_price = units_x / units_y;
            let p_star = 1.0 / p_o;
            Ok((effective_price - p_star) / p_star)
        }
        SwapDirection::YToX => {
            if units_x == 0.0 {
                return Err(CurveError::ZeroOutput);
            }
            let effective_price = units_y / units_x;
            Ok((effective_price - p_o) / p_o)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_oracle_price_and_scale() {
        let pool = Pool::new(1000.0, 1000.0, 2.0, 1.0).with_decimals(9, 6);
        assert_eq!(pool.oracle_price(), 2.0);
        assert_relative_eq!(pool.decimal_scale(), 1000.0);
    }

    #[test]
    fn test_slippage_at_oracle_rate_is_zero() {
        // Pay 1 X for 2 Y when X is worth 2 Y
        let pool = Pool::new(1000.0, 1000.0, 2.0, 1.0);
        let s = get_slippage(1.0, 2.0, &pool, SwapDirection::XToY).unwrap();
        assert_relative_eq!(s, 0.0);

        let s = get_slippage(1.0, 2.0, &pool, SwapDirection::YToX).unwrap();
        assert_relative_eq!(s, 0.0);
    }

    #[test]
    fn test_slippage_sign() {
        let pool = Pool::new(1000.0, 1000.0, 1.0, 1.0);
        // Received less Y than the oracle promises
        let s = get_slippage(10.0, 9.0, &pool, SwapDirection::XToY).unwrap();
        assert_relative_eq!(s, 10.0 / 9.0 - 1.0);
        assert!(s > 0.0);
    }

    #[test]
    fn test_zero_output_rejected() {
        let pool = Pool::new(1000.0, 1000.0, 1.0, 1.0);
        assert_eq!(
            get_slippage(10.0, 0.0, &pool, SwapDirection::XToY),
            Err(CurveError::ZeroOutput)
        );
        assert_eq!(
            get_slippage(0.0, 10.0, &pool, SwapDirection::YToX),
            Err(CurveError::ZeroOutput)
        );
    }

    #[test]
    fn test_pool_validation() {
        assert!(Pool::new(0.0, 10.0, 1.0, 1.0).validate().is_err());
        assert!(Pool::new(10.0, 10.0, f64::NAN, 1.0).validate().is_err());
        assert!(Pool::new(10.0, 10.0, 1.0, -1.0).validate().is_err());
        assert!(Pool::new(10.0, 10.0, 1.0, 1.0).validate().is_ok());
    }
}
