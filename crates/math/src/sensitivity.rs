//! # Pool Sensitivity
//!
//! How exponential-curve slippage responds to trade size and to the split of
//! a fixed total reserve between the two sides.

use serde::{Deserialize, Serialize};

use crate::error::CurveResult;
use crate::pool::{get_slippage, Pool, SwapDirection};
use crate::volatile::swap_x_to_y_volatile;

/// Trade sizes probed when the caller supplies none
pub const DEFAULT_SENSITIVITY_AMOUNTS: [f64; 7] = [1.0, 5.0, 10.0, 20.0, 30.0, 40.0, 50.0];

/// `n` evenly spaced samples over `[start, end]`, both ends included.
/// A single sample is `start`; zero samples is empty.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// One row of a sensitivity table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRow {
    pub initial_reserve_x: f64,
    pub initial_reserve_y: f64,
    pub amount_x: f64,
    pub delta_y: f64,
    pub new_reserve_x: f64,
    pub new_reserve_y: f64,
    /// X paid per Y received
    pub effective_price: f64,
    pub slippage_pct: f64,
}

/// Price each X amount against the same starting pool
pub fn swap_sensitivity(pool: &Pool, amounts_x: &[f64]) -> CurveResult<Vec<SensitivityRow>> {
    amounts_x
        .iter()
        .map(|&amount_x| {
            let delta_y = swap_x_to_y_volatile(amount_x, pool)?;
            let (effective_price, slippage_pct) = if amount_x > 0.0 && delta_y > 0.0 {
                let slippage = get_slippage(amount_x, delta_y, pool, SwapDirection::XToY)?;
                (amount_x / delta_y, slippage * 100.0)
            } else {
                (0.0, 0.0)
            };

            Ok(SensitivityRow {
                initial_reserve_x: pool.reserve_x,
                initial_reserve_y: pool.reserve_y,
                amount_x,
                delta_y,
                new_reserve_x: pool.reserve_x + amount_x,
                new_reserve_y: pool.reserve_y - delta_y,
                effective_price,
                slippage_pct,
            })
        })
        .collect()
}

/// Slippage grid indexed `[y_share][amount]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlippageSurface {
    /// Share of the total reserve held as Y, per row
    pub y_shares: Vec<f64>,
    /// X amount sold, per column
    pub amounts_x: Vec<f64>,
    /// Slippage in percent
    pub slippage_pct: Vec<Vec<f64>>,
}

/// Slippage for every (Y share, X amount) pair with `total_reserve` split
/// between X and Y. Shares must lie strictly inside (0, 1).
pub fn slippage_surface(
    y_shares: &[f64],
    amounts_x: &[f64],
    total_reserve: f64,
    price_x: f64,
    price_y: f64,
) -> CurveResult<SlippageSurface> {
    let mut grid = Vec::with_capacity(y_shares.len());

    for &share in y_shares {
        let reserve_y = share * total_reserve;
        let pool = Pool::new(total_reserve - reserve_y, reserve_y, price_x, price_y);

        let mut row = Vec::with_capacity(amounts_x.len());
        for &amount_x in amounts_x {
            let delta_y = swap_x_to_y_volatile(amount_x, &pool)?;
            let slippage = if amount_x > 0.0 && delta_y > 0.0 {
                get_slippage(amount_x, delta_y, &pool, SwapDirection::XToY)? * 100.0
            } else {
                0.0
            };
            row.push(slippage);
        }
        grid.push(row);
    }

    Ok(SlippageSurface {
        y_shares: y_shares.to_vec(),
        amounts_x: amounts_x.to_vec(),
        slippage_pct: grid,
    })
}
