//! # Swap Evaluator
//!
//! Prices the same trade against the scenario's dynamic amplification factor
//! and a set of fixed ones, at selected points of a simulated path.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dynamic_amp_core::{AmpError, AmpResult, Scenario, ScenarioRecord};
use dynamic_amp_math::{get_slippage, swap_x_to_y_stable, CurveResult, Pool, SwapDirection};

/// Pricing backend for the evaluator
pub trait SwapPricer {
    /// Y received for selling `amount_x` into `pool` at amplification `amp`
    fn swap_x_to_y(&self, amount_x: f64, pool: &Pool, amp: f64) -> CurveResult<f64>;

    /// Slippage of an X-to-Y fill as a fraction
    fn slippage(&self, amount_x: f64, amount_y: f64, pool: &Pool) -> CurveResult<f64> {
        get_slippage(amount_x, amount_y, pool, SwapDirection::XToY)
    }
}

/// Oracle-anchored stable-swap curve
#[derive(Debug, Clone, Copy, Default)]
pub struct StableCurvePricer;

impl SwapPricer for StableCurvePricer {
    fn swap_x_to_y(&self, amount_x: f64, pool: &Pool, amp: f64) -> CurveResult<f64> {
        swap_x_to_y_stable(amount_x, pool, amp)
    }
}

/// Trade and pool used for every comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeSetup {
    /// X sold per trade
    pub amount_x: f64,
    pub reserve_x: f64,
    pub reserve_y: f64,
    /// Y is pegged at this price; X takes the simulated price
    pub price_y: f64,
    pub decimals_x: i32,
    pub decimals_y: i32,
}

impl Default for TradeSetup {
    fn default() -> Self {
        Self {
            amount_x: 10.0,
            reserve_x: 1000.0,
            reserve_y: 1000.0,
            price_y: 1.0,
            decimals_x: 0,
            decimals_y: 0,
        }
    }
}

impl TradeSetup {
    pub fn validate(&self) -> AmpResult<()> {
        let checks = [
            ("amount_x", self.amount_x),
            ("reserve_x", self.reserve_x),
            ("reserve_y", self.reserve_y),
            ("price_y", self.price_y),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(AmpError::invalid_parameter(name, value, "a finite positive value"));
            }
        }
        Ok(())
    }

    /// Pool with X priced at `price_x`
    pub fn pool_at(&self, price_x: f64) -> Pool {
        Pool::new(self.reserve_x, self.reserve_y, price_x, self.price_y)
            .with_decimals(self.decimals_x, self.decimals_y)
    }
}

/// Fixed amplification values compared against the dynamic one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonSettings {
    /// Candidates priced after the dynamic A, in this order
    pub static_amps: Vec<f64>,
    /// Number of points in the volatility sweep
    pub sweep_samples: usize,
    /// Fixed A the sweep compares against
    pub sweep_static_amp: f64,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            static_amps: vec![5.0, 10.0, 50.0, 100.0],
            sweep_samples: 10,
            sweep_static_amp: 10.0,
        }
    }
}

impl ComparisonSettings {
    pub fn validate(&self) -> AmpResult<()> {
        for &amp in &self.static_amps {
            if !amp.is_finite() || amp <= 0.0 {
                return Err(AmpError::invalid_parameter(
                    "static_amps",
                    amp,
                    "finite positive amplification factors",
                ));
            }
        }

        if !self.sweep_static_amp.is_finite() || self.sweep_static_amp <= 0.0 {
            return Err(AmpError::invalid_parameter(
                "sweep_static_amp",
                self.sweep_static_amp,
                "a finite positive amplification factor",
            ));
        }
        Ok(())
    }
}

/// Which amplification factor priced a swap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AmpKind {
    Dynamic,
    Static(f64),
}

impl fmt::Display for AmpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmpKind::Dynamic => write!(f, "Dynamic"),
            AmpKind::Static(amp) => write!(f, "Static ({})", amp),
        }
    }
}

/// Outcome of one candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapResult {
    pub kind: AmpKind,
    pub amp_factor: f64,
    pub amount_y: f64,
    /// Fraction, not percent
    pub slippage: f64,
}

/// All candidates priced at one scenario step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapComparison {
    pub index: usize,
    pub date: NaiveDate,
    pub price: f64,
    pub volatility: f64,
    pub dynamic_amp: f64,
    pub amount_x: f64,
    /// Dynamic A first, then the fixed values in the order given
    pub results: Vec<SwapResult>,
}

fn price_candidate<P: SwapPricer>(
    pricer: &P,
    trade: &TradeSetup,
    pool: &Pool,
    kind: AmpKind,
    amp_factor: f64,
) -> AmpResult<SwapResult> {
    let amount_y = pricer.swap_x_to_y(trade.amount_x, pool, amp_factor)?;
    let slippage = pricer.slippage(trade.amount_x, amount_y, pool)?;
    Ok(SwapResult {
        kind,
        amp_factor,
        amount_y,
        slippage,
    })
}

/// Compare the dynamic A at `index` against each of `static_amps`.
///
/// Pricing failures are returned as [`AmpError::Pricing`] with the curve
/// error intact.
pub fn compare_static_vs_dynamic<P: SwapPricer>(
    scenario: &Scenario,
    index: usize,
    trade: &TradeSetup,
    static_amps: &[f64],
    pricer: &P,
) -> AmpResult<SwapComparison> {
    trade.validate()?;
    let record = scenario.get(index)?;
    let pool = trade.pool_at(record.price);

    let mut results = Vec::with_capacity(static_amps.len() + 1);
    results.push(price_candidate(
        pricer,
        trade,
        &pool,
        AmpKind::Dynamic,
        record.amp_factor,
    )?);
    for &amp in static_amps {
        results.push(price_candidate(pricer, trade, &pool, AmpKind::Static(amp), amp)?);
    }

    log::debug!(
        "Compared {} candidates at step {} (volatility {:.4}, dynamic A {:.2})",
        results.len(),
        index,
        record.volatility,
        record.amp_factor
    );

    Ok(SwapComparison {
        index,
        date: record.date,
        price: record.price,
        volatility: record.volatility,
        dynamic_amp: record.amp_factor,
        amount_x: trade.amount_x,
        results,
    })
}

/// One point of the volatility sweep, slippage in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySample {
    /// Step of the scenario the sample came from
    pub index: usize,
    pub volatility: f64,
    pub dynamic_amp: f64,
    pub slippage_dynamic_pct: f64,
    pub slippage_static_pct: f64,
}

/// Evenly spaced positions over `0..len`, first and last included, rounded
/// down. Positions repeat when `num_samples > len`.
pub fn sample_positions(len: usize, num_samples: usize) -> Vec<usize> {
    match (len, num_samples) {
        (0, _) | (_, 0) => Vec::new(),
        (_, 1) => vec![0],
        _ => (0..num_samples)
            .map(|i| i * (len - 1) / (num_samples - 1))
            .collect(),
    }
}

fn sample_record<P: SwapPricer>(
    record: &ScenarioRecord,
    trade: &TradeSetup,
    static_amp: f64,
    pricer: &P,
) -> AmpResult<VolatilitySample> {
    let pool = trade.pool_at(record.price);
    let dynamic = price_candidate(pricer, trade, &pool, AmpKind::Dynamic, record.amp_factor)?;
    let fixed = price_candidate(pricer, trade, &pool, AmpKind::Static(static_amp), static_amp)?;

    Ok(VolatilitySample {
        index: record.index,
        volatility: record.volatility,
        dynamic_amp: record.amp_factor,
        slippage_dynamic_pct: dynamic.slippage * 100.0,
        slippage_static_pct: fixed.slippage * 100.0,
    })
}

/// Compare dynamic A against `static_amp` at `num_samples` steps spread over
/// the sorted volatility range rather than over time.
pub fn sweep_volatility_range<P: SwapPricer>(
    scenario: &Scenario,
    num_samples: usize,
    trade: &TradeSetup,
    static_amp: f64,
    pricer: &P,
) -> AmpResult<Vec<VolatilitySample>> {
    trade.validate()?;
    let sorted = scenario.sorted_by_volatility();

    sample_positions(sorted.len(), num_samples)
        .into_iter()
        .map(|pos| sample_record(sorted[pos], trade, static_amp, pricer))
        .collect()
}
