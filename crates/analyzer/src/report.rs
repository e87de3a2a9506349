//! Plain-text tables for console output

use std::fmt::Write;

use dynamic_amp_core::AmpPoint;
use dynamic_amp_math::{SensitivityRow, SlippageSurface};
use dynamic_amp_simulation::{AmpCurve, SwapComparison, VolatilitySample};

use crate::analysis::{AnalysisReport, ScenarioSummary, SurfaceReport};

/// Largest number of rows or columns printed from a sampled series
const MAX_TABLE_ROWS: usize = 25;
const MAX_TABLE_COLUMNS: usize = 8;

/// Every `stride`-th index of `0..len`, always ending with the last one
fn strided_indices(len: usize, max: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let stride = len.div_ceil(max.max(1));
    let mut indices: Vec<usize> = (0..len).step_by(stride).collect();
    if indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}

pub fn format_summary(summary: &ScenarioSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scenario: {} steps, {} to {}", summary.steps, summary.start_date, summary.end_date);
    let _ = writeln!(
        out,
        "  Price       start {:.4}  end {:.4}  min {:.4}  max {:.4}",
        summary.start_price, summary.end_price, summary.min_price, summary.max_price
    );
    let _ = writeln!(
        out,
        "  Volatility  mean {:.4}  min {:.4}  max {:.4}",
        summary.mean_volatility, summary.min_volatility, summary.max_volatility
    );
    let _ = writeln!(
        out,
        "  Dynamic A   mean {:.2}  min {:.2}  max {:.2}",
        summary.mean_amp, summary.min_amp, summary.max_amp
    );
    out
}

pub fn format_comparison(comparison: &SwapComparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Test Date: {}", comparison.date);
    let _ = writeln!(out, "Price X: {:.4}", comparison.price);
    let _ = writeln!(out, "Volatility: {:.4}", comparison.volatility);
    let _ = writeln!(out, "Dynamic A: {:.2}", comparison.dynamic_amp);
    let _ = writeln!(out);
    let _ = writeln!(out, "Swap Results (Amount X = {}):", comparison.amount_x);
    let _ = writeln!(out, "{:<14} {:>10} {:>14} {:>12}", "A type", "A value", "Amount Y", "Slippage %");
    for result in &comparison.results {
        let _ = writeln!(
            out,
            "{:<14} {:>10.2} {:>14.6} {:>12.4}",
            result.kind.to_string(),
            result.amp_factor,
            result.amount_y,
            result.slippage * 100.0
        );
    }
    out
}

pub fn format_sweep(samples: &[VolatilitySample], static_amp: f64) -> String {
    let mut out = String::new();
    let static_header = format!("Static A={} %", static_amp);
    let _ = writeln!(
        out,
        "{:>6} {:>10} {:>10} {:>12} {:>14}",
        "Step", "Volatility", "Dynamic A", "Dynamic %", static_header
    );
    for sample in samples {
        let _ = writeln!(
            out,
            "{:>6} {:>10.4} {:>10.2} {:>12.4} {:>14.4}",
            sample.index,
            sample.volatility,
            sample.dynamic_amp,
            sample.slippage_dynamic_pct,
            sample.slippage_static_pct
        );
    }
    out
}

/// A at both ends of each curve
pub fn format_parameter_curves(curves: &[AmpCurve]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<34} {:>10} {:>10}", "Parameters", "A (calm)", "A (max)");
    for curve in curves {
        let _ = writeln!(
            out,
            "{:<34} {:>10.2} {:>10.2}",
            curve.label(),
            curve.calm_amp().unwrap_or(f64::NAN),
            curve.stressed_amp().unwrap_or(f64::NAN)
        );
    }
    out
}

pub fn format_amp_curve(points: &[AmpPoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>12} {:>12}", "Volatility", "A");
    for i in strided_indices(points.len(), MAX_TABLE_ROWS) {
        let _ = writeln!(out, "{:>12.4} {:>12.4}", points[i].volatility, points[i].amp_factor);
    }
    out
}

pub fn format_sensitivity(rows: &[SensitivityRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>10} {:>12} {:>12} {:>12} {:>12}",
        "Amount X", "Delta Y", "Reserve X", "Reserve Y", "Slippage %"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>10.2} {:>12.6} {:>12.4} {:>12.4} {:>12.4}",
            row.amount_x, row.delta_y, row.new_reserve_x, row.new_reserve_y, row.slippage_pct
        );
    }
    out
}

/// Slippage grid, downsampled to fit a terminal
pub fn format_surface(surface: &SlippageSurface) -> String {
    let mut out = String::new();
    let rows = strided_indices(surface.y_shares.len(), MAX_TABLE_ROWS);
    let cols = strided_indices(surface.amounts_x.len(), MAX_TABLE_COLUMNS);

    let _ = write!(out, "{:>9}", "Y share");
    for &j in &cols {
        let _ = write!(out, " {:>10.2}", surface.amounts_x[j]);
    }
    let _ = writeln!(out);

    for &i in &rows {
        let _ = write!(out, "{:>9.3}", surface.y_shares[i]);
        for &j in &cols {
            let _ = write!(out, " {:>10.4}", surface.slippage_pct[i][j]);
        }
        let _ = writeln!(out);
    }
    out
}

pub fn format_analysis(report: &AnalysisReport, static_amp: f64) -> String {
    let mut out = format_summary(&report.summary);

    out.push_str("\nTesting with high volatility period...\n");
    out.push_str(&format_comparison(&report.high_volatility));

    out.push_str("\nTesting with low volatility period...\n");
    out.push_str(&format_comparison(&report.low_volatility));

    out.push_str("\nSlippage across different market conditions:\n");
    out.push_str(&format_sweep(&report.sweep, static_amp));

    out.push_str("\nDynamic A under different parameters:\n");
    out.push_str(&format_parameter_curves(&report.parameter_curves));
    out
}

pub fn format_surface_report(report: &SurfaceReport) -> String {
    let mut out = String::from("Swap sensitivity (exponential curve):\n");
    out.push_str(&format_sensitivity(&report.sensitivity));
    out.push_str("\nSlippage % by Y share (rows) and X amount (columns):\n");
    out.push_str(&format_surface(&report.surface));
    out
}
