//! Analysis runs driven by an [`AnalyzerConfig`]

use chrono::NaiveDate;
use serde::Serialize;

use dynamic_amp_core::{amp_curve, AmpPoint, Scenario};
use dynamic_amp_math::{
    slippage_surface, swap_sensitivity, Pool, SensitivityRow, SlippageSurface,
};
use dynamic_amp_simulation::{
    compare_parameters, compare_static_vs_dynamic, run_simulation, sweep_volatility_range,
    AmpCurve, StableCurvePricer, SwapComparison, VolatilitySample,
};

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, AnalyzerResult};

/// Aggregate statistics of a simulated path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub steps: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_price: f64,
    pub end_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub mean_volatility: f64,
    pub max_volatility: f64,
    pub min_volatility: f64,
    pub mean_amp: f64,
    pub min_amp: f64,
    pub max_amp: f64,
}

/// (min, max, mean) of a non-empty series
fn series_stats(values: &[f64]) -> (f64, f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    (min, max, mean)
}

impl ScenarioSummary {
    /// Summarize `scenario`; `None` when it has no steps
    pub fn from_scenario(scenario: &Scenario) -> Option<Self> {
        let first = scenario.records().first()?;
        let last = scenario.records().last()?;

        let (min_price, max_price, _) = series_stats(&scenario.prices());
        let (min_volatility, max_volatility, mean_volatility) =
            series_stats(&scenario.volatilities());
        let (min_amp, max_amp, mean_amp) = series_stats(&scenario.amp_factors());

        Some(Self {
            steps: scenario.len(),
            start_date: first.date,
            end_date: last.date,
            start_price: first.price,
            end_price: last.price,
            min_price,
            max_price,
            mean_volatility,
            max_volatility,
            min_volatility,
            mean_amp,
            min_amp,
            max_amp,
        })
    }
}

/// Everything produced by the `run` command
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub summary: ScenarioSummary,
    pub high_volatility: SwapComparison,
    pub low_volatility: SwapComparison,
    pub sweep: Vec<VolatilitySample>,
    pub parameter_curves: Vec<AmpCurve>,
}

/// Simulate a path, compare at its most and least volatile steps, sweep the
/// volatility range and tabulate the parameter grid
pub fn run_analysis(config: &AnalyzerConfig) -> AnalyzerResult<AnalysisReport> {
    config.validate()?;

    log::info!(
        "Simulating {} days (seed {}, sigma {})",
        config.simulation.days,
        config.simulation.seed,
        config.simulation.sigma
    );
    let scenario = run_simulation(&config.simulation, &config.model)?;

    let summary = ScenarioSummary::from_scenario(&scenario)
        .ok_or_else(|| AnalyzerError::EmptyScenario("simulation produced no steps".to_string()))?;
    let high = scenario
        .max_volatility_index()
        .ok_or_else(|| AnalyzerError::EmptyScenario("no high-volatility step".to_string()))?;
    let low = scenario
        .min_volatility_index()
        .ok_or_else(|| AnalyzerError::EmptyScenario("no low-volatility step".to_string()))?;

    let pricer = StableCurvePricer;
    let static_amps = &config.comparison.static_amps;

    log::info!("Comparing swaps at high volatility (step {})", high);
    let high_volatility =
        compare_static_vs_dynamic(&scenario, high, &config.trade, static_amps, &pricer)?;

    log::info!("Comparing swaps at low volatility (step {})", low);
    let low_volatility =
        compare_static_vs_dynamic(&scenario, low, &config.trade, static_amps, &pricer)?;

    log::info!(
        "Sweeping {} samples across the volatility range",
        config.comparison.sweep_samples
    );
    let sweep = sweep_volatility_range(
        &scenario,
        config.comparison.sweep_samples,
        &config.trade,
        config.comparison.sweep_static_amp,
        &pricer,
    )?;

    let study = &config.parameter_study;
    let parameter_curves = compare_parameters(
        &config.model.amp,
        &study.thresholds,
        &study.steepness_values,
        study.max_volatility,
        study.points,
    )?;

    Ok(AnalysisReport {
        summary,
        high_volatility,
        low_volatility,
        sweep,
        parameter_curves,
    })
}

/// A against volatility for the configured mapping
pub fn amp_curve_table(config: &AnalyzerConfig, points: usize) -> AnalyzerResult<Vec<AmpPoint>> {
    Ok(amp_curve(
        &config.model.amp,
        config.parameter_study.max_volatility,
        points,
    )?)
}

/// Exponential-curve slippage tables for the configured pools
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceReport {
    pub sensitivity: Vec<SensitivityRow>,
    pub surface: SlippageSurface,
}

pub fn surface_report(config: &AnalyzerConfig) -> AnalyzerResult<SurfaceReport> {
    let settings = &config.surface;

    let pool = Pool::new(
        settings.sensitivity_reserve_x,
        settings.sensitivity_reserve_y,
        settings.price_x,
        settings.price_y,
    );
    let sensitivity = swap_sensitivity(&pool, &settings.sensitivity_amounts)?;

    let surface = slippage_surface(
        &settings.shares(),
        &settings.amounts(),
        settings.total_reserve,
        settings.price_x,
        settings.price_y,
    )?;

    Ok(SurfaceReport {
        sensitivity,
        surface,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn short_config() -> AnalyzerConfig {
        let mut config = AnalyzerConfig::default();
        config.simulation.days = 120;
        config.simulation.start_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        config.comparison.sweep_samples = 4;
        config.parameter_study.points = 20;
        config
    }

    #[test]
    fn test_run_analysis() {
        let report = run_analysis(&short_config()).unwrap();

        assert_eq!(report.summary.steps, 120);
        assert_eq!(report.high_volatility.volatility, report.summary.max_volatility);
        assert_eq!(report.low_volatility.volatility, report.summary.min_volatility);
        assert_eq!(report.high_volatility.results.len(), 5);
        assert_eq!(report.sweep.len(), 4);
        assert_eq!(report.parameter_curves.len(), 9);
    }

    #[test]
    fn test_empty_horizon_is_reported() {
        let mut config = short_config();
        config.simulation.days = 0;
        assert!(matches!(
            run_analysis(&config),
            Err(AnalyzerError::EmptyScenario(_))
        ));
    }

    #[test]
    fn test_summary_statistics() {
        let config = short_config();
        let scenario = run_simulation(&config.simulation, &config.model).unwrap();
        let summary = ScenarioSummary::from_scenario(&scenario).unwrap();

        let vols = scenario.volatilities();
        let mean = vols.iter().sum::<f64>() / vols.len() as f64;
        assert_relative_eq!(summary.mean_volatility, mean, max_relative = 1e-9);
        assert!(summary.min_amp <= summary.mean_amp && summary.mean_amp <= summary.max_amp);
        assert_eq!(summary.start_price, 1.0);

        let prices = scenario.prices();
        assert_eq!(summary.end_price, prices[prices.len() - 1]);
        assert!(prices.iter().all(|&p| summary.min_price <= p && p <= summary.max_price));
        assert!(prices.contains(&summary.max_price));
        let amps = scenario.amp_factors();
        assert_eq!(summary.max_amp, config.model.amp.amp_factor(summary.min_volatility));
        assert_relative_eq!(
            summary.mean_amp,
            amps.iter().sum::<f64>() / amps.len() as f64,
            max_relative = 1e-9
        );

        assert!(ScenarioSummary::from_scenario(&Scenario::default()).is_none());
    }

    #[test]
    fn test_surface_report() {
        let mut config = AnalyzerConfig::default();
        config.surface.share_points = 5;
        config.surface.amount_points = 3;

        let report = surface_report(&config).unwrap();
        assert_eq!(report.sensitivity.len(), 7);
        assert_eq!(report.surface.slippage_pct.len(), 5);
        assert_eq!(report.surface.amounts_x.len(), 3);
    }
}
