/// Simulation framework for the dynamic amplification model
///
/// Provides utilities for:
/// - Generating synthetic price paths with clustered volatility
/// - Pricing swaps under the dynamic A and fixed comparison values
/// - Sweeping comparisons across the observed volatility range
/// - Tabulating A curves over a grid of sigmoid parameters
pub mod evaluator;
pub mod parameters;
pub mod price_path;

pub use evaluator::{
    compare_static_vs_dynamic, sample_positions, sweep_volatility_range, AmpKind,
    ComparisonSettings, StableCurvePricer, SwapComparison, SwapPricer, SwapResult, TradeSetup,
    VolatilitySample,
};
pub use parameters::{compare_parameters, AmpCurve, DEFAULT_STEEPNESS_VALUES, DEFAULT_THRESHOLDS};
pub use price_path::{
    run_simulation, simulate_price_data, ClusteringParams, SimulationParams, MAX_SIMULATION_DAYS,
};
