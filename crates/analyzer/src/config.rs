use std::fs;

use serde::{Deserialize, Serialize};

use dynamic_amp_core::{DynamicAmpConfig, DEFAULT_CURVE_MAX_VOLATILITY, DEFAULT_CURVE_POINTS};
use dynamic_amp_math::{linspace, DEFAULT_SENSITIVITY_AMOUNTS};
use dynamic_amp_simulation::{
    ComparisonSettings, SimulationParams, TradeSetup, DEFAULT_STEEPNESS_VALUES, DEFAULT_THRESHOLDS,
};

use crate::error::{AnalyzerError, AnalyzerResult};

/// Analyzer configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Volatility estimator and A mapping
    pub model: DynamicAmpConfig,

    /// Synthetic price path
    pub simulation: SimulationParams,

    /// Trade priced at each comparison point
    pub trade: TradeSetup,

    /// Fixed A candidates and sweep size
    pub comparison: ComparisonSettings,

    /// Grid of sigmoid parameters
    pub parameter_study: ParameterStudy,

    /// Exponential-curve slippage tables
    pub surface: SurfaceSettings,
}

/// Grid of (threshold, steepness) pairs tabulated by the parameter study
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParameterStudy {
    pub thresholds: Vec<f64>,
    pub steepness_values: Vec<f64>,

    /// Upper end of the sampled volatility range
    pub max_volatility: f64,

    /// Samples per curve
    pub points: usize,
}

/// Pools priced by the `surface` command
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Combined X and Y reserve, split by each Y share
    pub total_reserve: f64,
    pub price_x: f64,
    pub price_y: f64,

    /// Y share range, both ends strictly inside (0, 1)
    pub share_min: f64,
    pub share_max: f64,
    pub share_points: usize,

    /// X amount range
    pub amount_min: f64,
    pub amount_max: f64,
    pub amount_points: usize,

    /// Fixed pool for the trade-size sensitivity table
    pub sensitivity_reserve_x: f64,
    pub sensitivity_reserve_y: f64,
    pub sensitivity_amounts: Vec<f64>,
}

impl AnalyzerConfig {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> AnalyzerResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AnalyzerError::ConfigFile(format!("Failed to read config file {}: {}", path, e))
        })?;

        let config: AnalyzerConfig = toml::from_str(&content).map_err(|e| {
            AnalyzerError::ConfigFile(format!("Failed to parse config file {}: {}", path, e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> AnalyzerResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            AnalyzerError::SerializationError(format!("Failed to serialize config: {}", e))
        })?;
        fs::write(path, content).map_err(|e| {
            AnalyzerError::ConfigFile(format!("Failed to write config file {}: {}", path, e))
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> AnalyzerResult<()> {
        self.model.validate()?;
        self.simulation.validate()?;
        self.trade.validate()?;
        self.comparison.validate()?;
        self.parameter_study.validate()?;
        self.surface.validate()?;
        Ok(())
    }
}

impl ParameterStudy {
    fn validate(&self) -> AnalyzerResult<()> {
        if self.thresholds.is_empty() || self.steepness_values.is_empty() {
            return Err(AnalyzerError::InvalidConfig(
                "parameter_study needs at least one threshold and one steepness value".to_string(),
            ));
        }

        if !self.max_volatility.is_finite() || self.max_volatility <= 0.0 {
            return Err(AnalyzerError::InvalidConfig(format!(
                "parameter_study.max_volatility must be positive, got {}",
                self.max_volatility
            )));
        }

        if self.points == 0 {
            return Err(AnalyzerError::InvalidConfig(
                "parameter_study.points must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl SurfaceSettings {
    fn validate(&self) -> AnalyzerResult<()> {
        for (name, value) in [
            ("total_reserve", self.total_reserve),
            ("price_x", self.price_x),
            ("price_y", self.price_y),
            ("sensitivity_reserve_x", self.sensitivity_reserve_x),
            ("sensitivity_reserve_y", self.sensitivity_reserve_y),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalyzerError::InvalidConfig(format!(
                    "surface.{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if !(self.share_min > 0.0 && self.share_min <= self.share_max && self.share_max < 1.0) {
            return Err(AnalyzerError::InvalidConfig(format!(
                "surface Y shares must satisfy 0 < share_min <= share_max < 1, got [{}, {}]",
                self.share_min, self.share_max
            )));
        }

        if !(self.amount_min >= 0.0 && self.amount_min <= self.amount_max && self.amount_max.is_finite()) {
            return Err(AnalyzerError::InvalidConfig(format!(
                "surface amounts must satisfy 0 <= amount_min <= amount_max, got [{}, {}]",
                self.amount_min, self.amount_max
            )));
        }

        if self.share_points == 0 || self.amount_points == 0 {
            return Err(AnalyzerError::InvalidConfig(
                "surface grid needs at least one share and one amount".to_string(),
            ));
        }

        Ok(())
    }

    /// Y shares of the surface grid
    pub fn shares(&self) -> Vec<f64> {
        linspace(self.share_min, self.share_max, self.share_points)
    }

    /// X amounts of the surface grid
    pub fn amounts(&self) -> Vec<f64> {
        linspace(self.amount_min, self.amount_max, self.amount_points)
    }
}

impl Default for ParameterStudy {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            steepness_values: DEFAULT_STEEPNESS_VALUES.to_vec(),
            max_volatility: DEFAULT_CURVE_MAX_VOLATILITY,
            points: DEFAULT_CURVE_POINTS,
        }
    }
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            total_reserve: 100.0,
            price_x: 1.0,
            price_y: 1.0,
            share_min: 0.001,
            share_max: 0.999,
            share_points: 50,
            amount_min: 0.05,
            amount_max: 100.0,
            amount_points: 50,
            sensitivity_reserve_x: 2.0,
            sensitivity_reserve_y: 100.0,
            sensitivity_amounts: DEFAULT_SENSITIVITY_AMOUNTS.to_vec(),
        }
    }
}

/// Create example configuration file
pub fn create_example_config(path: &str) -> AnalyzerResult<()> {
    let mut example_config = AnalyzerConfig::default();
    example_config.trade.amount_x = 50.0;
    example_config.simulation.start_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1);

    example_config.save(path)?;
    Ok(())
}
