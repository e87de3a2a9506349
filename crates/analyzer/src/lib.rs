pub mod analysis;
pub mod config;
pub mod error;
pub mod report;

pub use analysis::{
    amp_curve_table, run_analysis, surface_report, AnalysisReport, ScenarioSummary, SurfaceReport,
};
pub use config::{create_example_config, AnalyzerConfig, ParameterStudy, SurfaceSettings};
pub use error::{AnalyzerError, AnalyzerResult};
