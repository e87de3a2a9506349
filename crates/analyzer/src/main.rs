use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use dynamic_amp_analyzer::report::{format_amp_curve, format_analysis, format_surface_report};
use dynamic_amp_analyzer::{
    amp_curve_table, create_example_config, run_analysis, surface_report, AnalyzerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "dynamic-amp")]
#[command(about = "Volatility-driven amplification factor analysis for stable-swap pools")]
struct Args {
    /// Path to analyzer configuration file; built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Override the simulation seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Override the simulated horizon in days
    #[arg(long, global = true)]
    days: Option<usize>,

    /// Override the number of volatility sweep samples
    #[arg(long, global = true)]
    samples: Option<usize>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a price path and compare dynamic against fixed A
    Run,

    /// Tabulate A against volatility for the configured mapping
    Curve {
        /// Number of volatility samples
        #[arg(short, long, default_value = "21")]
        points: usize,
    },

    /// Exponential-curve slippage by trade size and reserve split
    Surface,

    /// Write an example configuration file
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = "dynamic-amp.toml")]
        output: String,
    },
}

fn load_config(args: &Args) -> Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => AnalyzerConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(days) = args.days {
        config.simulation.days = days;
    }
    if let Some(samples) = args.samples {
        config.comparison.sweep_samples = samples;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn emit<T: Serialize>(json: bool, value: &T, table: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", table(value));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    match args.command.as_ref().unwrap_or(&Command::Run) {
        Command::Run => {
            let config = load_config(&args)?;
            let report = run_analysis(&config)?;
            let static_amp = config.comparison.sweep_static_amp;
            emit(args.json, &report, |r| format_analysis(r, static_amp))?;
            log::info!("Analysis complete");
        }
        Command::Curve { points } => {
            let config = load_config(&args)?;
            let curve = amp_curve_table(&config, *points)?;
            emit(args.json, &curve, |c| format_amp_curve(c))?;
        }
        Command::Surface => {
            let config = load_config(&args)?;
            let report = surface_report(&config)?;
            emit(args.json, &report, format_surface_report)?;
        }
        Command::InitConfig { output } => {
            create_example_config(output)
                .with_context(|| format!("Failed to write example configuration to {}", output))?;
            log::info!("Wrote example configuration to {}", output);
        }
    }

    Ok(())
}
